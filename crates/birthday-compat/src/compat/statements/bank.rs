//! Sentence banks per category and band. `{A}` is the site owner, `{B}` the
//! person being compared. Within a bank, sentences run from the low end of the
//! band to the high end.

use crate::compat::score::{Band, Category};

const ROMANTIC_BAD: &[&str] = &[
    "{A} wants to meet {B} in the same softness, but the moments keep missing each other.",
    "When {A} reaches, {B} hesitates, and when {B} opens, {A} is already guarding the door.",
    "The care is real, yet comfort slips; {A} and {B} keep loving from different angles.",
    "{A} and {B} circle the right feeling, but safety lands late and leaves early.",
    "They aim for tenderness together, but their maps don’t match; patience is the road they need.",
];

const ROMANTIC_OK: &[&str] = &[
    "There’s a spark here; {A} and {B} can keep it warm with clearer words and gentler timing.",
    "{A} and {B} can land the hug they want if they name the hurt out loud and early.",
    "Care survives the bumps; little rituals could turn this into a softer place for both.",
    "Not effortless, but possible; repeat the kindness, skip the guessing.",
    "If {A} asks and {B} answers, intimacy finds their rhythm.",
];

const ROMANTIC_NORMAL: &[&str] = &[
    "{A} steadies and {B} softens; the love between them learns a trustworthy pace.",
    "It’s sunrise, not fireworks; {A} and {B} glow in a way that lasts.",
    "{A} and {B} trade safety and spark in good measure—no one has to disappear.",
    "Honesty keeps the room warm, gentleness keeps it open; {A} and {B} are learning both.",
    "Trust grows in small steps; {A} and {B} say the real thing and stay.",
];

const ROMANTIC_GOOD: &[&str] = &[
    "When {A} and {B} are together, the room calms; love feels like home that also holds a horizon.",
    "{A} makes love make sense for {B}, and {B} makes courage easy for {A}.",
    "They don’t chase sparks—they glow; {A} and {B} keep each other warm without burning out.",
    "Eyes that say I’m here—that’s the language {A} and {B} speak fluently.",
    "With {A} and {B}, love is clear, not loud; life fits better together.",
];

const FRIENDSHIP_BAD: &[&str] = &[
    "Banter turns sharp; {A} and {B} need boundaries so the jokes land kinder.",
    "Plans wobble and trust arrives late; repair needs speed for {A} and {B}.",
    "{A} speaks straight, {B} shields up; truth lands jagged instead of clean.",
    "They escalate fast and cool slowly; fatigue builds between {A} and {B}.",
    "Inside jokes misfire; tone needs tuning before fun returns to {A} and {B}.",
];

const FRIENDSHIP_OK: &[&str] = &[
    "It works in bursts; short resets help {A} and {B} keep the vibe steady.",
    "Align the expectation, then the laughs land better for {A} and {B}.",
    "With clearer check-ins, {A} and {B} stop stepping on toes.",
    "Less sarcasm, more signal; friendship breathes again for {A} and {B}.",
    "{A} and {B} are close to easy—trim the friction and it shows.",
];

const FRIENDSHIP_NORMAL: &[&str] = &[
    "Low drama, real banter; {A} and {B} have room to grow without strain.",
    "{A} cools the heat, {B} breaks the ice; conflict passes quicker now.",
    "Different styles, same loyalty; honest asks keep it smooth for {A} and {B}.",
    "They disagree without disrespect; steady ground for {A} and {B}.",
    "Momentum and courage are traded fairly here; {A} and {B} notice it.",
];

const FRIENDSHIP_GOOD: &[&str] = &[
    "Peak friendship energy: {A} can roast {B} with love and still bring snacks.",
    "{A} and {B} lift each other’s week with jokes and straight answers.",
    "Trust runs deep—less performance, more presence when {A} and {B} show up.",
    "One steadies, one energizes; pacing fits naturally for {A} and {B}.",
    "Effort goes to life, not decoding each other; {A} and {B} keep it light and loyal.",
];

const WORK_BAD: &[&str] = &[
    "Roles blur and handoffs drop; {A} and {B} need one plan and a single owner.",
    "Debates linger, decisions lag, delivery slips; {A} and {B} must tighten the loop.",
    "Updates land late and expectations float; stress compounds for {A} and {B}.",
    "{A} needs clarity, {B} needs structure; pick the path and move.",
    "Meetings run long and value runs short; time to get crisp, {A} and {B}.",
];

const WORK_OK: &[&str] = &[
    "Crisp notes and clear owners improve pace for {A} and {B}.",
    "Shorter standups, cleaner lanes—progress follows {A} and {B}.",
    "{A} brings focus, {B} brings motion; map the route and ship.",
    "Decide fast, adjust gently—{A} and {B} deliver sooner.",
    "One page, one owner, one date; lift-off for {A} and {B}.",
];

const WORK_NORMAL: &[&str] = &[
    "Give {A} and {B} a messy brief and a map; they’ll find the route.",
    "Disagree, decide, deliver—works well when someone owns the timeline for {A} and {B}.",
    "Fewer meetings, clearer checkpoints; momentum sticks with {A} and {B}.",
    "Risks are caught early and outcomes stay on time for {A} and {B}.",
    "Purposeful over performative; results tell the story for {A} and {B}.",
];

const WORK_GOOD: &[&str] = &[
    "Well-tuned kitchen mode: pressure turns into plates shipped by {A} and {B}.",
    "Meetings end lighter than they start—more progress, fewer words with {A} and {B}.",
    "{A} turns sparks into plans, {B} turns plans into momentum; teams feel it.",
    "{A} and {B} keep scope honest and schedules real.",
    "Reliable under load—people trust {A} and {B} with the hard things.",
];

const ALL_BANKS: &[&[&str]] = &[
    ROMANTIC_BAD,
    ROMANTIC_OK,
    ROMANTIC_NORMAL,
    ROMANTIC_GOOD,
    FRIENDSHIP_BAD,
    FRIENDSHIP_OK,
    FRIENDSHIP_NORMAL,
    FRIENDSHIP_GOOD,
    WORK_BAD,
    WORK_OK,
    WORK_NORMAL,
    WORK_GOOD,
];

const fn every_bank_has_entries(banks: &[&[&str]]) -> bool {
    let mut index = 0;
    while index < banks.len() {
        if banks[index].is_empty() {
            return false;
        }
        index += 1;
    }
    true
}

const _: () = assert!(
    every_bank_has_entries(ALL_BANKS),
    "every category and band needs at least one statement"
);

pub fn bank_for(category: Category, band: Band) -> &'static [&'static str] {
    match (category, band) {
        (Category::Romantic, Band::Bad) => ROMANTIC_BAD,
        (Category::Romantic, Band::Ok) => ROMANTIC_OK,
        (Category::Romantic, Band::Normal) => ROMANTIC_NORMAL,
        (Category::Romantic, Band::Good) => ROMANTIC_GOOD,
        (Category::Friendship, Band::Bad) => FRIENDSHIP_BAD,
        (Category::Friendship, Band::Ok) => FRIENDSHIP_OK,
        (Category::Friendship, Band::Normal) => FRIENDSHIP_NORMAL,
        (Category::Friendship, Band::Good) => FRIENDSHIP_GOOD,
        (Category::Work, Band::Bad) => WORK_BAD,
        (Category::Work, Band::Ok) => WORK_OK,
        (Category::Work, Band::Normal) => WORK_NORMAL,
        (Category::Work, Band::Good) => WORK_GOOD,
    }
}
