//! Lightweight scoring for when only calendar birthdays are known.

use super::score::{AxisScores, Category, Score};
use super::zodiac::ZodiacSign;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;

/// Nudges span `-NUDGE_RADIUS..=NUDGE_RADIUS`.
const NUDGE_RADIUS: i32 = 6;
const EASING_EXPONENT: f64 = 0.65;

/// Steps between two signs around the twelve-sign ring, `0..=6`.
pub fn wheel_distance(a: ZodiacSign, b: ZodiacSign) -> u8 {
    let a = a.index();
    let b = b.index();
    let forward = (12 + a - b) % 12;
    let backward = (12 + b - a) % 12;
    forward.min(backward) as u8
}

pub fn score_from_sun(a: ZodiacSign, b: ZodiacSign) -> AxisScores {
    let distance = f64::from(wheel_distance(a, b));
    let fit = (1.0 - distance / 6.0).clamp(0.0, 1.0);
    let eased = fit.powf(EASING_EXPONENT);

    AxisScores {
        romantic: Score::from_f64(45.0 + eased * 55.0),
        friendship: Score::from_f64(48.0 + eased * 52.0),
        work: Score::from_f64(50.0 + eased * 50.0),
    }
}

/// 32-bit FNV-1a over UTF-16 code units. ASCII input hashes exactly like the
/// byte-wise variant; wider characters keep their historical values.
pub fn name_hash(value: &str) -> u32 {
    value.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic adjustment in `[-6, 6]` for one axis.
pub fn name_nudge(name: &str, category: Category) -> i32 {
    let keyed = format!("{}|{}", name.trim(), category.tag());
    (name_hash(&keyed) % 13) as i32 - NUDGE_RADIUS
}

pub fn apply_name_nudges(base: AxisScores, name: &str) -> AxisScores {
    AxisScores {
        romantic: base.romantic.nudged(name_nudge(name, Category::Romantic)),
        friendship: base.friendship.nudged(name_nudge(name, Category::Friendship)),
        work: base.work.nudged(name_nudge(name, Category::Work)),
    }
}
