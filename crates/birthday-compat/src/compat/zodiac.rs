use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// Pairs that clash in the work heuristic: Fire with Water, Earth with Air.
    pub const fn is_hostile_to(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Fire, Self::Water)
                | (Self::Water, Self::Fire)
                | (Self::Earth, Self::Air)
                | (Self::Air, Self::Earth)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// The twelve tropical signs in wheel order, starting at Aries (0°).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Aries,
            Self::Taurus,
            Self::Gemini,
            Self::Cancer,
            Self::Leo,
            Self::Virgo,
            Self::Libra,
            Self::Scorpio,
            Self::Sagittarius,
            Self::Capricorn,
            Self::Aquarius,
            Self::Pisces,
        ]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Aries => "♈",
            Self::Taurus => "♉",
            Self::Gemini => "♊",
            Self::Cancer => "♋",
            Self::Leo => "♌",
            Self::Virgo => "♍",
            Self::Libra => "♎",
            Self::Scorpio => "♏",
            Self::Sagittarius => "♐",
            Self::Capricorn => "♑",
            Self::Aquarius => "♒",
            Self::Pisces => "♓",
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    pub const fn modality(self) -> Modality {
        match self {
            Self::Aries | Self::Cancer | Self::Libra | Self::Capricorn => Modality::Cardinal,
            Self::Taurus | Self::Leo | Self::Scorpio | Self::Aquarius => Modality::Fixed,
            Self::Gemini | Self::Virgo | Self::Sagittarius | Self::Pisces => Modality::Mutable,
        }
    }

    /// Case-insensitive lookup by English name. Unknown text is `None`, which the
    /// engines treat as an unrecognized sign rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ordered()
            .into_iter()
            .find(|sign| sign.label().eq_ignore_ascii_case(wanted))
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0).floor() as usize;
        Self::ordered()[index.min(11)]
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Western Sun sign from calendar month and day alone.
pub fn sun_sign_for(month: u32, day: u32) -> ZodiacSign {
    let md = month * 100 + day;
    match md {
        321..=419 => ZodiacSign::Aries,
        420..=520 => ZodiacSign::Taurus,
        521..=620 => ZodiacSign::Gemini,
        621..=722 => ZodiacSign::Cancer,
        723..=822 => ZodiacSign::Leo,
        823..=922 => ZodiacSign::Virgo,
        923..=1022 => ZodiacSign::Libra,
        1023..=1121 => ZodiacSign::Scorpio,
        1122..=1221 => ZodiacSign::Sagittarius,
        _ if md >= 1222 || md <= 119 => ZodiacSign::Capricorn,
        120..=218 => ZodiacSign::Aquarius,
        _ => ZodiacSign::Pisces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_and_modality_has_expected_membership() {
        let fire: Vec<_> = ZodiacSign::ordered()
            .into_iter()
            .filter(|sign| sign.element() == Element::Fire)
            .collect();
        assert_eq!(
            fire,
            vec![ZodiacSign::Aries, ZodiacSign::Leo, ZodiacSign::Sagittarius]
        );

        for modality in [Modality::Cardinal, Modality::Fixed, Modality::Mutable] {
            let count = ZodiacSign::ordered()
                .iter()
                .filter(|sign| sign.modality() == modality)
                .count();
            assert_eq!(count, 4, "{modality:?} should cover four signs");
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(ZodiacSign::parse("  leo "), Some(ZodiacSign::Leo));
        assert_eq!(ZodiacSign::parse("SAGITTARIUS"), Some(ZodiacSign::Sagittarius));
        assert_eq!(ZodiacSign::parse("Ophiuchus"), None);
        assert_eq!(ZodiacSign::parse(""), None);
    }

    #[test]
    fn from_longitude_wraps_out_of_range_values() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(129.9), ZodiacSign::Leo);
        assert_eq!(ZodiacSign::from_longitude(359.99), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(370.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(-15.0), ZodiacSign::Pisces);
    }

    #[test]
    fn sun_sign_cutovers_follow_calendar_boundaries() {
        assert_eq!(sun_sign_for(7, 28), ZodiacSign::Leo);
        assert_eq!(sun_sign_for(7, 22), ZodiacSign::Cancer);
        assert_eq!(sun_sign_for(7, 23), ZodiacSign::Leo);
        assert_eq!(sun_sign_for(12, 25), ZodiacSign::Capricorn);
        assert_eq!(sun_sign_for(1, 19), ZodiacSign::Capricorn);
        assert_eq!(sun_sign_for(1, 20), ZodiacSign::Aquarius);
        assert_eq!(sun_sign_for(2, 29), ZodiacSign::Pisces);
        assert_eq!(sun_sign_for(3, 20), ZodiacSign::Pisces);
        assert_eq!(sun_sign_for(11, 4), ZodiacSign::Scorpio);
    }

    #[test]
    fn hostile_elements_are_symmetric() {
        assert!(Element::Fire.is_hostile_to(Element::Water));
        assert!(Element::Water.is_hostile_to(Element::Fire));
        assert!(Element::Air.is_hostile_to(Element::Earth));
        assert!(!Element::Fire.is_hostile_to(Element::Air));
    }
}
