//! Scoring from precise Sun and Moon positions.
//!
//! Both entry points are total: an unrecognized sign on either side falls back
//! to neutral constants instead of failing, so partial upstream data lowers
//! score quality without aborting the request.

use super::aspects::{aspect_score, normalize_aspect};
use super::score::Score;
use super::zodiac::{Element, Modality, ZodiacSign};
use serde::{Deserialize, Serialize};

const UNKNOWN_ELEMENT_HARMONY: f64 = 0.6;
const UNKNOWN_MODALITY_ADJUSTMENT: i32 = 0;

/// Sum of two modality adjustments spans `[-16, 16]`.
const MODALITY_SPAN: f64 = 16.0;

/// One luminary for one person. `sign` is `None` when upstream data named a
/// sign outside the twelve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialPosition {
    pub sign: Option<ZodiacSign>,
    /// Ecliptic longitude in degrees; values outside `[0, 360)` are wrapped.
    pub longitude: f64,
}

impl CelestialPosition {
    pub fn new(sign: ZodiacSign, longitude: f64) -> Self {
        Self {
            sign: Some(sign),
            longitude,
        }
    }

    /// Position whose sign is derived from its own longitude.
    pub fn at_longitude(longitude: f64) -> Self {
        Self::new(ZodiacSign::from_longitude(longitude), longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonSigns {
    pub sun: CelestialPosition,
    pub moon: CelestialPosition,
}

pub fn element_harmony(a: Option<ZodiacSign>, b: Option<ZodiacSign>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return UNKNOWN_ELEMENT_HARMONY;
    };

    use Element::*;
    match (a.element(), b.element()) {
        (left, right) if left == right => 1.0,
        (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => 0.85,
        (Fire, Water) | (Water, Fire) => 0.45,
        (Earth, Air) | (Air, Earth) => 0.55,
        _ => 0.70,
    }
}

pub fn modality_adjustment(a: Option<ZodiacSign>, b: Option<ZodiacSign>) -> i32 {
    let (Some(a), Some(b)) = (a, b) else {
        return UNKNOWN_MODALITY_ADJUSTMENT;
    };

    match (a.modality(), b.modality()) {
        (Modality::Fixed, Modality::Fixed) => -8,
        (Modality::Cardinal, Modality::Cardinal) => -4,
        (Modality::Mutable, Modality::Mutable) => 4,
        _ => 2,
    }
}

fn modality_norm(a: &PersonSigns, b: &PersonSigns) -> f64 {
    let total = modality_adjustment(a.sun.sign, b.sun.sign)
        + modality_adjustment(a.moon.sign, b.moon.sign);
    ((f64::from(total) + MODALITY_SPAN) / (2.0 * MODALITY_SPAN)).clamp(0.0, 1.0)
}

pub fn friendship(a: &PersonSigns, b: &PersonSigns) -> Score {
    let elem_avg =
        (element_harmony(a.sun.sign, b.sun.sign) + element_harmony(a.moon.sign, b.moon.sign)) / 2.0;
    let mm_norm = normalize_aspect(aspect_score(a.moon.longitude, b.moon.longitude));
    let moda_norm = modality_norm(a, b);
    let variety = if a.sun.sign != b.sun.sign && a.moon.sign != b.moon.sign {
        1.0
    } else {
        0.0
    };

    let blended = 0.40 * elem_avg + 0.30 * mm_norm + 0.20 * moda_norm + 0.10 * variety;
    Score::from_f64(blended * 100.0)
}

pub fn work(a: &PersonSigns, b: &PersonSigns) -> Score {
    let hostile = match (a.sun.sign, b.sun.sign) {
        (Some(left), Some(right)) => left.element().is_hostile_to(right.element()),
        _ => false,
    };
    let elem_balance = if hostile {
        0.4
    } else if a.sun.sign != b.sun.sign {
        1.0
    } else {
        0.6
    };

    let moda_norm = modality_norm(a, b);
    let sun_norm = normalize_aspect(aspect_score(a.sun.longitude, b.sun.longitude));
    let moon_norm = normalize_aspect(aspect_score(a.moon.longitude, b.moon.longitude));

    let blended = 0.35 * moda_norm + 0.35 * elem_balance + 0.20 * sun_norm + 0.10 * moon_norm;
    Score::from_f64(blended * 100.0)
}
