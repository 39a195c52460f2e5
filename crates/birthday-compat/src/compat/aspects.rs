use serde::Serialize;

/// Tolerance around each exact aspect angle, in degrees.
pub const ASPECT_ORB: f64 = 6.0;

/// Lowest and highest contribution a single aspect can produce. The floor is
/// only reachable through `strongest_aspect`; it still anchors normalization.
pub const ASPECT_FLOOR: f64 = -18.0;
pub const ASPECT_CEILING: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Opposition => "opposition",
        }
    }
}

/// (kind, exact angle, peak contribution)
const ASPECTS: &[(AspectKind, f64, f64)] = &[
    (AspectKind::Conjunction, 0.0, 24.0),
    (AspectKind::Sextile, 60.0, 16.0),
    (AspectKind::Square, 90.0, -14.0),
    (AspectKind::Trine, 120.0, 22.0),
    (AspectKind::Opposition, 180.0, -18.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectHit {
    pub kind: AspectKind,
    pub exact_angle: f64,
    /// Distance from the exact angle, in degrees.
    pub orb: f64,
    pub contribution: f64,
}

/// Shorter arc between two longitudes, in `[0, 180]`.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a.rem_euclid(360.0) - b.rem_euclid(360.0)).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Strongest aspect within orb, if any. The orbs never overlap, so at most one
/// aspect can resonate, but the scan still keeps the maximum contribution.
pub fn strongest_aspect(a: f64, b: f64) -> Option<AspectHit> {
    let separation = angular_separation(a, b);

    ASPECTS
        .iter()
        .filter_map(|&(kind, exact_angle, peak)| {
            let orb = (separation - exact_angle).abs();
            (orb <= ASPECT_ORB).then(|| AspectHit {
                kind,
                exact_angle,
                orb,
                contribution: peak * (1.0 - orb / ASPECT_ORB),
            })
        })
        .max_by(|left, right| left.contribution.total_cmp(&right.contribution))
}

/// Compatibility contribution of the angle between two longitudes. Starts at
/// `0.0`, so tense aspects and empty orbs both contribute nothing.
pub fn aspect_score(a: f64, b: f64) -> f64 {
    strongest_aspect(a, b)
        .map(|hit| hit.contribution)
        .into_iter()
        .fold(0.0_f64, f64::max)
}

/// Maps an aspect contribution onto `[0, 1]`.
pub fn normalize_aspect(contribution: f64) -> f64 {
    ((contribution - ASPECT_FLOOR) / (ASPECT_CEILING - ASPECT_FLOOR)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn identical_longitudes_form_an_exact_conjunction() {
        for lon in [0.0, 45.5, 179.0, 359.9] {
            assert!(approx(aspect_score(lon, lon), 24.0));
        }
    }

    #[test]
    fn separation_takes_the_shorter_arc() {
        assert!(approx(angular_separation(359.0, 1.0), 2.0));
        assert!(approx(angular_separation(10.0, 370.0), 0.0));
        assert!(approx(angular_separation(-30.0, 30.0), 60.0));
        assert!(approx(angular_separation(0.0, 180.0), 180.0));
    }

    #[test]
    fn contribution_decays_linearly_inside_the_orb() {
        assert!(approx(aspect_score(0.0, 63.0), 8.0));
        assert!(approx(aspect_score(0.0, 120.0), 22.0));
        assert!(approx(aspect_score(0.0, 66.0), 0.0));
    }

    #[test]
    fn tense_aspects_never_score_below_zero() {
        assert_eq!(aspect_score(0.0, 90.0), 0.0);
        assert_eq!(aspect_score(0.0, 180.0), 0.0);
        assert_eq!(aspect_score(100.0, 193.0), 0.0);

        let square = strongest_aspect(0.0, 90.0).expect("square in orb");
        assert_eq!(square.kind, AspectKind::Square);
        assert!(approx(square.contribution, -14.0));
        let opposition = strongest_aspect(100.0, 193.0).expect("opposition in orb");
        assert!(approx(opposition.contribution, -7.0));
    }

    #[test]
    fn longitudes_outside_every_orb_score_zero() {
        assert_eq!(aspect_score(0.0, 30.0), 0.0);
        assert!(strongest_aspect(0.0, 150.0).is_none());
    }

    #[test]
    fn scoring_is_symmetric_and_bounded() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let forward = aspect_score(17.0, lon);
            let backward = aspect_score(lon, 17.0);
            assert!(approx(forward, backward), "asymmetric at {lon}");
            assert!((0.0..=ASPECT_CEILING).contains(&forward));
            lon += 0.5;
        }
    }

    #[test]
    fn strongest_aspect_reports_kind_and_orb() {
        let hit = strongest_aspect(10.0, 132.0).expect("trine in orb");
        assert_eq!(hit.kind, AspectKind::Trine);
        assert!(approx(hit.orb, 2.0));
        assert_eq!(hit.kind.label(), "trine");
    }

    #[test]
    fn normalization_clamps_to_unit_range() {
        assert!(approx(normalize_aspect(24.0), 1.0));
        assert!(approx(normalize_aspect(-18.0), 0.0));
        assert!(approx(normalize_aspect(3.0), 0.5));
        assert_eq!(normalize_aspect(100.0), 1.0);
    }
}
