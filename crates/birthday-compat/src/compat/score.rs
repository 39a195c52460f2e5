use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer compatibility score, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Rounds half away from zero, then clamps. NaN collapses to zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    pub fn from_i32(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Adds a signed adjustment and re-clamps.
    pub fn nudged(self, delta: i32) -> Self {
        Self::from_i32(i32::from(self.0) + delta)
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            Err(format!("score {value} exceeds 100"))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Romantic,
    Friendship,
    Work,
}

impl Category {
    pub const fn ordered() -> [Self; 3] {
        [Self::Romantic, Self::Friendship, Self::Work]
    }

    /// Short tag used for hash suffixes and statement log keys.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Romantic => "rom",
            Self::Friendship => "fri",
            Self::Work => "wrk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Romantic => "Romantic",
            Self::Friendship => "Friendship",
            Self::Work => "Work",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Bad,
    Ok,
    Normal,
    Good,
}

impl Band {
    pub const fn ordered() -> [Self; 4] {
        [Self::Bad, Self::Ok, Self::Normal, Self::Good]
    }

    pub const fn for_score(score: Score) -> Self {
        match score.value() {
            0..=45 => Self::Bad,
            46..=60 => Self::Ok,
            61..=85 => Self::Normal,
            _ => Self::Good,
        }
    }

    /// Inclusive score range covered by the band.
    pub const fn range(self) -> (u8, u8) {
        match self {
            Self::Bad => (0, 45),
            Self::Ok => (46, 60),
            Self::Normal => (61, 85),
            Self::Good => (86, 100),
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Ok => "ok",
            Self::Normal => "normal",
            Self::Good => "good",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bad => "Bad",
            Self::Ok => "Okish",
            Self::Normal => "Normal",
            Self::Good => "Good",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScores {
    pub romantic: Score,
    pub friendship: Score,
    pub work: Score,
}

impl AxisScores {
    pub const fn uniform(score: Score) -> Self {
        Self {
            romantic: score,
            friendship: score,
            work: score,
        }
    }

    pub const fn get(&self, category: Category) -> Score {
        match category {
            Category::Romantic => self.romantic,
            Category::Friendship => self.friendship,
            Category::Work => self.work,
        }
    }
}

/// Weighted blend shown as the overall match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub score: Score,
    pub band: Band,
    pub label: &'static str,
}

pub fn overall_score(scores: &AxisScores) -> Score {
    Score::from_f64(
        f64::from(scores.romantic.value()) * 0.5
            + f64::from(scores.friendship.value()) * 0.3
            + f64::from(scores.work.value()) * 0.2,
    )
}

pub fn verdict(scores: &AxisScores) -> Verdict {
    let score = overall_score(scores);
    let band = Band::for_score(score);
    Verdict {
        score,
        band,
        label: band.label(),
    }
}
