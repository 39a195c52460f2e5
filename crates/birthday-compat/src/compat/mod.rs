//! Compatibility scoring: sign tables, the two scoring engines, and the
//! statement selector that turns scores into sentences.

pub mod aspects;
pub mod engine;
pub mod longitude;
pub mod overrides;
pub mod score;
pub mod statements;
pub mod sun_sign;
pub mod zodiac;

pub use engine::{
    AxisOutcome, CompatibilityEngine, CompatibilityReport, ScoringMethod, SelfProfile,
};
pub use longitude::{CelestialPosition, PersonSigns};
pub use overrides::{OverrideRule, OverrideTable};
pub use score::{AxisScores, Band, Category, Score, Verdict};
pub use statements::{
    StatementLog, StatementLogError, StatementRecord, StatementSelector, TracingStatementLog,
};
pub use zodiac::{Element, Modality, ZodiacSign};
