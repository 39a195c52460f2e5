use super::longitude::{self, PersonSigns};
use super::overrides::OverrideTable;
use super::score::{verdict, AxisScores, Band, Category, Score, Verdict};
use super::statements::{StatementLog, StatementSelector};
use super::sun_sign::{apply_name_nudges, score_from_sun};
use super::zodiac::{sun_sign_for, ZodiacSign};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_OTHER_NAME: &str = "You";

/// The person every comparison is made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfProfile {
    pub name: String,
    pub sun_sign: ZodiacSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    SunSign,
    Longitude,
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisOutcome {
    pub score: Score,
    pub band: Band,
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub self_name: String,
    pub other_name: String,
    pub self_sun: Option<ZodiacSign>,
    pub other_sun: Option<ZodiacSign>,
    pub method: ScoringMethod,
    pub override_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub romantic: Option<AxisOutcome>,
    pub friendship: AxisOutcome,
    pub work: AxisOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<Verdict>,
}

impl CompatibilityReport {
    /// All three axes, when a romantic score was produced.
    pub fn scores(&self) -> Option<AxisScores> {
        self.romantic.as_ref().map(|romantic| AxisScores {
            romantic: romantic.score,
            friendship: self.friendship.score,
            work: self.work.score,
        })
    }
}

/// Ties the scoring engines, the override table, and the statement selector
/// together for one configured profile.
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    profile: SelfProfile,
    overrides: OverrideTable,
    selector: StatementSelector,
}

impl CompatibilityEngine {
    pub fn new(profile: SelfProfile, overrides: OverrideTable, log: Arc<dyn StatementLog>) -> Self {
        Self {
            profile,
            overrides,
            selector: StatementSelector::new(log),
        }
    }

    pub fn profile(&self) -> &SelfProfile {
        &self.profile
    }

    /// Sun-sign comparison from a calendar birth date.
    pub fn match_by_birth_date(&self, other_name: &str, birth_date: NaiveDate) -> CompatibilityReport {
        let display_name = display_name(other_name);
        let other_sun = sun_sign_for(birth_date.month(), birth_date.day());

        let (scores, method) = match self.overrides.lookup(other_name, birth_date) {
            Some(scores) => {
                debug!(%birth_date, "override table matched");
                (scores, ScoringMethod::Override)
            }
            None => {
                let base = score_from_sun(self.profile.sun_sign, other_sun);
                (apply_name_nudges(base, other_name), ScoringMethod::SunSign)
            }
        };

        let key_root = format!("{display_name}|{birth_date}");
        let romantic = self.outcome(Category::Romantic, scores.romantic, &display_name, &key_root);
        let friendship =
            self.outcome(Category::Friendship, scores.friendship, &display_name, &key_root);
        let work = self.outcome(Category::Work, scores.work, &display_name, &key_root);

        CompatibilityReport {
            self_name: self.profile.name.clone(),
            other_name: display_name,
            self_sun: Some(self.profile.sun_sign),
            other_sun: Some(other_sun),
            method,
            override_applied: method == ScoringMethod::Override,
            romantic: Some(romantic),
            friendship,
            work,
            overall: Some(verdict(&scores)),
        }
    }

    /// Longitude comparison. Only friendship and work come from positions; a
    /// romantic score is carried over when the caller already has one.
    pub fn match_by_positions(
        &self,
        self_signs: &PersonSigns,
        other_signs: &PersonSigns,
        other_name: &str,
        romantic: Option<Score>,
    ) -> CompatibilityReport {
        let display_name = display_name(other_name);
        let friendship_score = longitude::friendship(self_signs, other_signs);
        let work_score = longitude::work(self_signs, other_signs);

        let friendship =
            self.outcome(Category::Friendship, friendship_score, &display_name, &display_name);
        let work = self.outcome(Category::Work, work_score, &display_name, &display_name);
        let romantic = romantic
            .map(|score| self.outcome(Category::Romantic, score, &display_name, &display_name));

        let overall = romantic.as_ref().map(|romantic| {
            verdict(&AxisScores {
                romantic: romantic.score,
                friendship: friendship_score,
                work: work_score,
            })
        });

        CompatibilityReport {
            self_name: self.profile.name.clone(),
            other_name: display_name,
            self_sun: self_signs.sun.sign,
            other_sun: other_signs.sun.sign,
            method: ScoringMethod::Longitude,
            override_applied: false,
            romantic,
            friendship,
            work,
            overall,
        }
    }

    fn outcome(
        &self,
        category: Category,
        score: Score,
        other_name: &str,
        key_root: &str,
    ) -> AxisOutcome {
        let pick = self
            .selector
            .select(category, score, &self.profile.name, other_name, key_root);
        AxisOutcome {
            score,
            band: pick.band,
            statement: pick.text,
        }
    }
}

fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_OTHER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::longitude::CelestialPosition;
    use crate::compat::statements::NullStatementLog;

    fn engine() -> CompatibilityEngine {
        CompatibilityEngine::new(
            SelfProfile {
                name: "Saloni".to_string(),
                sun_sign: ZodiacSign::Leo,
            },
            OverrideTable::builtin(),
            Arc::new(NullStatementLog),
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn blank_names_fall_back_to_you() {
        let report = engine().match_by_birth_date("   ", date(1999, 7, 28));
        assert_eq!(report.other_name, "You");
        assert_eq!(report.other_sun, Some(ZodiacSign::Leo));
        assert!(report
            .romantic
            .as_ref()
            .expect("romantic present")
            .statement
            .contains("You"));
    }

    #[test]
    fn override_beats_the_baseline() {
        let report = engine().match_by_birth_date("Jai", date(2000, 11, 4));
        assert_eq!(report.method, ScoringMethod::Override);
        assert!(report.override_applied);
        let scores = report.scores().expect("all axes");
        assert_eq!(scores, AxisScores::uniform(Score::MAX));
        assert_eq!(report.overall.expect("overall").label, "Good");
    }

    #[test]
    fn positions_without_romance_skip_the_overall_verdict() {
        let signs = PersonSigns {
            sun: CelestialPosition::new(ZodiacSign::Leo, 130.0),
            moon: CelestialPosition::new(ZodiacSign::Cancer, 100.0),
        };
        let other = PersonSigns {
            sun: CelestialPosition::new(ZodiacSign::Sagittarius, 250.0),
            moon: CelestialPosition::new(ZodiacSign::Pisces, 340.0),
        };

        let report = engine().match_by_positions(&signs, &other, "Riya", None);
        assert_eq!(report.method, ScoringMethod::Longitude);
        assert!(report.romantic.is_none());
        assert!(report.overall.is_none());
        assert_eq!(report.friendship.score.value(), 91);
        assert_eq!(report.work.band, Band::Normal);

        let with_romance =
            engine().match_by_positions(&signs, &other, "Riya", Some(Score::from_i32(80)));
        assert!(with_romance.overall.is_some());
    }
}
