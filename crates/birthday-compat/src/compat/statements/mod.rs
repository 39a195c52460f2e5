mod bank;
mod log;

pub use bank::bank_for;
pub use log::{
    NullStatementLog, StatementLog, StatementLogError, StatementRecord, TracingStatementLog,
};

use super::score::{Band, Category, Score};
use regex::{Captures, Regex};
use std::sync::{Arc, OnceLock};
use tracing::debug;

static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();

/// Position inside the bank: low scores in a band pick early sentences, high
/// scores pick late ones.
pub fn statement_index(score: Score, band: Band, bank_len: usize) -> usize {
    if bank_len <= 1 {
        return 0;
    }

    let (low, high) = band.range();
    let span = f64::from(high - low);
    let offset = f64::from(score.value()) - f64::from(low);
    let position = (offset / span).clamp(0.0, 0.999);
    (position * bank_len as f64).floor() as usize
}

/// Literal substitution of `{A}` and `{B}` in one pass, so placeholders
/// inside either name are left as written.
pub fn render(template: &str, self_name: &str, other_name: &str) -> String {
    let Some(placeholder) = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{[AB]\}").ok())
        .as_ref()
    else {
        return template.to_string();
    };

    placeholder
        .replace_all(template, |caps: &Captures<'_>| match &caps[0] {
            "{A}" => self_name.to_string(),
            _ => other_name.to_string(),
        })
        .into_owned()
}

/// Sentence chosen for one axis, plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementPick {
    pub band: Band,
    pub index: usize,
    pub text: String,
}

pub fn pick_statement(
    category: Category,
    score: Score,
    self_name: &str,
    other_name: &str,
) -> StatementPick {
    let band = Band::for_score(score);
    let bank = bank_for(category, band);
    let index = statement_index(score, band, bank.len());

    StatementPick {
        band,
        index,
        text: render(bank[index], self_name, other_name),
    }
}

pub fn log_key(category: Category, band: Band, key_root: &str) -> String {
    format!("stmt:{}:{}:{}", category.tag(), band.key(), key_root)
}

/// Picks statements and reports each pick to a write-only log.
#[derive(Clone)]
pub struct StatementSelector {
    log: Arc<dyn StatementLog>,
}

impl StatementSelector {
    pub fn new(log: Arc<dyn StatementLog>) -> Self {
        Self { log }
    }

    pub fn without_log() -> Self {
        Self::new(Arc::new(NullStatementLog))
    }

    pub fn select(
        &self,
        category: Category,
        score: Score,
        self_name: &str,
        other_name: &str,
        key_root: &str,
    ) -> StatementPick {
        let pick = pick_statement(category, score, self_name, other_name);
        let key = log_key(category, pick.band, key_root);
        let record = StatementRecord {
            index: pick.index,
            score: score.value(),
        };

        if let Err(err) = self.log.record(&key, record) {
            debug!(%key, error = %err, "statement log write skipped");
        }

        pick
    }
}

impl std::fmt::Debug for StatementSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementSelector").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        entries: Mutex<Vec<(String, StatementRecord)>>,
    }

    impl StatementLog for RecordingLog {
        fn record(&self, key: &str, record: StatementRecord) -> Result<(), StatementLogError> {
            self.entries
                .lock()
                .expect("log mutex poisoned")
                .push((key.to_string(), record));
            Ok(())
        }
    }

    struct BrokenLog;

    impl StatementLog for BrokenLog {
        fn record(&self, _key: &str, _record: StatementRecord) -> Result<(), StatementLogError> {
            Err(StatementLogError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn index_walks_through_the_band() {
        let score = |value| Score::from_i32(value);
        assert_eq!(statement_index(score(0), Band::Bad, 5), 0);
        assert_eq!(statement_index(score(45), Band::Bad, 5), 4);
        assert_eq!(statement_index(score(46), Band::Ok, 5), 0);
        assert_eq!(statement_index(score(53), Band::Ok, 5), 2);
        assert_eq!(statement_index(score(60), Band::Ok, 5), 4);
        assert_eq!(statement_index(score(100), Band::Good, 5), 4);
        assert_eq!(statement_index(score(73), Band::Normal, 1), 0);
    }

    #[test]
    fn index_is_monotonic_within_each_band() {
        for band in Band::ordered() {
            let (low, high) = band.range();
            let mut previous = 0;
            for value in low..=high {
                let index = statement_index(Score::from_i32(value.into()), band, 5);
                assert!(index >= previous);
                assert!(index < 5);
                previous = index;
            }
        }
    }

    #[test]
    fn render_substitutes_every_placeholder_once() {
        let text = render("{A} and {B}; {B} with {A}", "Saloni", "{A}");
        assert_eq!(text, "Saloni and {A}; {A} with Saloni");

        let text = render("{A} and {B}", "{B}", "Riya");
        assert_eq!(text, "{B} and Riya");
    }

    #[test]
    fn pick_is_deterministic_and_names_are_substituted() {
        let score = Score::from_i32(91);
        let first = pick_statement(Category::Friendship, score, "Saloni", "Riya");
        let second = pick_statement(Category::Friendship, score, "Saloni", "Riya");
        assert_eq!(first, second);
        assert_eq!(first.band, Band::Good);
        assert_eq!(first.index, 1);
        assert_eq!(
            first.text,
            "Saloni and Riya lift each other’s week with jokes and straight answers."
        );
    }

    #[test]
    fn every_score_and_category_yields_a_sentence() {
        for category in Category::ordered() {
            for value in 0..=100 {
                let pick = pick_statement(category, Score::from_i32(value), "A", "B");
                assert!(!pick.text.is_empty());
                assert!(!pick.text.contains("{A}") && !pick.text.contains("{B}"));
            }
        }
    }

    #[test]
    fn selector_records_picks_under_namespaced_keys() {
        let log = Arc::new(RecordingLog::default());
        let selector = StatementSelector::new(log.clone());

        let pick = selector.select(
            Category::Work,
            Score::from_i32(30),
            "Saloni",
            "Riya",
            "Riya|2001-02-03",
        );

        let entries = log.entries.lock().expect("log mutex poisoned");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "stmt:wrk:bad:Riya|2001-02-03");
        assert_eq!(
            entries[0].1,
            StatementRecord {
                index: pick.index,
                score: 30
            }
        );
    }

    #[test]
    fn selector_output_ignores_log_failures() {
        let broken = StatementSelector::new(Arc::new(BrokenLog));
        let silent = StatementSelector::without_log();

        let from_broken = broken.select(Category::Romantic, Score::from_i32(58), "A", "B", "k");
        let from_silent = silent.select(Category::Romantic, Score::from_i32(58), "A", "B", "k");
        assert_eq!(from_broken, from_silent);
    }

    #[test]
    fn record_serializes_with_short_index_key() {
        let json = serde_json::to_value(StatementRecord { index: 3, score: 88 }).expect("json");
        assert_eq!(json, serde_json::json!({ "idx": 3, "score": 88 }));
    }
}
