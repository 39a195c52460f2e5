use super::score::{AxisScores, Score};
use chrono::NaiveDate;

/// Fixed result for a specific name and birth date combination.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    /// Lowercased, trimmed names that trigger the rule.
    pub names: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub scores: AxisScores,
}

impl OverrideRule {
    pub fn matches(&self, name: &str, birth_date: NaiveDate) -> bool {
        let wanted = name.trim().to_lowercase();
        self.names.iter().any(|candidate| *candidate == wanted) && self.dates.contains(&birth_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    rules: Vec<OverrideRule>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped table. The date is accepted in both day/month orders since
    /// the original form did not pin a locale.
    pub fn builtin() -> Self {
        let dates = [(2000, 11, 4), (2000, 4, 11)]
            .into_iter()
            .filter_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .collect();

        Self::empty().with_rule(OverrideRule {
            names: vec!["jai".to_string(), "jai joshi".to_string()],
            dates,
            scores: AxisScores::uniform(Score::MAX),
        })
    }

    pub fn with_rule(mut self, mut rule: OverrideRule) -> Self {
        for name in &mut rule.names {
            *name = name.trim().to_lowercase();
        }
        self.rules.push(rule);
        self
    }

    pub fn lookup(&self, name: &str, birth_date: NaiveDate) -> Option<AxisScores> {
        self.rules
            .iter()
            .find(|rule| rule.matches(name, birth_date))
            .map(|rule| rule.scores)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
