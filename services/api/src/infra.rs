use birthday_compat::compat::{CompatibilityEngine, OverrideTable, StatementLog};
use birthday_compat::config::ProfileConfig;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
#[cfg(test)]
use birthday_compat::compat::{StatementLogError, StatementRecord};
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process statement log for tests. Later picks under the same key replace
/// earlier ones.
#[cfg(test)]
#[derive(Default, Clone)]
pub(crate) struct MemoryStatementLog {
    records: Arc<Mutex<HashMap<String, StatementRecord>>>,
}

#[cfg(test)]
impl StatementLog for MemoryStatementLog {
    fn record(&self, key: &str, record: StatementRecord) -> Result<(), StatementLogError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StatementLogError::Unavailable("statement log mutex poisoned".into()))?;
        guard.insert(key.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
impl MemoryStatementLog {
    pub(crate) fn get(&self, key: &str) -> Option<StatementRecord> {
        self.records
            .lock()
            .expect("statement log mutex poisoned")
            .get(key)
            .copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("statement log mutex poisoned").len()
    }
}

pub(crate) fn build_engine(
    profile: &ProfileConfig,
    log: Arc<dyn StatementLog>,
) -> CompatibilityEngine {
    CompatibilityEngine::new(profile.self_profile(), OverrideTable::builtin(), log)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_the_latest_pick_per_key() {
        let log = MemoryStatementLog::default();
        log.record("stmt:rom:good:A|2000-01-01", StatementRecord { index: 1, score: 90 })
            .expect("record");
        log.record("stmt:rom:good:A|2000-01-01", StatementRecord { index: 3, score: 97 })
            .expect("record");

        assert_eq!(log.len(), 1);
        assert_eq!(
            log.get("stmt:rom:good:A|2000-01-01"),
            Some(StatementRecord { index: 3, score: 97 })
        );
    }

    #[test]
    fn parse_date_reports_the_offending_value() {
        assert_eq!(
            parse_date(" 2001-11-04 "),
            Ok(NaiveDate::from_ymd_opt(2001, 11, 4).expect("date"))
        );
        let err = parse_date("04/11/2001").expect_err("slashes are rejected");
        assert!(err.contains("04/11/2001"));
    }
}
