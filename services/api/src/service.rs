use birthday_compat::compat::{CompatibilityEngine, CompatibilityReport, PersonSigns, Score};
use birthday_compat::error::AppError;
use birthday_compat::upstream::{BirthMoment, ChartFetcher};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Request-level orchestration over the engine and the chart fetcher.
pub(crate) struct CompatService {
    engine: CompatibilityEngine,
    charts: ChartFetcher,
    self_birth: BirthMoment,
}

impl CompatService {
    pub(crate) fn new(
        engine: CompatibilityEngine,
        charts: ChartFetcher,
        self_birth: BirthMoment,
    ) -> Self {
        Self {
            engine,
            charts,
            self_birth,
        }
    }

    pub(crate) fn sun_match(&self, name: &str, birth_date: NaiveDate) -> CompatibilityReport {
        self.engine.match_by_birth_date(name, birth_date)
    }

    /// Uses the caller's self chart when given, otherwise the configured one.
    pub(crate) async fn positions_match(
        &self,
        name: &str,
        self_signs: Option<PersonSigns>,
        other_signs: PersonSigns,
        romantic: Option<Score>,
    ) -> Result<CompatibilityReport, AppError> {
        let self_signs = match self_signs {
            Some(signs) => signs,
            None => self.charts.fetch_signs(&self.self_birth).await?.ok_or_else(|| {
                AppError::input("self_signs are required: the configured chart is unavailable")
            })?,
        };

        Ok(self
            .engine
            .match_by_positions(&self_signs, &other_signs, name, romantic))
    }

    /// Longitude report when both charts resolve, sun-sign report otherwise.
    /// The sun-sign romantic score is carried into the longitude report, and
    /// an override skips the fetch entirely.
    pub(crate) async fn chart_match(
        &self,
        name: &str,
        birth: &BirthMoment,
    ) -> Result<CompatibilityReport, AppError> {
        let sun_report = self.sun_match(name, birth.date);
        if sun_report.override_applied {
            return Ok(sun_report);
        }

        let (self_signs, other_signs) = tokio::try_join!(
            self.charts.fetch_signs(&self.self_birth),
            self.charts.fetch_signs(birth),
        )?;

        match (self_signs, other_signs) {
            (Some(self_signs), Some(other_signs)) => {
                info!(date = %birth.date, "chart match scored from positions");
                let romantic = sun_report.romantic.as_ref().map(|axis| axis.score);
                Ok(self
                    .engine
                    .match_by_positions(&self_signs, &other_signs, name, romantic))
            }
            _ => {
                warn!(date = %birth.date, "chart payloads unusable, using sun signs");
                Ok(sun_report)
            }
        }
    }
}
