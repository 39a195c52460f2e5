use crate::infra::{parse_date, AppState};
use crate::service::CompatService;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use birthday_compat::compat::{
    CelestialPosition, CompatibilityReport, PersonSigns, Score, ZodiacSign,
};
use birthday_compat::error::AppError;
use birthday_compat::upstream::{upstream_router, BirthMoment, UpstreamGateway};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_BIRTH_TIME: &str = "12:00";

#[derive(Debug, Deserialize)]
pub(crate) struct SunMatchRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) birth_date: Option<String>,
}

/// Sign text is optional; an unrecognized sign is kept as unknown.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PositionInput {
    #[serde(default)]
    pub(crate) sign: Option<String>,
    pub(crate) longitude: f64,
}

impl PositionInput {
    fn into_position(self) -> CelestialPosition {
        match self.sign {
            Some(text) => CelestialPosition {
                sign: ZodiacSign::parse(&text),
                longitude: self.longitude,
            },
            None => CelestialPosition::at_longitude(self.longitude),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignsInput {
    pub(crate) sun: PositionInput,
    pub(crate) moon: PositionInput,
}

impl SignsInput {
    fn into_signs(self) -> PersonSigns {
        PersonSigns {
            sun: self.sun.into_position(),
            moon: self.moon.into_position(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PositionsRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) self_signs: Option<SignsInput>,
    pub(crate) other_signs: SignsInput,
    #[serde(default)]
    pub(crate) romantic: Option<Score>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BirthInput {
    #[serde(default)]
    pub(crate) birth_date: Option<String>,
    #[serde(default)]
    pub(crate) birth_time: Option<String>,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
    pub(crate) tz_minutes: i32,
}

impl BirthInput {
    fn into_moment(self) -> Result<BirthMoment, AppError> {
        let date = required_date(self.birth_date.as_deref())?;
        let raw_time = self.birth_time.as_deref().unwrap_or(DEFAULT_BIRTH_TIME).trim();
        let time = NaiveTime::parse_from_str(raw_time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw_time, "%H:%M:%S"))
            .map_err(|_| AppError::input(format!("birth_time '{raw_time}' must be HH:MM")))?;

        Ok(BirthMoment {
            date,
            time,
            lat: self.lat,
            lon: self.lon,
            tz_minutes: self.tz_minutes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartRequest {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) birth: BirthInput,
}

fn required_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::input("birth_date is required (YYYY-MM-DD)"))?;
    parse_date(raw).map_err(AppError::Input)
}

pub(crate) fn with_compat_routes(
    service: Arc<CompatService>,
    gateway: Arc<UpstreamGateway>,
) -> Router {
    Router::new()
        .route("/api/v1/compat/sun", post(sun_endpoint))
        .route("/api/v1/compat/positions", post(positions_endpoint))
        .route("/api/v1/compat/chart", post(chart_endpoint))
        .with_state(service)
        .merge(upstream_router(gateway))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn sun_endpoint(
    State(service): State<Arc<CompatService>>,
    Json(payload): Json<SunMatchRequest>,
) -> Result<Json<CompatibilityReport>, AppError> {
    let birth_date = required_date(payload.birth_date.as_deref())?;
    Ok(Json(service.sun_match(&payload.name, birth_date)))
}

pub(crate) async fn positions_endpoint(
    State(service): State<Arc<CompatService>>,
    Json(payload): Json<PositionsRequest>,
) -> Result<Json<CompatibilityReport>, AppError> {
    let PositionsRequest {
        name,
        self_signs,
        other_signs,
        romantic,
    } = payload;

    let report = service
        .positions_match(
            &name,
            self_signs.map(SignsInput::into_signs),
            other_signs.into_signs(),
            romantic,
        )
        .await?;
    Ok(Json(report))
}

pub(crate) async fn chart_endpoint(
    State(service): State<Arc<CompatService>>,
    Json(payload): Json<ChartRequest>,
) -> Result<Json<CompatibilityReport>, AppError> {
    let birth = payload.birth.into_moment()?;
    let report = service.chart_match(&payload.name, &birth).await?;
    Ok(Json(report))
}
