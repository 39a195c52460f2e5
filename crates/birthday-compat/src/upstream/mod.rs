//! Boundary to the third-party astrology and geocoding services.

pub mod chart;
pub mod endpoints;
pub mod gateway;
pub mod normalizer;
pub mod router;
pub mod template;

pub use chart::ChartFetcher;
pub use endpoints::BirthMoment;
pub use gateway::{AllowList, GeoMatch, UpstreamGateway, UpstreamResponse};
pub use normalizer::{normalize, NormalizedFields, NormalizedPayload};
pub use router::upstream_router;
pub use template::{fill, TemplateError, TokenSet, TokenValue};

use thiserror::Error;

/// One categorized failure per upstream call. Nothing is retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("url is not on the upstream allow-list: {url}")]
    Disallowed { url: String },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with status {status}")]
    Status { status: u16 },
    #[error("no match for '{query}'")]
    NotFound { query: String },
    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
}
