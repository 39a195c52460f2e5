use super::UpstreamError;
use crate::config::UpstreamConfig;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// URL prefixes that may be forwarded upstream. A URL matches a prefix when
/// scheme, host and port are equal and its path sits under the prefix path.
/// Prefixes that do not parse as URLs match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    prefixes: Vec<String>,
    origins: Vec<Url>,
}

impl AllowList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        let origins = prefixes
            .iter()
            .filter_map(|prefix| Url::parse(prefix).ok())
            .collect();
        Self { prefixes, origins }
    }

    pub fn permits(&self, url: &str) -> bool {
        let Ok(candidate) = Url::parse(url) else {
            return false;
        };
        if !candidate.username().is_empty() || candidate.password().is_some() {
            return false;
        }

        self.origins.iter().any(|allowed| {
            allowed.scheme() == candidate.scheme()
                && allowed.host_str() == candidate.host_str()
                && allowed.port_or_known_default() == candidate.port_or_known_default()
                && path_within(allowed.path(), candidate.path())
        })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// First geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// HTTP access to the astrology provider and the geocoder. One timeout per
/// request, no retries.
#[derive(Debug, Clone)]
pub struct UpstreamGateway {
    client: reqwest::Client,
    allow_list: AllowList,
    geocode_url: String,
}

impl UpstreamGateway {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            allow_list: AllowList::new(config.allowed_prefixes.iter().cloned()),
            geocode_url: config.geocode_url.clone(),
        })
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Fetches `url` as text. Non-2xx statuses are returned, not raised, so
    /// the proxy can pass them through.
    pub async fn fetch_text(&self, url: &str) -> Result<UpstreamResponse, UpstreamError> {
        if !self.allow_list.permits(url) {
            return Err(UpstreamError::Disallowed {
                url: url.to_string(),
            });
        }

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, url, bytes = body.len(), "upstream fetch finished");

        Ok(UpstreamResponse { status, body })
    }

    pub async fn geocode(&self, query: &str) -> Result<GeoMatch, UpstreamError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(UpstreamError::NotFound {
                query: String::new(),
            });
        }

        let url = format!("{}{}", self.geocode_url, urlencoding::encode(query));
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        let hit = payload
            .as_array()
            .and_then(|hits| hits.first())
            .ok_or_else(|| UpstreamError::NotFound {
                query: query.to_string(),
            })?;

        parse_hit(hit)
    }
}

/// Segment-wise prefix match, so `/api` covers `/api/x` but not `/apix`.
fn path_within(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    prefix.is_empty()
        || path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn parse_hit(hit: &Value) -> Result<GeoMatch, UpstreamError> {
    let coordinate = |key: &str| {
        let parsed = match hit.get(key) {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| UpstreamError::Decode(format!("geocode hit has no numeric {key}")))
    };

    Ok(GeoMatch {
        lat: coordinate("lat")?,
        lon: coordinate("lon")?,
        display_name: hit
            .get("display_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}
