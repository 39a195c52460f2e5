use crate::compat::{SelfProfile, ZodiacSign};
use crate::upstream::endpoints::{BirthMoment, ASTROLOGY_API, ASTROLOGY_SITE_API};
use chrono::{NaiveDate, NaiveTime};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_GEOCODE_URL: &str =
    "https://nominatim.openstreetmap.org/search?format=json&limit=1&addressdetails=1&q=";
const DEFAULT_USER_AGENT: &str = "birthday-compat/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub upstream: UpstreamConfig,
    pub profile: ProfileConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: !environment.is_production(),
            },
            upstream: UpstreamConfig::from_env()?,
            profile: ProfileConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where upstream calls may go and how long they may take.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub allowed_prefixes: Vec<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub geocode_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: vec![ASTROLOGY_API.to_string(), ASTROLOGY_SITE_API.to_string()],
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
        }
    }
}

impl UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let allowed_prefixes = match env::var("UPSTREAM_ALLOWED_PREFIXES") {
            Ok(raw) => {
                let prefixes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string)
                    .collect();
                if prefixes.is_empty() {
                    return Err(ConfigError::EmptyAllowList);
                }
                prefixes
            }
            Err(_) => defaults.allowed_prefixes,
        };

        let timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            allowed_prefixes,
            timeout,
            user_agent: env::var("UPSTREAM_USER_AGENT").unwrap_or(defaults.user_agent),
            geocode_url: env::var("GEOCODE_URL").unwrap_or(defaults.geocode_url),
        })
    }
}

/// The site owner: the fixed side of every comparison.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub name: String,
    pub sun_sign: ZodiacSign,
    pub birth: BirthMoment,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Saloni".to_string(),
            sun_sign: ZodiacSign::Leo,
            birth: BirthMoment {
                date: NaiveDate::from_ymd_opt(1998, 8, 21).unwrap_or_default(),
                time: NaiveTime::from_hms_opt(18, 30, 0).unwrap_or_default(),
                lat: 19.076,
                lon: 72.877,
                tz_minutes: 330,
            },
        }
    }
}

impl ProfileConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let name = env::var("SELF_NAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or(defaults.name);

        let sun_sign = match env::var("SELF_SUN_SIGN") {
            Ok(raw) => ZodiacSign::parse(&raw).ok_or(ConfigError::InvalidSign { value: raw })?,
            Err(_) => defaults.sun_sign,
        };

        let date = match env::var("SELF_BIRTH_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ConfigError::InvalidBirthDate { value: raw })?,
            Err(_) => defaults.birth.date,
        };

        let time = match env::var("SELF_BIRTH_TIME") {
            Ok(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                .map_err(|_| ConfigError::InvalidBirthTime { value: raw })?,
            Err(_) => defaults.birth.time,
        };

        Ok(Self {
            name,
            sun_sign,
            birth: BirthMoment {
                date,
                time,
                lat: parse_number("SELF_LAT", defaults.birth.lat)?,
                lon: parse_number("SELF_LON", defaults.birth.lon)?,
                tz_minutes: parse_number("SELF_TZ_MINUTES", defaults.birth.tz_minutes)?,
            },
        })
    }

    pub fn self_profile(&self) -> SelfProfile {
        SelfProfile {
            name: self.name.clone(),
            sun_sign: self.sun_sign,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    EmptyAllowList,
    InvalidSign { value: String },
    InvalidBirthDate { value: String },
    InvalidBirthTime { value: String },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "UPSTREAM_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::EmptyAllowList => {
                write!(f, "UPSTREAM_ALLOWED_PREFIXES must name at least one prefix")
            }
            ConfigError::InvalidSign { value } => {
                write!(f, "SELF_SUN_SIGN '{value}' is not a zodiac sign")
            }
            ConfigError::InvalidBirthDate { value } => {
                write!(f, "SELF_BIRTH_DATE '{value}' must be YYYY-MM-DD")
            }
            ConfigError::InvalidBirthTime { value } => {
                write!(f, "SELF_BIRTH_TIME '{value}' must be HH:MM")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} '{value}' is not a valid number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
