//! Zodiac compatibility scoring for the birthday site, plus the allow-listed
//! gateway to the astrology and geocoding services it draws data from.

pub mod compat;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod upstream;
