use super::template::TokenSet;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const ASTROLOGY_API: &str = "https://api.vedastro.org";
pub const ASTROLOGY_SITE_API: &str = "https://vedastro.org/api";

/// Planet data with ecliptic longitudes, one planet per call.
pub const ALL_PLANET_DATA_JSON: &str = "https://api.vedastro.org/api/AllPlanetData?year=YEAR&month=MONTH&day=DAY&hour=HOUR&minute=MINUTE&lat=LAT&lon=LON&timezone=TZ_MINUTES&planet=PLANET&format=json";

pub const SUN_SIGN: &str = "https://api.vedastro.org/Person/SunSign?location=LAT,LON&time=YEAR-MONTH-DAYTHOUR:MINUTE:00+TZ_MINUTES";

pub const MOON_SIGN: &str = "https://api.vedastro.org/Person/MoonSign?location=LAT,LON&time=YEAR-MONTH-DAYTHOUR:MINUTE:00+TZ_MINUTES";

/// Local birth date and time at a place, with the place's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub lat: f64,
    pub lon: f64,
    pub tz_minutes: i32,
}

impl BirthMoment {
    pub fn tokens(&self, planet: &str) -> TokenSet {
        TokenSet::new()
            .with("YEAR", self.date.year())
            .with("MONTH", self.date.month())
            .with("DAY", self.date.day())
            .with("HOUR", self.time.hour())
            .with("MINUTE", self.time.minute())
            .with("LAT", self.lat)
            .with("LON", self.lon)
            .with("TZ_MINUTES", self.tz_minutes)
            .with("PLANET", planet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::template::fill;

    fn saloni() -> BirthMoment {
        BirthMoment {
            date: NaiveDate::from_ymd_opt(1998, 8, 21).expect("date"),
            time: NaiveTime::from_hms_opt(18, 30, 0).expect("time"),
            lat: 19.076,
            lon: 72.877,
            tz_minutes: 330,
        }
    }

    #[test]
    fn planet_data_url_is_fully_filled() {
        let url = fill(ALL_PLANET_DATA_JSON, &saloni().tokens("Sun")).expect("fill");
        assert_eq!(
            url,
            "https://api.vedastro.org/api/AllPlanetData?year=1998&month=8&day=21&hour=18&minute=30&lat=19.076&lon=72.877&timezone=330&planet=Sun&format=json"
        );
    }

    #[test]
    fn sign_endpoints_keep_the_glued_day_hour_token() {
        let url = fill(SUN_SIGN, &saloni().tokens("Sun")).expect("fill");
        assert_eq!(
            url,
            "https://api.vedastro.org/Person/SunSign?location=19.076,72.877&time=1998-8-DAYTHOUR:30:00+330"
        );
        assert!(fill(MOON_SIGN, &saloni().tokens("Moon"))
            .expect("fill")
            .starts_with(ASTROLOGY_API));
    }
}
