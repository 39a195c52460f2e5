use super::endpoints::{BirthMoment, ALL_PLANET_DATA_JSON, MOON_SIGN, SUN_SIGN};
use super::gateway::UpstreamGateway;
use super::normalizer::normalize;
use super::template::fill;
use super::UpstreamError;
use crate::compat::{CelestialPosition, PersonSigns, ZodiacSign};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches Sun and Moon positions, or bare signs, for a birth moment.
#[derive(Debug, Clone)]
pub struct ChartFetcher {
    gateway: Arc<UpstreamGateway>,
    template: String,
    sun_sign_template: String,
    moon_sign_template: String,
}

impl ChartFetcher {
    pub fn new(gateway: Arc<UpstreamGateway>) -> Self {
        Self {
            gateway,
            template: ALL_PLANET_DATA_JSON.to_string(),
            sun_sign_template: SUN_SIGN.to_string(),
            moon_sign_template: MOON_SIGN.to_string(),
        }
    }

    /// Uses a different planet-data URL template with the same tokens.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Uses different sign-only URL templates.
    pub fn with_sign_templates(
        mut self,
        sun: impl Into<String>,
        moon: impl Into<String>,
    ) -> Self {
        self.sun_sign_template = sun.into();
        self.moon_sign_template = moon.into();
        self
    }

    /// Sun and Moon signs from the sign-only endpoints, without longitudes.
    /// A payload naming no sign, or a sign outside the twelve, yields `None`
    /// for that luminary.
    pub async fn fetch_sun_and_moon_signs(
        &self,
        birth: &BirthMoment,
    ) -> Result<(Option<ZodiacSign>, Option<ZodiacSign>), UpstreamError> {
        tokio::try_join!(
            self.fetch_sign(&self.sun_sign_template, birth, "Sun"),
            self.fetch_sign(&self.moon_sign_template, birth, "Moon"),
        )
    }

    async fn fetch_sign(
        &self,
        template: &str,
        birth: &BirthMoment,
        planet: &str,
    ) -> Result<Option<ZodiacSign>, UpstreamError> {
        let body = self.fetch_body(template, birth, planet).await?;
        let sign = normalize(&body)
            .fields()
            .and_then(|fields| fields.sign)
            .and_then(|text| ZodiacSign::parse(&text));
        if sign.is_none() {
            debug!(planet, "payload carried no usable sign");
        }
        Ok(sign)
    }

    /// `Ok(None)` when the payloads were fetched but carry no usable
    /// longitude; any failed fetch fails the whole chart.
    pub async fn fetch_signs(
        &self,
        birth: &BirthMoment,
    ) -> Result<Option<PersonSigns>, UpstreamError> {
        let (sun, moon) = tokio::try_join!(
            self.fetch_position(birth, "Sun"),
            self.fetch_position(birth, "Moon"),
        )?;

        let signs = match (sun, moon) {
            (Some(sun), Some(moon)) => Some(PersonSigns { sun, moon }),
            _ => None,
        };
        info!(date = %birth.date, resolved = signs.is_some(), "chart fetched");
        Ok(signs)
    }

    pub async fn fetch_position(
        &self,
        birth: &BirthMoment,
        planet: &str,
    ) -> Result<Option<CelestialPosition>, UpstreamError> {
        let body = self.fetch_body(&self.template, birth, planet).await?;
        let position = normalize(&body)
            .fields()
            .and_then(|fields| fields.position());
        if position.is_none() {
            debug!(planet, "payload carried no usable longitude");
        }
        Ok(position)
    }

    async fn fetch_body(
        &self,
        template: &str,
        birth: &BirthMoment,
        planet: &str,
    ) -> Result<String, UpstreamError> {
        let url = fill(template, &birth.tokens(planet))?;
        let response = self.gateway.fetch_text(&url).await?;
        if !response.is_success() {
            return Err(UpstreamError::Status {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}
