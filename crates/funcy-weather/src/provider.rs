//! Daily forecast retrieval from the Open-Meteo forecast API.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{ForecastSet, Place, WeatherError};

/// Field selector sent as `daily=`.
pub const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<NaiveDate>,
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

impl DailyData {
    fn into_forecast(self) -> Result<ForecastSet, WeatherError> {
        ForecastSet::new(
            self.time,
            self.weathercode,
            self.temperature_2m_max,
            self.temperature_2m_min,
        )
    }
}

/// Fetches the daily forecast for a resolved place.
///
/// The horizon is whatever the service returns by default (currently 7 days).
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    url: String,
}

impl ForecastFetcher {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<ForecastSet, WeatherError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("timezone", timezone.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let parsed: ForecastResponse = serde_json::from_slice(&body)?;
        let daily = parsed
            .daily
            .ok_or_else(|| WeatherError::Parse("response has no daily section".to_string()))?;

        let forecast = daily.into_forecast()?;
        tracing::debug!("Received {} forecast days", forecast.len());
        Ok(forecast)
    }

    pub async fn fetch_for(&self, place: &Place) -> Result<ForecastSet, WeatherError> {
        self.fetch(place.latitude, place.longitude, &place.timezone)
            .await
    }
}
