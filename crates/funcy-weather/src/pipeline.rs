//! Location-to-forecast resolution.
//!
//! Errors stop here: they are logged and folded into a [`LookupOutcome`].

use std::time::Duration;

use funcy_core::WeatherConfig;
use reqwest::Client;

use crate::geocode::Resolver;
use crate::provider::ForecastFetcher;
use crate::types::{ForecastSet, Place, Query, WeatherError};

const USER_AGENT: &str = concat!("funcy/", env!("CARGO_PKG_VERSION"));

/// Display-ready result of one lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Both requests succeeded.
    Resolved { place: Place, forecast: ForecastSet },
    /// Geocoding succeeded, the forecast did not.
    ForecastUnavailable { place: Place },
    /// Nothing to show: not found, or geocoding failed.
    Failed,
}

impl LookupOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Resolver followed by forecast fetch, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct WeatherPipeline {
    resolver: Resolver,
    forecasts: ForecastFetcher,
}

impl WeatherPipeline {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self::with_client(
            client,
            &config.geocoding_url,
            &config.forecast_url,
        ))
    }

    pub fn with_client(client: Client, geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            resolver: Resolver::new(client.clone(), geocoding_url),
            forecasts: ForecastFetcher::new(client, forecast_url),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn forecasts(&self) -> &ForecastFetcher {
        &self.forecasts
    }

    /// Run both requests in order. Never fails; see [`LookupOutcome`].
    pub async fn lookup(&self, query: &Query) -> LookupOutcome {
        let place = match self.resolver.resolve(query).await {
            Ok(place) => place,
            Err(WeatherError::LocationNotFound(q)) => {
                tracing::warn!("Location not found: {}", q);
                return LookupOutcome::Failed;
            }
            Err(e) => {
                tracing::error!("Geocoding {:?} failed: {}", query.as_str(), e);
                return LookupOutcome::Failed;
            }
        };

        match self.forecasts.fetch_for(&place).await {
            Ok(forecast) => {
                tracing::info!(
                    "Resolved {:?} to {}, {} with {} forecast days",
                    query.as_str(),
                    place.name,
                    place.country,
                    forecast.len()
                );
                LookupOutcome::Resolved { place, forecast }
            }
            Err(e) => {
                tracing::error!("Forecast for {} failed: {}", place.name, e);
                LookupOutcome::ForecastUnavailable { place }
            }
        }
    }
}
