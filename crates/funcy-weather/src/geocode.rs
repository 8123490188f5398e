//! Forward geocoding: free-text place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{Place, Query, WeatherError};

/// Used when a match carries no timezone; the forecast API resolves it from coordinates.
const FALLBACK_TIMEZONE: &str = "auto";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

impl GeocodingMatch {
    fn into_place(self) -> Place {
        Place {
            name: self.name,
            country: self.country.unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self
                .timezone
                .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string()),
        }
    }
}

/// Resolves a query to the first geocoding match.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    url: String,
}

impl Resolver {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// First match for `query`. An absent or empty result list is
    /// [`WeatherError::LocationNotFound`]; no ranking happens here.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(&self, query: &Query) -> Result<Place, WeatherError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("name", query.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let parsed: GeocodingResponse = serde_json::from_slice(&body)?;

        let first = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;

        let place = first.into_place();
        tracing::debug!(
            "Geocoded {:?} to {}, {} ({:.4}, {:.4})",
            query.as_str(),
            place.name,
            place.country,
            place.latitude,
            place.longitude
        );
        Ok(place)
    }
}
