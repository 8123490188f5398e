use chrono::NaiveDate;
use funcy_core::{NetworkError, ReqwestErrorExt};
use serde::{Deserialize, Serialize};

/// Queries shorter than this never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;

/// A location search string long enough to be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Returns `None` for input of two characters or fewer.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. `Europe/Berlin`
    pub timezone: String,
}

/// Daily forecast as aligned sequences indexed by day offset (0 = today).
///
/// All four sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSet {
    dates: Vec<NaiveDate>,
    weather_codes: Vec<i32>,
    temp_max: Vec<f64>,
    temp_min: Vec<f64>,
}

impl ForecastSet {
    pub fn new(
        dates: Vec<NaiveDate>,
        weather_codes: Vec<i32>,
        temp_max: Vec<f64>,
        temp_min: Vec<f64>,
    ) -> Result<Self, WeatherError> {
        let days = dates.len();
        if weather_codes.len() != days || temp_max.len() != days || temp_min.len() != days {
            return Err(WeatherError::MisalignedForecast {
                dates: days,
                weather_codes: weather_codes.len(),
                temp_max: temp_max.len(),
                temp_min: temp_min.len(),
            });
        }

        Ok(Self {
            dates,
            weather_codes,
            temp_max,
            temp_min,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn weather_codes(&self) -> &[i32] {
        &self.weather_codes
    }

    pub fn temp_max(&self) -> &[f64] {
        &self.temp_max
    }

    pub fn temp_min(&self) -> &[f64] {
        &self.temp_min
    }

    pub fn day(&self, offset: usize) -> Option<DailySummary> {
        Some(DailySummary {
            offset,
            date: *self.dates.get(offset)?,
            weather_code: *self.weather_codes.get(offset)?,
            temp_max: *self.temp_max.get(offset)?,
            temp_min: *self.temp_min.get(offset)?,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DailySummary> + '_ {
        (0..self.len()).filter_map(|offset| self.day(offset))
    }
}

/// One row of a [`ForecastSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub offset: usize,
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max: f64,
    pub temp_min: f64,
}

impl DailySummary {
    pub fn is_today(&self) -> bool {
        self.offset == 0
    }
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error(
        "Misaligned forecast: {dates} dates, {weather_codes} codes, {temp_max} maxima, {temp_min} minima"
    )]
    MisalignedForecast {
        dates: usize,
        weather_codes: usize,
        temp_max: usize,
        temp_min: usize,
    },
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Network(e.into_network_error())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(e.to_string())
    }
}

impl WeatherError {
    /// Decode failures, as opposed to transport failures or empty results.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::MisalignedForecast { .. })
    }

}
