//! Weather lookup for Funcy
//!
//! Resolves a typed location through Open-Meteo geocoding, fetches its daily
//! forecast, and keeps the widget state those lookups feed.

pub mod classify;
pub mod geocode;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod service;
pub mod session;
pub mod state;
pub mod types;

pub use classify::{weather_icon, WeatherCodeTable, NOT_FOUND, WMO_ICONS};
pub use geocode::Resolver;
pub use pipeline::{LookupOutcome, WeatherPipeline};
pub use provider::ForecastFetcher;
pub use render::{render, DayView, WeatherView};
pub use service::{request_lookup, WeatherServiceMessage};
pub use session::SessionStore;
pub use state::{Applied, LookupResult, LookupTicket, WeatherController, WidgetState};
pub use types::*;
