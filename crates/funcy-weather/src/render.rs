//! Text rendering of [`WidgetState`].

use crate::classify::weather_icon;
use crate::state::WidgetState;
use crate::types::{DailySummary, Place};

pub const APP_TITLE: &str = "Funcy Weather";
pub const INPUT_PLACEHOLDER: &str = "Enter city or location...";
pub const LOADING: &str = "Loading...";
pub const TODAY: &str = "Today";

/// One rendered day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub icon: &'static str,
    pub label: String,
    pub low: i64,
    pub high: i64,
}

impl DayView {
    pub fn from_summary(day: &DailySummary) -> Self {
        let label = if day.is_today() {
            TODAY.to_string()
        } else {
            day.date.format("%a").to_string()
        };

        Self {
            icon: weather_icon(day.weather_code),
            label,
            low: day.temp_min.floor() as i64,
            high: day.temp_max.ceil() as i64,
        }
    }
}

impl std::fmt::Display for DayView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {:<5}  {}° - {}", self.icon, self.label, self.low, self.high)
    }
}

/// The forecast section; only exists when there is a forecast to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub location: String,
    pub country: String,
    pub days: Vec<DayView>,
}

impl WeatherView {
    pub fn from_state(state: &WidgetState) -> Option<Self> {
        let forecast = state.forecast.as_ref()?;
        let (location, country) = match &state.place {
            Some(Place { name, country, .. }) => (name.clone(), country.clone()),
            None => (String::new(), String::new()),
        };

        Some(Self {
            location,
            country,
            days: forecast.days().map(|d| DayView::from_summary(&d)).collect(),
        })
    }

    pub fn title(&self) -> String {
        if self.country.is_empty() {
            format!("Weather {}", self.location)
        } else {
            format!("Weather {} — {}", self.location, self.country)
        }
    }
}

/// Render the whole widget below its header.
pub fn render(state: &WidgetState) -> String {
    let mut lines = vec![APP_TITLE.to_string()];

    if state.loading {
        lines.push(LOADING.to_string());
    }

    if let Some(view) = WeatherView::from_state(state) {
        lines.push(view.title());
        lines.extend(view.days.iter().map(ToString::to_string));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ForecastSet;
    use chrono::NaiveDate;

    fn berlin() -> Place {
        Place {
            name: "Berlin".to_string(),
            country: "DE".to_string(),
            latitude: 52.52,
            longitude: 13.41,
            timezone: "Europe/Berlin".to_string(),
        }
    }

    // 2024-01-01 is a Monday.
    fn week() -> ForecastSet {
        let dates = (1..=7)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        ForecastSet::new(
            dates,
            vec![0, 3, 61, 63, 71, 95, 42],
            vec![4.2, 5.0, 6.01, -0.5, 1.0, 2.0, 3.0],
            vec![-1.2, 0.0, 2.9, -3.5, -4.0, 0.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_day_labels() {
        let view = WeatherView::from_state(&WidgetState {
            forecast: Some(week()),
            place: Some(berlin()),
            ..Default::default()
        })
        .unwrap();

        let labels: Vec<_> = view.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_temperatures_round_outward() {
        let set = week();
        let days: Vec<_> = set.days().map(|d| DayView::from_summary(&d)).collect();

        assert_eq!((days[0].low, days[0].high), (-2, 5));
        assert_eq!((days[2].low, days[2].high), (2, 7));
        assert_eq!((days[3].low, days[3].high), (-4, 0));
    }

    #[test]
    fn test_unknown_code_renders_sentinel() {
        let set = week();
        let last = DayView::from_summary(&set.day(6).unwrap());
        assert_eq!(last.icon, crate::classify::NOT_FOUND);
    }

    #[test]
    fn test_title_with_country() {
        let view = WeatherView {
            location: "Berlin".into(),
            country: "DE".into(),
            days: vec![],
        };
        assert_eq!(view.title(), "Weather Berlin — DE");
    }

    #[test]
    fn test_render_full_state() {
        let out = render(&WidgetState {
            query: "Berlin".into(),
            loading: false,
            place: Some(berlin()),
            forecast: Some(week()),
        });

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], APP_TITLE);
        assert_eq!(lines[1], "Weather Berlin — DE");
        assert_eq!(lines.len(), 2 + 7);
        assert!(lines[2].contains("Today"));
        assert!(lines[2].ends_with("-2° - 5"));
    }

    #[test]
    fn test_render_loading_without_forecast() {
        let out = render(&WidgetState {
            query: "Berlin".into(),
            loading: true,
            place: Some(berlin()),
            forecast: None,
        });

        assert_eq!(out, format!("{APP_TITLE}\n{LOADING}"));
    }

    #[test]
    fn test_render_empty_state() {
        assert_eq!(render(&WidgetState::default()), APP_TITLE);
    }
}
