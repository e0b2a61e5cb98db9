//! Weather widget backed by demo data.
//!
//! There is no live weather source. Every path, including a failed
//! geolocation, ends on the same fixed report.

use std::time::Duration;

use crate::effect::{Effect, Reaction, Timer};
use crate::geolocation::{LocationError, Position, PositionOptions};
use crate::toast::Notice;

pub const DEFAULT_LOCATION: &str = "Bhubaneswar";

pub const REFRESH_DELAY: Duration = Duration::from_millis(800);
pub const LOCATED_DELAY: Duration = Duration::from_millis(1000);
pub const FALLBACK_DELAY: Duration = Duration::from_millis(500);

/// Display strings only. Nothing here is a physical quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub location: String,
    pub region: String,
    pub temp_c: String,
    pub icon_url: String,
    pub condition: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub uv: String,
}

impl WeatherReport {
    pub fn demo() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            region: "India".to_string(),
            temp_c: "32".to_string(),
            icon_url: "https://cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
            condition: "Partly cloudy".to_string(),
            feels_like: "34°C".to_string(),
            humidity: "70%".to_string(),
            wind: "5 km/h".to_string(),
            uv: "40%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherView {
    Loading,
    Ready(WeatherReport),
}

#[derive(Debug, Clone)]
pub struct WeatherWidget {
    view: WeatherView,
    geolocation_supported: bool,
}

impl WeatherWidget {
    pub fn new(geolocation_supported: bool) -> Self {
        Self {
            view: WeatherView::Loading,
            geolocation_supported,
        }
    }

    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    /// Page load: demo data straight away.
    pub fn startup(&mut self) -> Reaction {
        self.show_demo(false)
    }

    pub fn refresh(&mut self) -> Reaction {
        self.view = WeatherView::Loading;
        Reaction::new().effect(Effect::schedule(
            REFRESH_DELAY,
            Timer::ShowDemoWeather { located: false },
        ))
    }

    pub fn geolocate(&mut self) -> Reaction {
        self.view = WeatherView::Loading;

        if !self.geolocation_supported {
            return Reaction::new()
                .notice(
                    Notice::new(
                        "Location Unavailable",
                        "Geolocation is not supported on this system.",
                    )
                    .lasting(Duration::from_millis(3000)),
                )
                .effect(Effect::schedule(
                    FALLBACK_DELAY,
                    Timer::ShowDemoWeather { located: false },
                ));
        }

        Reaction::new()
            .notice(
                Notice::new("Locating", "Requesting your location...")
                    .lasting(Duration::from_millis(2000)),
            )
            .effect(Effect::Locate(PositionOptions::default()))
    }

    pub fn on_position(&mut self, result: Result<Position, LocationError>) -> Reaction {
        match result {
            Ok(position) => {
                tracing::info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "position found, using demo weather"
                );
                Reaction::new().effect(Effect::schedule(
                    LOCATED_DELAY,
                    Timer::ShowDemoWeather { located: true },
                ))
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "geolocation failed: {err}");
                Reaction::new()
                    .notice(
                        Notice::new("Location Error", err.to_string())
                            .lasting(Duration::from_millis(3000)),
                    )
                    .effect(Effect::schedule(
                        FALLBACK_DELAY,
                        Timer::ShowDemoWeather { located: false },
                    ))
            }
        }
    }

    pub fn show_demo(&mut self, located: bool) -> Reaction {
        self.view = WeatherView::Ready(WeatherReport::demo());

        let reaction = Reaction::new().notice(Notice::new(
            "Weather Updated",
            format!("Current weather for {DEFAULT_LOCATION} loaded successfully."),
        ));
        if located {
            reaction.notice(
                Notice::new(
                    "Location Found",
                    "Using your current location for weather data.",
                )
                .lasting(Duration::from_millis(2000)),
            )
        } else {
            reaction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(reaction: &Reaction) -> Vec<&str> {
        reaction.notices.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_startup_shows_demo() {
        let mut widget = WeatherWidget::new(true);
        assert_eq!(widget.view(), &WeatherView::Loading);

        let reaction = widget.startup();
        assert_eq!(widget.view(), &WeatherView::Ready(WeatherReport::demo()));
        assert_eq!(titles(&reaction), vec!["Weather Updated"]);
        assert_eq!(
            reaction.notices[0].description,
            "Current weather for Bhubaneswar loaded successfully."
        );
        assert!(reaction.effects.is_empty());
    }

    #[test]
    fn test_refresh_shows_loading_then_schedules_demo() {
        let mut widget = WeatherWidget::new(true);
        widget.startup();

        let reaction = widget.refresh();
        assert_eq!(widget.view(), &WeatherView::Loading);
        assert_eq!(
            reaction.effects,
            vec![Effect::schedule(
                Duration::from_millis(800),
                Timer::ShowDemoWeather { located: false }
            )]
        );
    }

    #[test]
    fn test_geolocate_requests_position() {
        let mut widget = WeatherWidget::new(true);
        let reaction = widget.geolocate();

        assert_eq!(widget.view(), &WeatherView::Loading);
        assert_eq!(titles(&reaction), vec!["Locating"]);
        assert_eq!(reaction.notices[0].duration, Duration::from_millis(2000));
        assert_eq!(reaction.effects, vec![Effect::Locate(PositionOptions::default())]);
    }

    #[test]
    fn test_geolocate_without_support_falls_back() {
        let mut widget = WeatherWidget::new(false);
        let reaction = widget.geolocate();

        assert_eq!(titles(&reaction), vec!["Location Unavailable"]);
        assert_eq!(
            reaction.effects,
            vec![Effect::schedule(
                FALLBACK_DELAY,
                Timer::ShowDemoWeather { located: false }
            )]
        );
    }

    #[test]
    fn test_permission_denied_notifies_reason_and_falls_back() {
        let mut widget = WeatherWidget::new(true);
        widget.geolocate();

        let reaction = widget.on_position(Err(LocationError::from_code(1)));
        assert_eq!(reaction.notices.len(), 1);
        assert_eq!(reaction.notices[0].title, "Location Error");
        assert_eq!(reaction.notices[0].description, "Location permission denied");
        assert_eq!(
            reaction.effects,
            vec![Effect::schedule(
                Duration::from_millis(500),
                Timer::ShowDemoWeather { located: false }
            )]
        );

        widget.show_demo(false);
        assert_eq!(widget.view(), &WeatherView::Ready(WeatherReport::demo()));
    }

    #[test]
    fn test_position_found_announces_location() {
        let mut widget = WeatherWidget::new(true);
        widget.geolocate();

        let reaction = widget.on_position(Ok(Position {
            latitude: 20.29,
            longitude: 85.82,
        }));
        assert!(reaction.notices.is_empty());
        assert_eq!(
            reaction.effects,
            vec![Effect::schedule(
                LOCATED_DELAY,
                Timer::ShowDemoWeather { located: true }
            )]
        );

        let reaction = widget.show_demo(true);
        assert_eq!(titles(&reaction), vec!["Weather Updated", "Location Found"]);
    }
}
