use async_trait::async_trait;
use talentforge_core::config::LocationConfig;
use talentforge_core::{Geolocator, LocationError, Position, PositionOptions};

/// A terminal has no location sensor, so the position comes from the
/// `location` section of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    location: Option<LocationConfig>,
}

impl ConfiguredGeolocator {
    pub fn new(location: Option<LocationConfig>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    fn is_supported(&self) -> bool {
        self.location.is_some()
    }

    async fn current_position(&self, _options: PositionOptions) -> Result<Position, LocationError> {
        match &self.location {
            None => Err(LocationError::PositionUnavailable),
            Some(location) if !location.enabled => Err(LocationError::PermissionDenied),
            Some(location) => Ok(Position {
                latitude: location.latitude,
                longitude: location.longitude,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(enabled: bool) -> LocationConfig {
        LocationConfig {
            latitude: 20.2961,
            longitude: 85.8245,
            enabled,
        }
    }

    #[tokio::test]
    async fn test_configured_position() {
        let geolocator = ConfiguredGeolocator::new(Some(location(true)));
        assert!(geolocator.is_supported());
        let position = geolocator
            .current_position(PositionOptions::default())
            .await
            .unwrap();
        assert_eq!(position.latitude, 20.2961);
        assert_eq!(position.longitude, 85.8245);
    }

    #[tokio::test]
    async fn test_disabled_location_is_denied() {
        let geolocator = ConfiguredGeolocator::new(Some(location(false)));
        assert!(geolocator.is_supported());
        assert_eq!(
            geolocator.current_position(PositionOptions::default()).await,
            Err(LocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_missing_location_is_unsupported() {
        let geolocator = ConfiguredGeolocator::new(None);
        assert!(!geolocator.is_supported());
        assert_eq!(
            geolocator.current_position(PositionOptions::default()).await,
            Err(LocationError::PositionUnavailable)
        );
    }
}
