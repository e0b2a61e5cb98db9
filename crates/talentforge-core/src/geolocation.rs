//! Platform geolocation seam.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached position accepted. Zero disables the cache.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: LOCATE_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Failure categories, mapped from the platform's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location information unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Unknown location error")]
    Unknown,
}

impl LocationError {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            LocationError::PermissionDenied => 1,
            LocationError::PositionUnavailable => 2,
            LocationError::Timeout => 3,
            LocationError::Unknown => 0,
        }
    }
}

/// Single-shot position lookup. Implementations never retry; the runtime
/// enforces `options.timeout`.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Whether the platform offers geolocation at all.
    fn is_supported(&self) -> bool;

    async fn current_position(&self, options: PositionOptions) -> Result<Position, LocationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_categories() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(LocationError::from_code(2), LocationError::PositionUnavailable);
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
        assert_eq!(LocationError::from_code(0), LocationError::Unknown);
        assert_eq!(LocationError::from_code(42), LocationError::Unknown);
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(LocationError::PermissionDenied.to_string(), "Location permission denied");
        assert_eq!(
            LocationError::PositionUnavailable.to_string(),
            "Location information unavailable"
        );
        assert_eq!(LocationError::Timeout.to_string(), "Location request timed out");
        assert_eq!(LocationError::Unknown.to_string(), "Unknown location error");
    }

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }
}
