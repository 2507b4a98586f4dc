//! Domain Errors
//!
//! Failure kinds shared by the geolocation and address services.

use crate::domain::value_objects::Coordinates;

/// Errors raised by the location services.
///
/// `Configuration` and `InvalidInput` point at a programming or deployment
/// mistake and are returned to the caller. The remaining variants are
/// runtime conditions that the caching decorators and the orchestration
/// layer absorb.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("geolocation is not supported by the platform")]
    UnsupportedCapability,

    #[error("failed to acquire position: {reason}")]
    AcquisitionFailed {
        /// Placeholder position to use in place of a real fix
        fallback: Coordinates,
        reason: String,
    },

    #[error("address lookup failed: {0}")]
    RemoteFailure(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GeoError {
    pub fn acquisition_failed(reason: impl Into<String>) -> Self {
        Self::AcquisitionFailed {
            fallback: Coordinates::default(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_failed_carries_default_coordinates() {
        match GeoError::acquisition_failed("permission denied") {
            GeoError::AcquisitionFailed { fallback, reason } => {
                assert!(fallback.is_unknown());
                assert_eq!(reason, "permission denied");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GeoError::Configuration("api url must not be empty".into()).to_string(),
            "configuration error: api url must not be empty"
        );
        assert_eq!(
            GeoError::UnsupportedCapability.to_string(),
            "geolocation is not supported by the platform"
        );
        assert_eq!(
            GeoError::acquisition_failed("timeout").to_string(),
            "failed to acquire position: timeout"
        );
    }
}
