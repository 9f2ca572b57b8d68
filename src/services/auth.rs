use crate::error::RelayError;

/// Check a presented API key against the configured one
///
/// A missing key never matches, not even an empty configured key.
pub fn authorize(presented: Option<&str>, expected: &str) -> Result<(), RelayError> {
    match presented {
        Some(key) if key == expected => Ok(()),
        Some(_) => {
            tracing::warn!("Rejected lookup with invalid API key");
            Err(RelayError::Unauthorized)
        }
        None => {
            tracing::warn!("Rejected lookup without API key");
            Err(RelayError::Unauthorized)
        }
    }
}
