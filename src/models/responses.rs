use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const API_NAME: &str = "Number Info API";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEVELOPER: &str = "@ig_banz";

/// Tag reported as the `source` of every lookup result
pub const SOURCE_TAG: &str = "@IG_BANZ";

/// Response envelope shared by every endpoint
///
/// Serializes as `{"success": .., <payload fields>, "developer": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
    pub developer: String,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload,
            developer: DEVELOPER.to_string(),
        }
    }

    pub fn failure(payload: T) -> Self {
        Self {
            success: false,
            payload,
            developer: DEVELOPER.to_string(),
        }
    }
}

/// Error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub api: String,
    pub version: String,
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

/// `GET /about`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub api_name: String,
    pub version: String,
    pub description: String,
    pub github: String,
}

/// `GET /contact`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub instagram: String,
    pub support: String,
}

/// `GET|POST /lookup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub searched_number: String,
    pub source: String,
    pub result_count: usize,
    pub data: Value,
}

/// Developer handle without the leading `@`, used to build profile links
pub fn developer_handle() -> &'static str {
    DEVELOPER.trim_start_matches('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_flattens_payload() {
        let envelope = Envelope::failure(ErrorBody { error: "boom".to_string() });
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({"success": false, "error": "boom", "developer": "@ig_banz"})
        );
    }

    #[test]
    fn test_developer_handle() {
        assert_eq!(developer_handle(), "ig_banz");
    }
}
