use actix_web::{web, HttpMessage, HttpRequest};
use serde_json::{Map, Value};
use validator::Validate;

/// Header carrying the relay API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Field name for the API key in query strings, forms and JSON bodies
pub const API_KEY_FIELD: &str = "api_key";

/// Field name for the searched phone number
pub const NUMBER_FIELD: &str = "number";

/// Inputs of a lookup request, gathered from every place a client may put them
///
/// The API key is taken from (first non-empty wins) the `X-API-Key` header,
/// the query string, an urlencoded form body, then a JSON body.
/// The number follows the same order without the header.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LookupInput {
    pub api_key: Option<String>,
    #[validate(required, length(min = 1))]
    pub number: Option<String>,
}

impl LookupInput {
    /// Collect the inputs from a request and its raw body
    pub fn from_parts(req: &HttpRequest, body: &[u8]) -> Self {
        // Media types are case-insensitive
        let content_type = req.content_type().to_ascii_lowercase();

        let query = parse_urlencoded(req.query_string());
        let form = if content_type == "application/x-www-form-urlencoded" {
            std::str::from_utf8(body).map(parse_urlencoded).unwrap_or_default()
        } else {
            Vec::new()
        };
        let json = if is_json(&content_type) {
            parse_json_object(body)
        } else {
            None
        };

        let header_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        let api_key = header_key
            .or_else(|| first_value(&query, API_KEY_FIELD))
            .or_else(|| first_value(&form, API_KEY_FIELD))
            .or_else(|| json.as_ref().and_then(json_api_key));

        let number = first_value(&query, NUMBER_FIELD)
            .or_else(|| first_value(&form, NUMBER_FIELD))
            .or_else(|| json.as_ref().and_then(json_number));

        Self { api_key, number }
    }
}

/// `application/json` or any `application/*+json` type, in any letter case
pub fn is_json(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type == "application/json"
        || (content_type.starts_with("application/") && content_type.ends_with("+json"))
}

fn parse_urlencoded(raw: &str) -> Vec<(String, String)> {
    web::Query::<Vec<(String, String)>>::from_query(raw)
        .map(web::Query::into_inner)
        .unwrap_or_default()
}

fn parse_json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// First occurrence of `name`, treated as absent when empty
fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .filter(|v| !v.is_empty())
}

fn json_api_key(body: &Map<String, Value>) -> Option<String> {
    body.get(API_KEY_FIELD)
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Numbers may arrive as JSON strings or JSON numbers; zero counts as absent
///
/// Booleans, arrays and objects are never a phone number and count as absent,
/// so they get the missing parameter error instead of being forwarded.
fn json_number(body: &Map<String, Value>) -> Option<String> {
    match body.get(NUMBER_FIELD)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
