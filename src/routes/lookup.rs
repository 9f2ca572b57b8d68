use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::config::Settings;
use crate::error::RelayError;
use crate::models::requests::NUMBER_FIELD;
use crate::models::responses::SOURCE_TAG;
use crate::models::{Envelope, LookupInput, LookupResponse};
use crate::services::{authorize, count_records, UpstreamClient, UpstreamError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub api_key: String,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, UpstreamError> {
        Ok(Self {
            api_key: settings.auth.api_key.clone(),
            upstream: Arc::new(UpstreamClient::from_settings(&settings.upstream)?),
        })
    }
}

/// Configure the lookup route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/lookup", web::get().to(lookup))
        .route("/lookup", web::post().to(lookup));
}

/// Look up a phone number upstream
///
/// GET|POST /lookup
///
/// The API key comes from the `X-API-Key` header or an `api_key` field, the
/// number from a `number` field, in the query string, an urlencoded form or a
/// JSON body:
/// ```json
/// {
///   "api_key": "string",
///   "number": "911111"
/// }
/// ```
async fn lookup(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    let input = LookupInput::from_parts(&req, &body);

    authorize(input.api_key.as_deref(), &state.api_key)?;

    if input.validate().is_err() {
        tracing::info!("Lookup rejected: missing number parameter");
        return Err(RelayError::missing_parameter(NUMBER_FIELD));
    }
    let number = input.number.unwrap_or_default();

    tracing::info!("Looking up number: {}", number);

    let data = state.upstream.lookup(&number).await.map_err(|e| {
        tracing::error!("Upstream lookup failed for {}: {}", number, e);
        RelayError::from(e)
    })?;

    let result_count = count_records(&data).ok_or_else(|| {
        RelayError::Internal(format!("upstream data for {} has no length: {}", number, data))
    })?;

    tracing::info!("Returning {} records for number {}", result_count, number);

    Ok(HttpResponse::Ok().json(Envelope::ok(LookupResponse {
        searched_number: number,
        source: SOURCE_TAG.to_string(),
        result_count,
        data,
    })))
}
