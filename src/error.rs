use actix_web::{
    body::MessageBody,
    dev::ServiceResponse,
    http::{header, StatusCode},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::models::{Envelope, ErrorBody};
use crate::services::UpstreamError;

/// Errors surfaced to API clients
///
/// Every variant renders as the standard envelope with `success: false`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Endpoint not found")]
    NotFound,

    #[error("Unauthorized. Provide valid API key.")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The detail is logged, never sent to the client
    #[error("Internal server error")]
    Internal(String),
}

impl RelayError {
    pub fn missing_parameter(name: &str) -> Self {
        RelayError::BadRequest(format!("Provide '{}' parameter", name))
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NotFound => StatusCode::NOT_FOUND,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let RelayError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(Envelope::failure(ErrorBody {
            error: self.to_string(),
        }))
    }
}

/// Middleware rewriting framework-generated error responses into the envelope
///
/// Responses that are already JSON (our own `RelayError`s) pass through untouched.
pub fn envelope_errors<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_envelope)
}

fn render_envelope<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map_or(false, |ct| ct.starts_with("application/json"));

    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let message = match status {
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => RelayError::NotFound.to_string(),
        s if s.is_server_error() => RelayError::Internal(String::new()).to_string(),
        s => s.canonical_reason().unwrap_or("Request failed").to_string(),
    };

    tracing::debug!("Rewriting {} response for {} into envelope", status, res.request().path());

    let body = serde_json::to_string(&Envelope::failure(ErrorBody { error: message }))?;

    let (req, res) = res.into_parts();
    let mut res = res.set_body(body);
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(RelayError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(RelayError::missing_parameter("number").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::from(UpstreamError::Status(503)).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RelayError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(RelayError::missing_parameter("number").to_string(), "Provide 'number' parameter");
        assert_eq!(
            RelayError::from(UpstreamError::Status(503)).to_string(),
            "Splexxo API returned 503"
        );
        assert_eq!(RelayError::Internal("secret detail".to_string()).to_string(), "Internal server error");
    }

    #[actix_web::test]
    async fn test_error_response_is_envelope() {
        let res = RelayError::Unauthorized.error_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unauthorized. Provide valid API key.");
        assert_eq!(body["developer"], "@ig_banz");
    }
}
