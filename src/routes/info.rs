use actix_web::{web, HttpResponse, Responder};
use std::collections::BTreeMap;

use crate::models::responses::{developer_handle, API_NAME, API_VERSION};
use crate::models::{AboutResponse, ContactResponse, Envelope, IndexResponse};

/// Configure the static metadata routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/about", web::get().to(about))
        .route("/contact", web::get().to(contact));
}

/// API metadata and endpoint listing
///
/// GET /
async fn index() -> impl Responder {
    let endpoints = BTreeMap::from([
        ("/lookup".to_string(), "Fetch number info".to_string()),
        ("/about".to_string(), "API information".to_string()),
        ("/contact".to_string(), "Developer contact".to_string()),
    ]);

    HttpResponse::Ok().json(Envelope::ok(IndexResponse {
        api: API_NAME.to_string(),
        version: API_VERSION.to_string(),
        message: format!("Welcome to {}", API_NAME),
        endpoints,
    }))
}

/// GET /about
async fn about() -> impl Responder {
    HttpResponse::Ok().json(Envelope::ok(AboutResponse {
        api_name: API_NAME.to_string(),
        version: API_VERSION.to_string(),
        description: "This API fetches number-related info using Splexxo data source.".to_string(),
        github: format!("https://github.com/{}", developer_handle()),
    }))
}

/// GET /contact
async fn contact() -> impl Responder {
    HttpResponse::Ok().json(Envelope::ok(ContactResponse {
        instagram: format!("https://instagram.com/{}", developer_handle()),
        support: "For issues, DM on Instagram".to_string(),
    }))
}
