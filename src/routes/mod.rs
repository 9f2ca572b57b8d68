// Route exports
pub mod info;
pub mod lookup;

use actix_web::{web, HttpResponse};

use crate::error::RelayError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .configure(info::configure)
        .configure(lookup::configure)
        .default_service(web::to(not_found));
}

async fn not_found() -> Result<HttpResponse, RelayError> {
    Err(RelayError::NotFound)
}
