// Service exports
pub mod auth;
pub mod upstream;

pub use auth::authorize;
pub use upstream::{count_records, UpstreamClient, UpstreamError};
