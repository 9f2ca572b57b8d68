// Model exports
pub mod requests;
pub mod responses;

pub use requests::LookupInput;
pub use responses::{AboutResponse, ContactResponse, Envelope, ErrorBody, IndexResponse, LookupResponse};
