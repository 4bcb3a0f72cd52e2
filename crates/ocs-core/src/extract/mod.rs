//! Per-operation extraction: picking one representative example value for
//! the request body and each parameter, and manufacturing placeholder
//! credentials. This is where all ambiguity decisions live; everything
//! downstream is structural.

pub mod auth;
pub mod examples;
pub mod request;

pub use auth::materialize_auth;
pub use examples::select_examples;
pub use request::{AuthMaterials, RequestShape};
