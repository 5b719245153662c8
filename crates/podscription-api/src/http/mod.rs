//! HTTP/REST API layer for Podscription.
//!
//! Axum-based REST API at `/api/` speaking the web client's JSON shapes,
//! with permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;
