//! Response bodies for the REST API.
//!
//! Bodies are plain JSON objects in the shapes the web client reads:
//! ```json
//! { "session": { ... }, "message": { ... } }   // POST /api/chat
//! { "sessions": [ ... ] }                      // GET /api/sessions
//! { "error": "SESSION_NOT_FOUND", "message": "..." }
//! ```
//! Session endpoints return the session object itself.

use serde::Serialize;

use podscription_types::session::{Message, Session};

/// Response payload for a consultation turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session: Session,
    pub message: Message,
}

/// Response payload for the session listing.
#[derive(Debug, Serialize)]
pub struct SessionList {
    pub sessions: Vec<Session>,
}

/// Error body: machine-readable code under `error`, human text under `message`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
