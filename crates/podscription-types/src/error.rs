use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::llm::LlmError;

/// Errors from session store operations (used by trait definitions in podscription-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
}

/// Errors from writing or reading a store snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error categories surfaced to the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    SessionNotFound,
    SessionCreationFailed,
    ProcessingFailed,
    InternalError,
}

impl ErrorKind {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "INVALID_REQUEST",
            ErrorKind::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorKind::SessionCreationFailed => "SESSION_CREATION_FAILED",
            ErrorKind::ProcessingFailed => "PROCESSING_FAILED",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors from a consultation turn or session operation.
#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("failed to create session: {0}")]
    SessionCreationFailed(String),

    #[error("failed to generate diagnosis: {0}")]
    ProcessingFailed(#[source] LlmError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConsultationError {
    /// The boundary category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsultationError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ConsultationError::SessionNotFound(_) => ErrorKind::SessionNotFound,
            ConsultationError::SessionCreationFailed(_) => ErrorKind::SessionCreationFailed,
            ConsultationError::ProcessingFailed(_) => ErrorKind::ProcessingFailed,
            ConsultationError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl From<StoreError> for ConsultationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ConsultationError::SessionNotFound(id),
        }
    }
}
