//! SessionRepository trait definition.

use podscription_types::error::StoreError;
use podscription_types::session::{Message, NewMessage, Session};
use uuid::Uuid;

/// Repository trait for consultation sessions and their message logs.
///
/// Every read returns an owned copy; callers never hold a reference into
/// the store across steps. Uses native async fn in traits (RPITIT).
pub trait SessionRepository: Send + Sync {
    /// Create an empty session.
    ///
    /// An empty or whitespace-only name becomes `"Session N"` where N is the
    /// number of sessions already stored plus one.
    fn create(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Session, StoreError>> + Send;

    /// Get a session by its unique ID.
    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Session, StoreError>> + Send;

    /// List every session. Order is unspecified.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Session>, StoreError>> + Send;

    /// Append a message to a session, assigning its id and timestamp.
    fn add_message(
        &self,
        id: &Uuid,
        message: NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, StoreError>> + Send;

    /// Replace a stored session wholesale.
    fn update(
        &self,
        session: Session,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
