//! Session persistence abstractions for Podscription.
//!
//! `SessionRepository` is the port the consultation pipeline talks to.
//! `InMemorySessionStore` is the reference implementation; it keeps every
//! session in memory and hands a full snapshot to a `SnapshotSink` after
//! each mutation.

pub mod memory;
pub mod repository;
pub mod snapshot;
