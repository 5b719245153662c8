//! Business logic and repository trait definitions for Podscription.
//!
//! This crate defines the "ports" (`SessionRepository`, `SnapshotSink`,
//! `LlmProvider`) that the infrastructure layer implements, plus the
//! consultation pipeline built on them. It depends only on
//! `podscription-types` -- never on `podscription-infra` or any network crate.

pub mod consultation;
pub mod diagnosis;
pub mod intent;
pub mod llm;
pub mod prompt;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
