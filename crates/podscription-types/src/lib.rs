//! Shared domain types for Podscription.
//!
//! This crate contains the core domain types used across the Podscription
//! workspace: Session, Message, Intent, Prescription, LLM request/response
//! shapes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod session;
