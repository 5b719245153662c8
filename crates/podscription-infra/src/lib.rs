//! Infrastructure layer for Podscription.
//!
//! Contains implementations of the ports defined in `podscription-core`:
//! the OpenAI-compatible model backend, the JSON snapshot file sink, and
//! the TOML configuration loader.

pub mod config;
pub mod llm;
pub mod snapshot;
