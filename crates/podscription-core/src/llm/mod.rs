//! Model backend abstractions for Podscription.
//!
//! - `LlmProvider`: RPITIT trait for concrete backend implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `deadline`: shared per-turn deadline for sequential backend calls

pub mod box_provider;
pub mod deadline;
pub mod provider;
