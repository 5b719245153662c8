//! Intent classification: one backend call, parsed into a typed [`Intent`].
//!
//! [`Intent`]: podscription_types::session::Intent

pub mod classifier;
