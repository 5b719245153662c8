//! Snapshot sinks for the in-memory session store.

pub mod file;
