//! Consultation orchestration: one inbound message in, one prescription out.

pub mod service;
