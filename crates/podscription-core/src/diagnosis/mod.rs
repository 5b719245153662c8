//! Diagnosis generation: specialist or generic prompt, one backend call,
//! and extraction of a structured prescription from the narrative reply.

pub mod generator;
