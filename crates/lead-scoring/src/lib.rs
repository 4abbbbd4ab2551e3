//! Lead scoring service library.
//!
//! Combines a deterministic rule-based score with an AI buying-intent
//! classification for uploaded lead batches. The HTTP routers for the
//! scoring surface live here so the API service stays a thin shell.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
