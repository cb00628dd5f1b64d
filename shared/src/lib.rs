//! Shared types for the employee search workspace
//!
//! Error types, response bodies and the employee model used by the
//! service crate and its tests.

pub mod error;
pub mod models;
