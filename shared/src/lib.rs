//! Shared types for the order intake gate
//!
//! Common types used across crates: error codes and the API response
//! envelope, data models, and small utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
