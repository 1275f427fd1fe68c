//! Data models
//!
//! Shared between intake-server and the admin console (via API).
//! All IDs are UUID v4 strings; all timestamps are Unix millis.

pub mod order;
pub mod product;
pub mod security;
pub mod stock;

// Re-exports
pub use order::*;
pub use product::*;
pub use security::*;
pub use stock::*;
