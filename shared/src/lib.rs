//! Shared types for the partner portal pricing stack
//!
//! Common types used by `pricing-engine` and `pricing-admin`: the catalog and
//! pricing configuration models, money helpers, and the unified error system.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
