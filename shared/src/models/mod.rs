//! Data models
//!
//! Shared between pricing-engine, pricing-admin and the portal frontend (via JSON).
//! Money and multipliers are `Decimal`, carried as JSON numbers.

pub mod pricing_config;
pub mod product;
pub mod tier;

// Re-exports
pub use pricing_config::*;
pub use product::*;
pub use tier::*;
