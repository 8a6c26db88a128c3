//! Pricing Resolver
//!
//! Tier pricing for the partner portal:
//! - Hierarchical multiplier resolution (individual > category > global)
//! - Tier price calculation (list price / multiplier, legacy discount rules)
//! - Margin, risk band and list-price edit validation
//! - Premium savings, catalog audit and order margin summaries
//!
//! Everything here is a pure function of its inputs. Callers load
//! [`PricingSettings`] and products from their stores and pass them in;
//! nothing in this crate performs I/O.

mod audit;
mod calculator;
mod finance;
mod margin;
mod resolver;
mod savings;
mod settings;
mod validation;
mod warning;

pub use audit::*;
pub use calculator::*;
pub use finance::*;
pub use margin::*;
pub use resolver::*;
pub use savings::*;
pub use settings::*;
pub use validation::*;
pub use warning::*;
