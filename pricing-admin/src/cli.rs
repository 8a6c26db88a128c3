//! Command line surface of the `pricing-admin` binary

use crate::service::PricingAdminService;
use crate::store::{ProductRepository, SettingsRepository};
use pricing_engine::OrderLine;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use shared::error::{AppError, AppResult};
use shared::models::{PricingTier, Tier};

pub const USAGE: &str = "\
usage: pricing-admin [command]

commands:
  audit                                          pricing table for the catalog (default)
  quote <product_id> <tier>                      price for one tier
  savings <product_id>                           premium savings over standard
  order <tier> <product_id>:<qty>...             margin summary of an order
  set-list-price <product_id> <price>            validate and store a list price
  set-category <category> <standard|premium> <value>
  reset-category <category>
  set-override <product_id> <standard|premium> <value>
  reset-override <product_id>";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Audit,
    Quote { product_id: String, tier: Tier },
    Savings { product_id: String },
    Order { tier: Tier, lines: Vec<OrderLine> },
    SetListPrice { product_id: String, price: Decimal },
    SetCategory { category: String, tier: PricingTier, value: Decimal },
    ResetCategory { category: String },
    SetOverride { product_id: String, tier: PricingTier, value: Decimal },
    ResetOverride { product_id: String },
}

impl Command {
    /// Parse the arguments following the program name
    pub fn parse<I, T>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((name, rest)) = args.split_first() else {
            return Ok(Self::Audit);
        };

        let command = match (name.as_str(), rest) {
            ("audit", []) => Self::Audit,
            ("quote", [id, tier]) => Self::Quote {
                product_id: id.clone(),
                tier: tier.parse()?,
            },
            ("savings", [id]) => Self::Savings {
                product_id: id.clone(),
            },
            ("order", [tier, lines @ ..]) if !lines.is_empty() => Self::Order {
                tier: tier.parse()?,
                lines: lines
                    .iter()
                    .map(|l| parse_order_line(l))
                    .collect::<AppResult<_>>()?,
            },
            ("set-list-price", [id, price]) => Self::SetListPrice {
                product_id: id.clone(),
                price: parse_decimal(price)?,
            },
            ("set-category", [category, tier, value]) => Self::SetCategory {
                category: category.clone(),
                tier: tier.parse()?,
                value: parse_decimal(value)?,
            },
            ("reset-category", [category]) => Self::ResetCategory {
                category: category.clone(),
            },
            ("set-override", [id, tier, value]) => Self::SetOverride {
                product_id: id.clone(),
                tier: tier.parse()?,
                value: parse_decimal(value)?,
            },
            ("reset-override", [id]) => Self::ResetOverride {
                product_id: id.clone(),
            },
            _ => {
                return Err(AppError::invalid(format!(
                    "Unrecognized command: {}\n\n{}",
                    args.join(" "),
                    USAGE
                )));
            }
        };
        Ok(command)
    }
}

fn parse_decimal(raw: &str) -> AppResult<Decimal> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Not a number: {}", raw)).with_detail("value", raw))
}

fn parse_order_line(raw: &str) -> AppResult<OrderLine> {
    let (id, quantity) = raw
        .rsplit_once(':')
        .ok_or_else(|| AppError::validation(format!("Expected <product_id>:<qty>, got {}", raw)))?;
    let quantity = quantity
        .parse()
        .map_err(|_| AppError::validation(format!("Not a quantity: {}", quantity)))?;
    Ok(OrderLine::new(id, quantity))
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(format!("Failed to encode output: {}", e)))
}

/// Run a command and return its JSON output
pub async fn execute<S, P>(service: &PricingAdminService<S, P>, command: Command) -> AppResult<Value>
where
    S: SettingsRepository,
    P: ProductRepository,
{
    match command {
        Command::Audit => to_json(&service.audit().await?),
        Command::Quote { product_id, tier } => to_json(&service.quote(&product_id, tier).await?),
        Command::Savings { product_id } => to_json(&service.savings(&product_id).await?),
        Command::Order { tier, lines } => to_json(&service.order_summary(&lines, tier).await?),
        Command::SetListPrice { product_id, price } => {
            to_json(&service.commit_list_price(&product_id, price).await?)
        }
        Command::SetCategory {
            category,
            tier,
            value,
        } => {
            let entry = service.set_category_multiplier(&category, tier, value).await?;
            Ok(json!({ "category": category, "config": to_json(&entry)? }))
        }
        Command::ResetCategory { category } => {
            let removed = service.reset_category(&category).await?;
            Ok(json!({ "category": category, "removed": removed }))
        }
        Command::SetOverride {
            product_id,
            tier,
            value,
        } => to_json(&service.set_individual_multiplier(&product_id, tier, value).await?),
        Command::ResetOverride { product_id } => {
            to_json(&service.reset_individual(&product_id).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_no_arguments_means_audit() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Audit);
    }

    #[test]
    fn test_parse_quote_with_premium_sub_tier() {
        let command = Command::parse(["quote", "P-1", "premium_pro"]).unwrap();
        assert_eq!(
            command,
            Command::Quote {
                product_id: "P-1".into(),
                tier: Tier::PremiumPro
            }
        );
    }

    #[test]
    fn test_parse_set_category() {
        let command = Command::parse(["set-category", "Peeling", "standard", "2.0"]).unwrap();
        assert_eq!(
            command,
            Command::SetCategory {
                category: "Peeling".into(),
                tier: PricingTier::Standard,
                value: Decimal::new(20, 1)
            }
        );
    }

    #[test]
    fn test_parse_order_lines() {
        let command = Command::parse(["order", "STANDARD", "P-1:3", "S-2:1"]).unwrap();
        let Command::Order { tier, lines } = command else {
            panic!("expected order");
        };
        assert_eq!(tier, Tier::Standard);
        assert_eq!(lines, vec![OrderLine::new("P-1", 3), OrderLine::new("S-2", 1)]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let err = Command::parse(["quote", "P-1", "GOLD"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::TierUnknown);

        let err = Command::parse(["set-list-price", "P-1", "cheap"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = Command::parse(["frobnicate"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        assert!(Command::parse(["order", "STANDARD"]).is_err());
        assert!(Command::parse(["order", "STANDARD", "P-1"]).is_err());
    }
}
