//! Buyer Tier Model

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partner tier (buyer classification)
///
/// Every `PREMIUM*` variant belongs to the premium family and prices at the
/// premium multiplier. Sub-tiers are kept distinct for display and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Standard,
    Premium,
    PremiumBase,
    PremiumPro,
    PremiumElite,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Standard,
        Tier::Premium,
        Tier::PremiumBase,
        Tier::PremiumPro,
        Tier::PremiumElite,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "STANDARD",
            Tier::Premium => "PREMIUM",
            Tier::PremiumBase => "PREMIUM_BASE",
            Tier::PremiumPro => "PREMIUM_PRO",
            Tier::PremiumElite => "PREMIUM_ELITE",
        }
    }

    /// Whether this tier belongs to the premium family
    pub const fn is_premium_family(&self) -> bool {
        !matches!(self, Tier::Standard)
    }

    /// Collapse to the two price points the resolver distinguishes
    pub const fn pricing_tier(&self) -> PricingTier {
        if self.is_premium_family() {
            PricingTier::Premium
        } else {
            PricingTier::Standard
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AppError;

    /// Exact identifier match (case-insensitive); no prefix matching
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == normalized)
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::TierUnknown, format!("Unknown tier: {}", s))
                    .with_detail("tier", s)
            })
    }
}

/// Price point a tier resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingTier {
    Standard,
    Premium,
}

impl PricingTier {
    pub const BOTH: [PricingTier; 2] = [PricingTier::Standard, PricingTier::Premium];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Standard => "STANDARD",
            PricingTier::Premium => "PREMIUM",
        }
    }

    /// Representative buyer tier for this price point
    pub const fn tier(&self) -> Tier {
        match self {
            PricingTier::Standard => Tier::Standard,
            PricingTier::Premium => Tier::Premium,
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PricingTier::Standard),
            "premium" => Ok(PricingTier::Premium),
            _ => Err(AppError::with_message(
                ErrorCode::TierUnknown,
                format!("Unknown price point: {} (expected standard or premium)", s),
            )
            .with_detail("tier", s)),
        }
    }
}
