//! Unified error codes for the pricing stack
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Product and catalog errors
//! - 7xxx: Pricing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,

    // ==================== 7xxx: Pricing ====================
    /// Pricing configuration is missing or malformed
    PricingConfigInvalid = 7001,
    /// Multiplier must be a positive number
    MultiplierInvalid = 7002,
    /// Resulting margin is below the configured minimum
    MarginBelowMinimum = 7003,
    /// Proposed list price is not usable
    ListPriceInvalid = 7004,
    /// No override exists at the requested level
    OverrideNotFound = 7005,
    /// Unknown tier identifier
    TierUnknown = 7006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage read/write error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",

            // Product
            ErrorCode::ProductNotFound => "Product not found",

            // Pricing
            ErrorCode::PricingConfigInvalid => "Pricing configuration is invalid",
            ErrorCode::MultiplierInvalid => "Multiplier must be greater than zero",
            ErrorCode::MarginBelowMinimum => "Margin is below the configured minimum",
            ErrorCode::ListPriceInvalid => "List price must be greater than zero",
            ErrorCode::OverrideNotFound => "No pricing override to reset",
            ErrorCode::TierUnknown => "Unknown tier",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Storage data is corrupted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),

            // Pricing
            7001 => Ok(ErrorCode::PricingConfigInvalid),
            7002 => Ok(ErrorCode::MultiplierInvalid),
            7003 => Ok(ErrorCode::MarginBelowMinimum),
            7004 => Ok(ErrorCode::ListPriceInvalid),
            7005 => Ok(ErrorCode::OverrideNotFound),
            7006 => Ok(ErrorCode::TierUnknown),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
