//! Pricing Settings
//!
//! Explicit configuration object handed to every resolver call, and the
//! decoding of the settings-store JSON blobs it is built from.

use crate::warning::PricingWarning;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{CategoryConfigMap, CategoryPricingConfig, GlobalPricingConfig};

/// Global and category configuration currently in force
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    pub global: GlobalPricingConfig,
    #[serde(default)]
    pub categories: CategoryConfigMap,
}

/// Decoded settings plus every fallback taken while decoding
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: PricingSettings,
    pub warnings: Vec<PricingWarning>,
}

impl PricingSettings {
    pub fn new(global: GlobalPricingConfig, categories: CategoryConfigMap) -> Self {
        Self { global, categories }
    }

    /// Decode the settings-store blobs
    ///
    /// Never fails: a missing or unreadable global blob falls back to
    /// [`GlobalPricingConfig::conservative`], an unreadable category map to
    /// no category overrides, and unreadable category entries are skipped.
    /// Each fallback is logged and reported in [`LoadedSettings::warnings`].
    pub fn from_blobs(global: Option<&Value>, categories: Option<&Value>) -> LoadedSettings {
        let mut warnings = Vec::new();

        let global = decode_global(global, &mut warnings);
        let categories = decode_categories(categories, &mut warnings);

        for warning in &warnings {
            tracing::warn!(warning = %warning, "Pricing configuration fallback");
        }

        LoadedSettings {
            settings: Self { global, categories },
            warnings,
        }
    }
}

fn decode_global(blob: Option<&Value>, warnings: &mut Vec<PricingWarning>) -> GlobalPricingConfig {
    match blob {
        None | Some(Value::Null) => {
            warnings.push(PricingWarning::GlobalConfigMissing);
            GlobalPricingConfig::conservative()
        }
        Some(value) => match GlobalPricingConfig::deserialize(value) {
            Ok(config) => config,
            Err(e) => {
                warnings.push(PricingWarning::GlobalConfigMalformed {
                    reason: e.to_string(),
                });
                GlobalPricingConfig::conservative()
            }
        },
    }
}

fn decode_categories(blob: Option<&Value>, warnings: &mut Vec<PricingWarning>) -> CategoryConfigMap {
    match blob {
        // No category has been configured yet
        None | Some(Value::Null) => CategoryConfigMap::new(),
        Some(Value::Object(entries)) => {
            let mut map = CategoryConfigMap::new();
            for (category, entry) in entries {
                match CategoryPricingConfig::deserialize(entry) {
                    Ok(config) => {
                        map.insert(category.clone(), config);
                    }
                    Err(e) => warnings.push(PricingWarning::CategoryEntryMalformed {
                        category: category.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
            map
        }
        Some(other) => {
            warnings.push(PricingWarning::CategoryConfigMalformed {
                reason: format!("expected an object, found {}", json_type(other)),
            });
            CategoryConfigMap::new()
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
