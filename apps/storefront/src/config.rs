//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPGRID_CHECKOUT_DELAY_MS=0                                       │
//! │     SHOPGRID_DELIVERY_FEE=49                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/shopgrid/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopgrid.storefront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ₹, free delivery above 500, 2s checkout, 2s/5s/8s fulfillment      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "ShopGrid"
//! currency_symbol = "₹"
//!
//! [pricing]
//! free_delivery_threshold = 500
//! delivery_fee = 40
//!
//! [checkout]
//! processing_delay_ms = 2000
//!
//! [fulfillment]
//! location = "Mumbai, Maharashtra"
//! steps = [
//!   { after_ms = 2000, status = "confirmed" },
//!   { after_ms = 5000, status = "processing" },
//!   { after_ms = 8000, status = "shipped" },
//! ]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopgrid_core::pricing::{DeliveryPolicy, FREE_DELIVERY_THRESHOLD, STANDARD_DELIVERY_FEE};
use shopgrid_core::{Money, DEFAULT_COUNTRY};
use shopgrid_orders::plan::{DEFAULT_ESTIMATED_DELIVERY_DAYS, DEFAULT_LOCATION};
use shopgrid_orders::{FulfillmentPlan, LifecycleSettings};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Sections
// =============================================================================

/// Store identity and currency display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub name: String,
    /// ISO 4217
    pub currency_code: String,
    pub currency_symbol: String,
    /// Catalog prices are whole rupees, so 0 by default.
    pub currency_decimals: u8,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: "ShopGrid".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 0,
        }
    }
}

/// Delivery fee rule, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    pub free_delivery_threshold: i64,
    pub delivery_fee: i64,
}

impl Default for PricingSection {
    fn default() -> Self {
        PricingSection {
            free_delivery_threshold: FREE_DELIVERY_THRESHOLD.minor_units(),
            delivery_fee: STANDARD_DELIVERY_FEE.minor_units(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSection {
    /// Artificial wait before an order is placed.
    pub processing_delay_ms: u64,
    /// Prefilled on the address step.
    pub default_country: String,
}

impl Default for CheckoutSection {
    fn default() -> Self {
        CheckoutSection {
            processing_delay_ms: 2_000,
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Simulated fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentSection {
    pub location: String,
    pub estimated_delivery_days: u32,
    pub steps: FulfillmentPlan,
}

impl Default for FulfillmentSection {
    fn default() -> Self {
        FulfillmentSection {
            location: DEFAULT_LOCATION.to_string(),
            estimated_delivery_days: DEFAULT_ESTIMATED_DELIVERY_DAYS,
            steps: FulfillmentPlan::default(),
        }
    }
}

/// Identity the mock provider hands out on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    pub user_name: String,
    pub user_phone: String,
}

impl Default for DemoSection {
    fn default() -> Self {
        DemoSection {
            user_name: "Subhojeet Ganguli".to_string(),
            user_phone: "+91 9305205959".to_string(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub pricing: PricingSection,

    #[serde(default)]
    pub checkout: CheckoutSection,

    #[serde(default)]
    pub fulfillment: FulfillmentSection,

    #[serde(default)]
    pub demo: DemoSection,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. `config_path`, or `storefront.toml` in the platform config dir
    /// 3. Environment variables
    ///
    /// An explicit path that cannot be read is an error; a missing file at
    /// the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document; absent sections and keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.currency_symbol must not be empty".into(),
            ));
        }

        if self.store.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "store.currency_decimals must be at most 4".into(),
            ));
        }

        if self.pricing.free_delivery_threshold < 0 || self.pricing.delivery_fee < 0 {
            return Err(ConfigError::Invalid(
                "pricing values must not be negative".into(),
            ));
        }

        if self.fulfillment.estimated_delivery_days == 0 {
            return Err(ConfigError::Invalid(
                "fulfillment.estimated_delivery_days must be greater than 0".into(),
            ));
        }

        self.fulfillment.steps.validate()?;

        Ok(())
    }

    /// Applies `SHOPGRID_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("SHOPGRID_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(delay) = var("SHOPGRID_CHECKOUT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding checkout delay from environment");
                    self.checkout.processing_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring invalid SHOPGRID_CHECKOUT_DELAY_MS"),
            }
        }

        if let Some(threshold) = var("SHOPGRID_FREE_DELIVERY_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(v) => self.pricing.free_delivery_threshold = v,
                Err(_) => {
                    warn!(value = %threshold, "Ignoring invalid SHOPGRID_FREE_DELIVERY_THRESHOLD")
                }
            }
        }

        if let Some(fee) = var("SHOPGRID_DELIVERY_FEE") {
            match fee.parse::<i64>() {
                Ok(v) => self.pricing.delivery_fee = v,
                Err(_) => warn!(value = %fee, "Ignoring invalid SHOPGRID_DELIVERY_FEE"),
            }
        }

        if let Some(location) = var("SHOPGRID_FULFILLMENT_LOCATION") {
            self.fulfillment.location = location;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopgrid", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::new(
            Money::from_minor(self.pricing.free_delivery_threshold),
            Money::from_minor(self.pricing.delivery_fee),
        )
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.processing_delay_ms)
    }

    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings {
            location: self.fulfillment.location.clone(),
            estimated_delivery_days: self.fulfillment.estimated_delivery_days,
            plan: self.fulfillment.steps.clone(),
        }
    }

    /// Renders an amount with the configured symbol and decimals.
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.store.currency_symbol, self.store.currency_decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopgrid_core::OrderStatus;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delivery_policy(), DeliveryPolicy::default());
        assert_eq!(config.checkout_delay(), Duration::from_secs(2));
        assert_eq!(config.format_price(Money::from_minor(124999)), "₹124999");
        assert_eq!(config.lifecycle_settings(), LifecycleSettings::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [pricing]
            delivery_fee = 49

            [fulfillment]
            steps = [
              { after_ms = 100, status = "confirmed" },
              { after_ms = 300, status = "out-for-delivery" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.delivery_fee, 49);
        assert_eq!(config.pricing.free_delivery_threshold, 500);
        assert_eq!(config.store.currency_symbol, "₹");
        assert_eq!(
            config.fulfillment.steps.steps()[1].status,
            OrderStatus::OutForDelivery
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = StorefrontConfig::from_toml("[pricing]\ndelivery_fee = \"forty\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = StorefrontConfig::default();
        config.pricing.delivery_fee = -1;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.fulfillment.estimated_delivery_days = 0;
        assert!(config.validate().is_err());

        let config = StorefrontConfig::from_toml(
            r#"
            [fulfillment]
            steps = [{ after_ms = 100, status = "cancelled" }]
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SHOPGRID_STORE_NAME", "Test Mart"),
            ("SHOPGRID_CHECKOUT_DELAY_MS", "0"),
            ("SHOPGRID_FREE_DELIVERY_THRESHOLD", "999"),
            ("SHOPGRID_DELIVERY_FEE", "not-a-number"),
            ("SHOPGRID_FULFILLMENT_LOCATION", "Pune, Maharashtra"),
        ]);

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Test Mart");
        assert_eq!(config.checkout_delay(), Duration::ZERO);
        assert_eq!(config.pricing.free_delivery_threshold, 999);
        // Unparseable values leave the previous setting
        assert_eq!(config.pricing.delivery_fee, 40);
        assert_eq!(config.fulfillment.location, "Pune, Maharashtra");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = StorefrontConfig::load(Some(PathBuf::from("/nonexistent/storefront.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
