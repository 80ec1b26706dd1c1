//! # Config Commands

use tracing::debug;

use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::state::ConfigState;

/// The effective configuration after file and environment overrides.
pub fn get_config(config: &ConfigState) -> StorefrontConfig {
    debug!("get_config command");
    StorefrontConfig::clone(config)
}

/// The effective configuration as a `storefront.toml` document.
pub fn export_config(config: &ConfigState) -> Result<String, ApiError> {
    debug!("export_config command");
    toml::to_string_pretty(&get_config(config))
        .map_err(|e| ApiError::internal(format!("Failed to render config: {}", e)))
}
