//! # Configuration State
//!
//! The loaded [`StorefrontConfig`]. Read-only after startup, so it is shared
//! through an `Arc` with no lock.

use std::ops::Deref;
use std::sync::Arc;

use crate::config::StorefrontConfig;

#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: Arc<StorefrontConfig>,
}

impl ConfigState {
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }
}

impl Deref for ConfigState {
    type Target = StorefrontConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
