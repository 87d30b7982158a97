//! CLI Common Utilities
//!
//! Shared context and helpers for command handlers.

use std::path::Path;
use std::time::Duration;

use crate::config::{Config, ConfigLoader};
use crate::delivery::{DeliveryHandle, DeliveryReport, PromptDelivery, create_delivery};
use crate::session::Session;
use crate::types::{Result, ReviewError};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!(
                "Invalid format '{}'. Valid values: text, json, yaml",
                s
            )),
        }
    }
}

/// Command execution context
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub quiet: bool,
}

impl CommandContext {
    /// Load layered config, or a single file when `config_path` is given
    pub fn load(config_path: Option<&Path>, quiet: bool) -> Result<Self> {
        Ok(Self {
            config: ConfigLoader::load_effective(config_path)?,
            quiet,
        })
    }

    pub fn session(&self) -> Result<Session> {
        Session::from_config(&self.config)
    }

    pub fn delivery(&self) -> Result<Box<dyn PromptDelivery>> {
        create_delivery(&self.config.delivery)
    }
}

/// Wait for a launched delivery, giving up after `wait_secs`
pub async fn wait_for_delivery(handle: DeliveryHandle, wait_secs: u64) -> Result<DeliveryReport> {
    let limit = Duration::from_secs(wait_secs);
    let method = handle.method().to_string();
    tokio::time::timeout(limit, handle.wait())
        .await
        .map_err(|_| ReviewError::timeout(format!("{} delivery", method), limit))?
}
