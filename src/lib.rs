pub mod model;
pub mod io;
pub mod parser;
pub mod aggregator;
pub mod task;

pub mod formatter;

use crate::formatter::rdata::{DEFAULT_MAX_RDATA_LEN, MIN_MAX_RDATA_LEN};
use crate::parser::PrefixLimits;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Upper bound imposed by the 255 byte TXT character-string.
const RDATA_HARD_LIMIT: usize = 255;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,

    pub ttl: u32,

    pub ipv4_max_prefix_len: u8,
    pub ipv6_max_prefix_len: u8,

    pub max_rdata_len: usize,

    pub ipv4_answer: Ipv4Addr,
    pub ipv4_dataset: String,
    pub ipv6_dataset: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "warn".to_string(),
            ttl: 3600,
            ipv4_max_prefix_len: 24,
            ipv6_max_prefix_len: 64,
            max_rdata_len: DEFAULT_MAX_RDATA_LEN,
            ipv4_answer: Ipv4Addr::new(127, 0, 0, 2),
            ipv4_dataset: "ip4set".to_string(),
            ipv6_dataset: "dnset".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<AppConfig> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open configuration {:?}", path))?;

        let config: AppConfig = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to parse configuration {:?}", path))?;

        config.validate()
            .with_context(|| format!("Invalid configuration {:?}", path))?;

        info!("Loaded configuration from {:?}", path);

        Ok(config)
    }

    /// Resolves the configuration the way the binary does: an explicit path
    /// must exist, otherwise `default_path` is used when present.
    pub fn load(explicit_path: Option<&Path>, default_path: &Path) -> anyhow::Result<AppConfig> {
        match explicit_path {
            Some(path) => AppConfig::from_file(path),
            None if default_path.exists() => AppConfig::from_file(default_path),
            None => {
                info!("Configuration file {:?} does not exist. Using default configuration.", default_path);
                Ok(AppConfig::default())
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ipv4_max_prefix_len > 32 {
            bail!("ipv4_max_prefix_len {} exceeds 32", self.ipv4_max_prefix_len);
        }

        if self.ipv6_max_prefix_len > 128 {
            bail!("ipv6_max_prefix_len {} exceeds 128", self.ipv6_max_prefix_len);
        }

        if self.max_rdata_len > RDATA_HARD_LIMIT {
            bail!("max_rdata_len {} exceeds {}", self.max_rdata_len, RDATA_HARD_LIMIT);
        }

        if self.max_rdata_len < MIN_MAX_RDATA_LEN {
            bail!("max_rdata_len {} is below {}", self.max_rdata_len, MIN_MAX_RDATA_LEN);
        }

        let level = match tracing::Level::from_str(&self.log_level) {
            Ok(level) => level,
            Err(_) => bail!("Unknown log_level {:?}", self.log_level),
        };

        // The ignored-prefix summary is a warning and must stay visible.
        if level < tracing::Level::WARN {
            bail!("log_level {:?} would hide warnings, use warn or more verbose", self.log_level);
        }

        Ok(())
    }

    pub fn prefix_limits(&self) -> PrefixLimits {
        PrefixLimits {
            ipv4_max: self.ipv4_max_prefix_len,
            ipv6_max: self.ipv6_max_prefix_len,
        }
    }
}
