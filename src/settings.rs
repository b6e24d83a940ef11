use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const BASE_URL: &str = "https://www.volby.cz/pls/ps2017nss/";

/// Runtime settings. Every field can be overridden with a `VOLBY_` env var,
/// e.g. `VOLBY_TIMEOUT_SECS=60`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub listing_table_class: String,
    pub summary_table_id: String,
    pub party_block_class: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: BASE_URL.to_string(),
            timeout_secs: 30,
            listing_table_class: "table".to_string(),
            summary_table_id: "ps311_t1".to_string(),
            party_block_class: "t2_470".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let d = Settings::default();
        Config::builder()
            .set_default("base_url", d.base_url)?
            .set_default("timeout_secs", d.timeout_secs as i64)?
            .set_default("listing_table_class", d.listing_table_class)?
            .set_default("summary_table_id", d.summary_table_id)?
            .set_default("party_block_class", d.party_block_class)?
            .add_source(Environment::with_prefix("VOLBY"))
            .build()
            .context("Failed to read VOLBY_* settings")?
            .try_deserialize()
            .context("Invalid VOLBY_* settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
