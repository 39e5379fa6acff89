// ⚙️ Configuration - input locations and target tier
// Passed into the pipeline explicitly; nothing here is global

use crate::plans::SILVER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Geography dataset: zipcode,state,county_code,name,rate_area
    #[serde(default = "default_zips_path")]
    pub zips_path: PathBuf,

    /// Plan catalog: plan_id,state,metal_level,rate,rate_area
    #[serde(default = "default_plans_path")]
    pub plans_path: PathBuf,

    /// Requested postal codes: zipcode,rate
    #[serde(default = "default_requests_path")]
    pub requests_path: PathBuf,

    #[serde(default = "default_tier")]
    pub tier: String,
}

fn default_zips_path() -> PathBuf {
    PathBuf::from("data/zips.csv")
}

fn default_plans_path() -> PathBuf {
    PathBuf::from("data/plans.csv")
}

fn default_requests_path() -> PathBuf {
    PathBuf::from("data/slcsp.csv")
}

fn default_tier() -> String {
    SILVER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            zips_path: default_zips_path(),
            plans_path: default_plans_path(),
            requests_path: default_requests_path(),
            tier: default_tier(),
        }
    }
}

impl Config {
    /// Load from a JSON file; missing keys fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// All three inputs resolved against a base directory
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.zips_path = base.join(&self.zips_path);
        self.plans_path = base.join(&self.plans_path);
        self.requests_path = base.join(&self.requests_path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.zips_path, PathBuf::from("data/zips.csv"));
        assert_eq!(config.plans_path, PathBuf::from("data/plans.csv"));
        assert_eq!(config.requests_path, PathBuf::from("data/slcsp.csv"));
        assert_eq!(config.tier, "silver");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"plans_path": "other/plans.csv"}"#).unwrap();

        assert_eq!(config.plans_path, PathBuf::from("other/plans.csv"));
        assert_eq!(config.zips_path, PathBuf::from("data/zips.csv"));
        assert_eq!(config.tier, "silver");
    }

    #[test]
    fn test_with_base_dir() {
        let config = Config::default().with_base_dir(Path::new("/srv/run"));
        assert_eq!(config.requests_path, PathBuf::from("/srv/run/data/slcsp.csv"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file("no/such/config.json").unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
