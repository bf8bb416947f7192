use std::collections::HashMap;

use domain::models::MaterialKind;
use domain::services::MaterialPointsTable;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON documents of the local store.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

/// Points-per-kilogram rates.
///
/// The rates changed between application revisions; they are configuration
/// here, with the latest production values as defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_plastic_per_kg")]
    pub plastic_per_kg: f64,

    #[serde(default = "default_glass_per_kg")]
    pub glass_per_kg: f64,

    #[serde(default = "default_paper_per_kg")]
    pub paper_per_kg: f64,

    #[serde(default = "default_metal_per_kg")]
    pub metal_per_kg: f64,
}

impl PointsConfig {
    /// Builds the material points table used by the services.
    pub fn table(&self) -> MaterialPointsTable {
        MaterialPointsTable::new(HashMap::from([
            (MaterialKind::Plastic, self.plastic_per_kg),
            (MaterialKind::Glass, self.glass_per_kg),
            (MaterialKind::Paper, self.paper_per_kg),
            (MaterialKind::Metal, self.metal_per_kg),
        ]))
    }
}

/// One redeemable (point cost, monetary value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RewardTier {
    pub points: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_reward_tiers")]
    pub tiers: Vec<RewardTier>,

    /// Days a voucher stays valid after issuance.
    #[serde(default = "default_voucher_validity_days")]
    pub voucher_validity_days: i64,
}

impl RewardsConfig {
    /// The tier whose point cost matches exactly, if any.
    pub fn tier_for(&self, points: f64) -> Option<RewardTier> {
        self.tiers.iter().copied().find(|t| t.points == points)
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_storage_path() -> String {
    ".recyclehub".to_string()
}
fn default_plastic_per_kg() -> f64 {
    2.0
}
fn default_glass_per_kg() -> f64 {
    1.0
}
fn default_paper_per_kg() -> f64 {
    1.0
}
fn default_metal_per_kg() -> f64 {
    5.0
}
fn default_reward_tiers() -> Vec<RewardTier> {
    vec![
        RewardTier {
            points: 100.0,
            value: 50.0,
        },
        RewardTier {
            points: 200.0,
            value: 120.0,
        },
        RewardTier {
            points: 500.0,
            value: 350.0,
        },
    ]
}
fn default_voucher_validity_days() -> i64 {
    90
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            plastic_per_kg: default_plastic_per_kg(),
            glass_per_kg: default_glass_per_kg(),
            paper_per_kg: default_paper_per_kg(),
            metal_per_kg: default_metal_per_kg(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            tiers: default_reward_tiers(),
            voucher_validity_days: default_voucher_validity_days(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with RH__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RH").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, rate) in [
            ("plastic", self.points.plastic_per_kg),
            ("glass", self.points.glass_per_kg),
            ("paper", self.points.paper_per_kg),
            ("metal", self.points.metal_per_kg),
        ] {
            if rate < 0.0 {
                return Err(format!("points.{name}_per_kg must be non-negative"));
            }
        }
        if self.rewards.tiers.is_empty() {
            return Err("rewards.tiers must not be empty".to_string());
        }
        if self
            .rewards
            .tiers
            .iter()
            .any(|t| t.points <= 0.0 || t.value <= 0.0)
        {
            return Err("reward tiers must have positive points and value".to_string());
        }
        if self.rewards.voucher_validity_days <= 0 {
            return Err("rewards.voucher_validity_days must be positive".to_string());
        }
        Ok(())
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Built entirely from defaults plus overrides, without touching config
    /// files (which may not be accessible during tests).
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }
}
