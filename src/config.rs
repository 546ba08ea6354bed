//! Configuration management for the scoring service

use crate::noise::DEFAULT_NOISE_AMPLITUDE;
use crate::types::RiskLevelThresholds;
use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Environment variable that overrides the configuration file location
pub const CONFIG_PATH_ENV: &str = "BANKING_AI_CONFIG";

/// Which scorer family answers fraud and loan requests
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// Hand-written weighted rules with a random perturbation
    #[default]
    Rules,
    /// Logistic classifiers fit on synthetic data at startup
    Classifier,
}

impl ScoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Rules => "rules",
            ScoringStrategy::Classifier => "classifier",
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub training: TrainingConfig,
    pub detection: DetectionConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

/// Scorer selection and perturbation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub strategy: ScoringStrategy,
    /// Half-width of the uniform perturbation applied by rule scorers
    pub noise_amplitude: f64,
    /// Seed for per-request perturbations; entropy when unset
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::Rules,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            seed: None,
        }
    }
}

/// Classifier training settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Synthetic records generated per classifier
    pub samples: usize,
    /// Full-batch gradient descent passes
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2_penalty: f64,
    /// Seed for synthetic data generation
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            epochs: 400,
            learning_rate: 0.5,
            l2_penalty: 1e-4,
            seed: 42,
        }
    }
}

/// Decision thresholds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Rule score above which a transaction is flagged as fraud
    pub fraud_threshold: f64,
    /// Rule score above which a loan is approved
    pub approval_threshold: f64,
    /// Risk level classification thresholds
    pub risk_levels: RiskLevelThresholds,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            fraud_threshold: 0.6,
            approval_threshold: 0.5,
            risk_levels: RiskLevelThresholds::default(),
        }
    }
}

/// Request pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum requests scored concurrently
    pub workers: usize,
    /// Seconds between periodic metrics summaries (0 disables them)
    pub metrics_interval_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            metrics_interval_secs: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `BANKING_AI_CONFIG` or the default path.
    ///
    /// A missing file is not an error; defaults and environment overrides apply.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path plus `BANKING_AI__*` overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("BANKING_AI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make scoring or training meaningless
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.scoring.noise_amplitude.is_finite() && self.scoring.noise_amplitude >= 0.0,
            "scoring.noise_amplitude must be a non-negative number"
        );
        ensure!(self.training.samples > 0, "training.samples must be positive");
        ensure!(self.training.epochs > 0, "training.epochs must be positive");
        ensure!(
            self.training.learning_rate.is_finite() && self.training.learning_rate > 0.0,
            "training.learning_rate must be positive"
        );
        ensure!(
            self.detection.risk_levels.medium <= self.detection.risk_levels.high,
            "detection.risk_levels.medium must not exceed detection.risk_levels.high"
        );
        ensure!(self.pipeline.workers > 0, "pipeline.workers must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scoring.strategy, ScoringStrategy::Rules);
        assert_eq!(config.scoring.noise_amplitude, 0.1);
        assert_eq!(config.detection.fraud_threshold, 0.6);
        assert_eq!(config.detection.approval_threshold, 0.5);
        assert_eq!(config.detection.risk_levels.medium, 0.3);
        assert_eq!(config.detection.risk_levels.high, 0.7);
        assert_eq!(config.training.samples, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_path("does/not/exist.toml").unwrap();
        assert_eq!(config.pipeline.workers, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_overrides() {
        let path = std::env::temp_dir().join(format!("banking-ai-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[scoring]\nstrategy = \"classifier\"\nseed = 7\n\n[pipeline]\nworkers = 2"
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.scoring.strategy, ScoringStrategy::Classifier);
        assert_eq!(config.scoring.seed, Some(7));
        assert_eq!(config.pipeline.workers, 2);
        // Untouched sections keep their defaults
        assert_eq!(config.training.seed, 42);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.pipeline.workers = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scoring.noise_amplitude = -0.2;
        assert!(config.validate().is_err());
    }
}
