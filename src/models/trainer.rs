//! One-shot classifier training at startup

use crate::config::TrainingConfig;
use crate::error::{ScoringError, ScoringResult};
use crate::feature_extractor::{FRAUD_FEATURE_NAMES, LOAN_FEATURE_NAMES};
use crate::models::classifier::{FitParams, LogisticModel};
use crate::models::synthetic::{self, LabeledSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fitted fraud and loan classifiers.
///
/// Built once before any request is served and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModels {
    pub fraud: LogisticModel,
    pub loan: LogisticModel,
}

/// Summary of one fit
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub model: &'static str,
    pub samples: usize,
    pub positives: usize,
    /// Accuracy on the training set itself
    pub accuracy: f64,
    pub elapsed: Duration,
}

/// Generates synthetic data and fits both classifiers
pub struct ModelTrainer {
    config: TrainingConfig,
}

impl ModelTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    fn params(&self) -> FitParams {
        FitParams {
            epochs: self.config.epochs,
            learning_rate: self.config.learning_rate,
            l2_penalty: self.config.l2_penalty,
        }
    }

    /// Train both models from the configured seed.
    ///
    /// The same configuration always yields the same models.
    pub fn train(&self) -> ScoringResult<(TrainedModels, Vec<TrainingReport>)> {
        if self.config.samples == 0 {
            return Err(ScoringError::Training("samples must be positive".to_string()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let fraud_set = synthetic::fraud_dataset(self.config.samples, &mut rng);
        let (fraud, fraud_report) = self.fit("fraud", &FRAUD_FEATURE_NAMES, &fraud_set)?;

        let loan_set = synthetic::loan_dataset(self.config.samples, &mut rng);
        let (loan, loan_report) = self.fit("loan", &LOAN_FEATURE_NAMES, &loan_set)?;

        Ok((TrainedModels { fraud, loan }, vec![fraud_report, loan_report]))
    }

    fn fit(
        &self,
        model: &'static str,
        feature_names: &[&str],
        set: &LabeledSet,
    ) -> ScoringResult<(LogisticModel, TrainingReport)> {
        let start = Instant::now();
        let fitted = LogisticModel::fit(&set.features, &set.targets, &self.params())?;

        let report = TrainingReport {
            model,
            samples: set.len(),
            positives: set.positives(),
            accuracy: fitted.accuracy(&set.features, &set.targets)?,
            elapsed: start.elapsed(),
        };

        info!(
            model = model,
            samples = report.samples,
            positives = report.positives,
            accuracy = format!("{:.3}", report.accuracy),
            elapsed_ms = report.elapsed.as_millis(),
            "Classifier trained"
        );
        for (feature, weight) in feature_names.iter().zip(fitted.weights()) {
            debug!(model = model, feature = *feature, weight = *weight, "Fitted weight");
        }

        Ok((fitted, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_is_reproducible() {
        let trainer = ModelTrainer::new(TrainingConfig::default());
        let (a, _) = trainer.train().unwrap();
        let (b, _) = trainer.train().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fraud.feature_count(), FRAUD_FEATURE_NAMES.len());
        assert_eq!(a.loan.feature_count(), LOAN_FEATURE_NAMES.len());
    }

    #[test]
    fn test_different_seed_changes_models() {
        let (a, _) = ModelTrainer::new(TrainingConfig::default()).train().unwrap();
        let (b, _) = ModelTrainer::new(TrainingConfig {
            seed: 7,
            ..TrainingConfig::default()
        })
        .train()
        .unwrap();
        assert_ne!(a.fraud, b.fraud);
    }

    #[test]
    fn test_reports_describe_fits() {
        let (_, reports) = ModelTrainer::new(TrainingConfig::default()).train().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].model, "fraud");
        assert_eq!(reports[1].model, "loan");
        for report in &reports {
            assert_eq!(report.samples, 1000);
            assert!(report.accuracy > 0.75, "{} accuracy {}", report.model, report.accuracy);
        }
    }

    #[test]
    fn test_zero_samples_rejected() {
        let trainer = ModelTrainer::new(TrainingConfig {
            samples: 0,
            ..TrainingConfig::default()
        });
        assert!(matches!(trainer.train(), Err(ScoringError::Training(_))));
    }
}
