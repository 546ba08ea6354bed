//! Classifier-backed scorers

use crate::config::DetectionConfig;
use crate::error::ScoringResult;
use crate::feature_extractor::FeatureExtractor;
use crate::models::trainer::TrainedModels;
use crate::noise::NoiseSource;
use crate::rules::threshold_reasons;
use crate::scorer::Scorer;
use crate::types::{FraudDecision, LoanApplication, LoanDecision, RiskLevel, TransactionRecord};
use std::sync::Arc;
use tracing::debug;

/// Fraud scorer that defers to the trained fraud classifier
#[derive(Debug, Clone)]
pub struct FraudClassifierScorer {
    models: Arc<TrainedModels>,
    extractor: FeatureExtractor,
    detection: DetectionConfig,
}

impl FraudClassifierScorer {
    pub fn new(models: Arc<TrainedModels>, detection: DetectionConfig) -> Self {
        Self {
            models,
            extractor: FeatureExtractor::new(),
            detection,
        }
    }
}

impl Scorer for FraudClassifierScorer {
    type Record = TransactionRecord;
    type Decision = FraudDecision;

    fn name(&self) -> &'static str {
        "fraud_classifier"
    }

    fn score(
        &self,
        tx: &TransactionRecord,
        _noise: &mut dyn NoiseSource,
    ) -> ScoringResult<FraudDecision> {
        tx.validate()?;

        let features = self.extractor.fraud_features(tx);
        let (is_fraud, probability) = self.models.fraud.predict(&features)?;

        debug!(
            fraud_probability = probability,
            is_fraud = is_fraud,
            "Classifier fraud score computed"
        );

        Ok(FraudDecision {
            is_fraud,
            fraud_probability: probability,
            risk_level: RiskLevel::from_score(probability, &self.detection.risk_levels),
        })
    }
}

/// Loan scorer that takes the decision from the trained loan classifier and
/// the reasons from fixed thresholds.
#[derive(Debug, Clone)]
pub struct LoanClassifierScorer {
    models: Arc<TrainedModels>,
    extractor: FeatureExtractor,
}

impl LoanClassifierScorer {
    pub fn new(models: Arc<TrainedModels>) -> Self {
        Self {
            models,
            extractor: FeatureExtractor::new(),
        }
    }
}

impl Scorer for LoanClassifierScorer {
    type Record = LoanApplication;
    type Decision = LoanDecision;

    fn name(&self) -> &'static str {
        "loan_classifier"
    }

    fn score(
        &self,
        app: &LoanApplication,
        _noise: &mut dyn NoiseSource,
    ) -> ScoringResult<LoanDecision> {
        app.validate()?;

        let features = self.extractor.loan_features(app);
        let (approved, probability) = self.models.loan.predict(&features)?;

        debug!(
            approval_probability = probability,
            approved = approved,
            "Classifier loan score computed"
        );

        Ok(LoanDecision {
            approved,
            approval_probability: probability,
            decision_reasons: threshold_reasons(app),
        })
    }
}
