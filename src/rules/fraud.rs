//! Weighted-rule fraud scoring

use crate::config::DetectionConfig;
use crate::error::ScoringResult;
use crate::noise::NoiseSource;
use crate::scorer::Scorer;
use crate::types::{FraudDecision, RiskLevel, TransactionRecord};
use tracing::debug;

const LARGE_AMOUNT: f64 = 5000.0;
const LARGE_AMOUNT_WEIGHT: f64 = 0.3;
const NIGHT_WEIGHT: f64 = 0.2;
const MERCHANT_WEIGHT: f64 = 0.25;
const BURST_COUNT: u32 = 5;
const BURST_WEIGHT: f64 = 0.15;
const LOCATION_WEIGHT: f64 = 0.3;
const WEEKEND_WEIGHT: f64 = 0.1;

/// Fraud scorer built from fixed additive rule weights.
#[derive(Debug, Clone, Default)]
pub struct FraudRuleScorer {
    detection: DetectionConfig,
}

impl FraudRuleScorer {
    pub fn new(detection: DetectionConfig) -> Self {
        Self { detection }
    }

    /// Sum of rule contributions before perturbation and clamping
    pub fn base_score(tx: &TransactionRecord) -> f64 {
        let mut score = 0.0;

        if tx.transaction_amount > LARGE_AMOUNT {
            score += LARGE_AMOUNT_WEIGHT;
        }
        if tx.is_night() {
            score += NIGHT_WEIGHT;
        }
        if tx.is_high_risk_merchant() {
            score += MERCHANT_WEIGHT;
        }
        if tx.num_transactions_today > BURST_COUNT {
            score += BURST_WEIGHT;
        }
        score += tx.location_risk_score * LOCATION_WEIGHT;
        if tx.is_weekend {
            score += WEEKEND_WEIGHT;
        }

        score
    }
}

impl Scorer for FraudRuleScorer {
    type Record = TransactionRecord;
    type Decision = FraudDecision;

    fn name(&self) -> &'static str {
        "fraud_rules"
    }

    fn score(
        &self,
        tx: &TransactionRecord,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResult<FraudDecision> {
        tx.validate()?;

        let raw = Self::base_score(tx) + noise.perturbation();

        // Risk level is bucketed from the raw score while the probability is
        // clamped, so a raw score below 0 or above 1 still buckets by its raw value.
        let decision = FraudDecision {
            is_fraud: raw > self.detection.fraud_threshold,
            fraud_probability: raw.clamp(0.0, 1.0),
            risk_level: RiskLevel::from_score(raw, &self.detection.risk_levels),
        };

        debug!(
            raw_score = raw,
            fraud_probability = decision.fraud_probability,
            risk_level = decision.risk_level.as_str(),
            "Rule fraud score computed"
        );

        Ok(decision)
    }
}
