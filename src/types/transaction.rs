//! Transaction records and fraud decisions

use crate::error::{ScoringError, ScoringResult};
use crate::types::wire;
use serde::{Deserialize, Serialize};

/// Merchant category codes treated as high risk (online retail, ATM withdrawal)
pub const HIGH_RISK_MERCHANTS: [u8; 2] = [3, 4];

/// A card transaction submitted for fraud scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction amount, strictly positive
    pub transaction_amount: f64,

    /// Age of the account in days
    pub account_age_days: u32,

    /// Transactions already made on this account today
    pub num_transactions_today: u32,

    /// Hour of day (0-23)
    pub hour_of_day: u8,

    /// Merchant category code (0 = grocery, 1 = gas, 2 = restaurant, 3 = online retail, 4 = ATM)
    pub merchant_category: u8,

    /// Whether the transaction happened on a weekend
    #[serde(deserialize_with = "wire::flag")]
    pub is_weekend: bool,

    /// Location risk in [0, 1]
    pub location_risk_score: f64,
}

impl TransactionRecord {
    /// Decode and validate a record from a JSON payload.
    pub fn from_json(value: &serde_json::Value) -> ScoringResult<Self> {
        let record: Self = wire::decode("transaction", value)?;
        record.validate()?;
        Ok(record)
    }

    /// Check value ranges that the type system does not already enforce.
    pub fn validate(&self) -> ScoringResult<()> {
        if !self.transaction_amount.is_finite() || self.transaction_amount <= 0.0 {
            return Err(ScoringError::invalid(
                "transaction_amount",
                format!("must be a positive number, got {}", self.transaction_amount),
            ));
        }
        if self.hour_of_day > 23 {
            return Err(ScoringError::invalid(
                "hour_of_day",
                format!("must be in 0..=23, got {}", self.hour_of_day),
            ));
        }
        if !(0.0..=1.0).contains(&self.location_risk_score) {
            return Err(ScoringError::invalid(
                "location_risk_score",
                format!("must be in [0, 1], got {}", self.location_risk_score),
            ));
        }
        Ok(())
    }

    pub fn is_night(&self) -> bool {
        self.hour_of_day < 6 || self.hour_of_day > 22
    }

    pub fn is_high_risk_merchant(&self) -> bool {
        HIGH_RISK_MERCHANTS.contains(&self.merchant_category)
    }
}

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a score. Both bounds are exclusive: a score equal to a
    /// threshold falls into the lower bucket.
    pub fn from_score(score: f64, thresholds: &RiskLevelThresholds) -> Self {
        if score > thresholds.high {
            RiskLevel::High
        } else if score > thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Configurable risk level thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLevelThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            medium: 0.3,
            high: 0.7,
        }
    }
}

/// Outcome of fraud scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudDecision {
    pub is_fraud: bool,
    /// Probability of fraud, always within [0, 1]
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "transaction_amount": 120.5,
            "account_age_days": 400,
            "num_transactions_today": 2,
            "hour_of_day": 14,
            "merchant_category": 0,
            "is_weekend": 0,
            "location_risk_score": 0.2
        })
    }

    #[test]
    fn test_from_json_accepts_numeric_weekend_flag() {
        let record = TransactionRecord::from_json(&payload()).unwrap();
        assert!(!record.is_weekend);
        assert_eq!(record.hour_of_day, 14);
    }

    #[test]
    fn test_missing_field_is_invalid_input() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("hour_of_day");
        let err = TransactionRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput { .. }));
        assert!(err.to_string().contains("hour_of_day"));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut value = payload();
        value["hour_of_day"] = json!(24);
        assert!(TransactionRecord::from_json(&value).is_err());

        let mut value = payload();
        value["location_risk_score"] = json!(1.5);
        assert!(TransactionRecord::from_json(&value).is_err());

        let mut value = payload();
        value["transaction_amount"] = json!(0.0);
        assert!(TransactionRecord::from_json(&value).is_err());

        let mut value = payload();
        value["account_age_days"] = json!(-3);
        assert!(TransactionRecord::from_json(&value).is_err());
    }

    #[test]
    fn test_risk_level_from_score() {
        let thresholds = RiskLevelThresholds::default();

        assert_eq!(RiskLevel::from_score(0.1, &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.3, &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.5, &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.7, &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.75, &thresholds), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.27, &thresholds), RiskLevel::High);
    }

    #[test]
    fn test_fraud_decision_wire_format() {
        let decision = FraudDecision {
            is_fraud: true,
            fraud_probability: 0.82,
            risk_level: RiskLevel::High,
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["risk_level"], "HIGH");
        assert_eq!(json["is_fraud"], true);
        assert_eq!(json["fraud_probability"], 0.82);
    }
}
