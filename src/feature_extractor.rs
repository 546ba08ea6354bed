//! Feature extraction for classifier training and inference.
//!
//! Both the synthetic training sets and live requests go through this module,
//! so the column order seen at inference always matches the order the
//! classifiers were fit on.

use crate::types::{LoanApplication, TransactionRecord};

/// Number of features per transaction
pub const FRAUD_FEATURE_COUNT: usize = 7;

/// Number of features per loan application
pub const LOAN_FEATURE_COUNT: usize = 7;

/// Column names for transaction features, in extraction order
pub const FRAUD_FEATURE_NAMES: [&str; FRAUD_FEATURE_COUNT] = [
    "transaction_amount",
    "account_age_days",
    "num_transactions_today",
    "hour_of_day",
    "merchant_category",
    "is_weekend",
    "location_risk_score",
];

/// Column names for loan features, in extraction order
pub const LOAN_FEATURE_NAMES: [&str; LOAN_FEATURE_COUNT] = [
    "credit_score",
    "annual_income",
    "debt_to_income",
    "employment_length_years",
    "loan_amount",
    "loan_term_months",
    "home_ownership",
];

/// Transforms records into model input vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Raw transaction features in [`FRAUD_FEATURE_NAMES`] order.
    pub fn fraud_features(&self, tx: &TransactionRecord) -> [f64; FRAUD_FEATURE_COUNT] {
        [
            tx.transaction_amount,
            tx.account_age_days as f64,
            tx.num_transactions_today as f64,
            tx.hour_of_day as f64,
            tx.merchant_category as f64,
            if tx.is_weekend { 1.0 } else { 0.0 },
            tx.location_risk_score,
        ]
    }

    /// Raw loan features in [`LOAN_FEATURE_NAMES`] order.
    ///
    /// Home ownership is encoded with its form code (0 none, 1 own, 2 mortgage).
    pub fn loan_features(&self, app: &LoanApplication) -> [f64; LOAN_FEATURE_COUNT] {
        [
            app.credit_score as f64,
            app.annual_income,
            app.debt_to_income,
            app.employment_length_years,
            app.loan_amount,
            app.loan_term_months as f64,
            app.home_ownership.code() as f64,
        ]
    }
}
