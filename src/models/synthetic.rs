//! Synthetic labeled datasets for fitting the classifiers
//!
//! Records are drawn from fixed uniform distributions and labeled by simple
//! heuristic formulas plus noise. Feature vectors go through the same
//! [`FeatureExtractor`] used at inference.

use crate::feature_extractor::{FeatureExtractor, FRAUD_FEATURE_COUNT, LOAN_FEATURE_COUNT};
use crate::types::{HomeOwnership, LoanApplication, TransactionRecord};
use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::Rng;

const LOAN_TERMS: [u32; 8] = [12, 24, 36, 48, 60, 120, 180, 360];

/// Feature matrix with one 0/1 target per row
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSet {
    pub features: Array2<f64>,
    pub targets: Array1<f64>,
}

impl LabeledSet {
    fn with_rows(rows: usize, width: usize) -> Self {
        Self {
            features: Array2::zeros((rows, width)),
            targets: Array1::zeros(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    pub fn positives(&self) -> usize {
        self.targets.iter().filter(|&&y| y > 0.5).count()
    }

    fn put_row(&mut self, index: usize, row: &[f64], label: bool) {
        self.features.row_mut(index).assign(&ArrayView1::from(row));
        self.targets[index] = if label { 1.0 } else { 0.0 };
    }
}

/// Draw one random transaction
pub fn random_transaction<R: Rng + ?Sized>(rng: &mut R) -> TransactionRecord {
    TransactionRecord {
        transaction_amount: rng.gen_range(1.0..10_000.0),
        account_age_days: rng.gen_range(1..3650),
        num_transactions_today: rng.gen_range(1..20),
        hour_of_day: rng.gen_range(0..24),
        merchant_category: rng.gen_range(0..5),
        is_weekend: rng.gen_bool(0.5),
        location_risk_score: rng.gen_range(0.0..1.0),
    }
}

/// Heuristic fraud label: large amounts, bursts of activity and risky
/// locations each add weight, `jitter` in [0, 1) adds up to 0.1.
pub fn fraud_label(tx: &TransactionRecord, jitter: f64) -> bool {
    let mut score = 0.0;
    if tx.transaction_amount > 5000.0 {
        score += 0.3;
    }
    if tx.num_transactions_today > 10 {
        score += 0.2;
    }
    if tx.location_risk_score > 0.8 {
        score += 0.4;
    }
    score + jitter * 0.1 > 0.5
}

/// Generate `n` labeled transactions.
pub fn fraud_dataset<R: Rng + ?Sized>(n: usize, rng: &mut R) -> LabeledSet {
    let extractor = FeatureExtractor::new();
    let mut set = LabeledSet::with_rows(n, FRAUD_FEATURE_COUNT);

    for i in 0..n {
        let tx = random_transaction(rng);
        let label = fraud_label(&tx, rng.gen::<f64>());
        set.put_row(i, &extractor.fraud_features(&tx), label);
    }

    set
}

/// Draw one random loan application
pub fn random_application<R: Rng + ?Sized>(rng: &mut R) -> LoanApplication {
    LoanApplication {
        credit_score: rng.gen_range(300..=850),
        annual_income: rng.gen_range(20_000.0..200_000.0),
        debt_to_income: rng.gen_range(0.0..0.8),
        employment_length_years: rng.gen_range(0.0..30.0),
        loan_amount: rng.gen_range(5_000.0..500_000.0),
        loan_term_months: *LOAN_TERMS.choose(rng).unwrap_or(&36),
        home_ownership: *HomeOwnership::ALL.choose(rng).unwrap_or(&HomeOwnership::None),
    }
}

/// Weighted combination of normalized applicant features, before noise
pub fn loan_quality(app: &LoanApplication) -> f64 {
    let credit = (app.credit_score as f64 - 300.0) / 550.0;
    let income = (app.annual_income / 150_000.0).min(1.0);
    let debt = 1.0 - (app.debt_to_income / 0.6).min(1.0);
    let employment = (app.employment_length_years / 10.0).min(1.0);
    let home = if app.home_ownership.is_homeowner() { 1.0 } else { 0.0 };

    0.4 * credit + 0.25 * income + 0.2 * debt + 0.1 * employment + 0.05 * home
}

/// Generate `n` labeled loan applications.
pub fn loan_dataset<R: Rng + ?Sized>(n: usize, rng: &mut R) -> LabeledSet {
    let extractor = FeatureExtractor::new();
    let mut set = LabeledSet::with_rows(n, LOAN_FEATURE_COUNT);

    for i in 0..n {
        let app = random_application(rng);
        let label = loan_quality(&app) + rng.gen_range(-0.1..0.1) > 0.5;
        set.put_row(i, &extractor.loan_features(&app), label);
    }

    set
}
