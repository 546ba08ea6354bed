//! Weighted-rule loan approval and reason selection

use crate::config::DetectionConfig;
use crate::error::ScoringResult;
use crate::noise::NoiseSource;
use crate::scorer::Scorer;
use crate::types::loan::MAX_DECISION_REASONS;
use crate::types::{LoanApplication, LoanDecision};
use tracing::debug;

/// Contribution of one factor: weight added and the reason it reports, if any
type Factor = (f64, Option<&'static str>);

fn credit_factor(credit_score: u16) -> Factor {
    match credit_score {
        s if s >= 700 => (0.4, Some("Excellent credit score")),
        s if s >= 650 => (0.3, Some("Good credit score")),
        s if s >= 600 => (0.2, Some("Fair credit score")),
        _ => (0.0, Some("Low credit score")),
    }
}

fn income_factor(annual_income: f64) -> Factor {
    if annual_income >= 80_000.0 {
        (0.25, Some("High income"))
    } else if annual_income >= 50_000.0 {
        (0.15, Some("Adequate income"))
    } else {
        (0.0, Some("Low income"))
    }
}

fn debt_factor(debt_to_income: f64) -> Factor {
    if debt_to_income <= 0.2 {
        (0.2, Some("Low debt-to-income ratio"))
    } else if debt_to_income <= 0.35 {
        (0.1, Some("Reasonable debt-to-income ratio"))
    } else {
        (0.0, Some("High debt-to-income ratio"))
    }
}

fn employment_factor(years: f64) -> Factor {
    if years >= 5.0 {
        (0.1, Some("Stable employment"))
    } else if years >= 2.0 {
        (0.05, None)
    } else {
        (0.0, None)
    }
}

fn home_factor(app: &LoanApplication) -> Factor {
    if app.home_ownership.is_homeowner() {
        (0.05, Some("Homeowner"))
    } else {
        (0.0, None)
    }
}

/// Loan scorer built from five tiered factors evaluated in a fixed order:
/// credit score, income, debt-to-income, employment length, home ownership.
#[derive(Debug, Clone, Default)]
pub struct LoanRuleScorer {
    detection: DetectionConfig,
}

impl LoanRuleScorer {
    pub fn new(detection: DetectionConfig) -> Self {
        Self { detection }
    }

    /// Unperturbed score plus every reason triggered, in evaluation order
    pub fn evaluate(app: &LoanApplication) -> (f64, Vec<&'static str>) {
        let factors = [
            credit_factor(app.credit_score),
            income_factor(app.annual_income),
            debt_factor(app.debt_to_income),
            employment_factor(app.employment_length_years),
            home_factor(app),
        ];

        let score: f64 = factors.iter().map(|(weight, _)| weight).sum();
        let reasons: Vec<&'static str> =
            factors.iter().filter_map(|(_, reason)| *reason).collect();
        (score, reasons)
    }
}

impl Scorer for LoanRuleScorer {
    type Record = LoanApplication;
    type Decision = LoanDecision;

    fn name(&self) -> &'static str {
        "loan_rules"
    }

    fn score(
        &self,
        app: &LoanApplication,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResult<LoanDecision> {
        app.validate()?;

        let (base, reasons) = Self::evaluate(app);
        let score = base + noise.perturbation();

        debug!(
            raw_score = score,
            reasons_triggered = reasons.len(),
            "Rule loan score computed"
        );

        Ok(LoanDecision {
            approved: score > self.detection.approval_threshold,
            approval_probability: score.clamp(0.0, 1.0),
            decision_reasons: reasons
                .into_iter()
                .take(MAX_DECISION_REASONS)
                .map(String::from)
                .collect(),
        })
    }
}

/// Reasons reported alongside a classifier decision.
///
/// Independent of the classifier itself: checks credit score, then
/// debt-to-income, then income against fixed cut-offs and keeps the first two.
pub fn threshold_reasons(app: &LoanApplication) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_DECISION_REASONS);

    if app.credit_score < 600 {
        reasons.push("Low credit score");
    } else if app.credit_score > 750 {
        reasons.push("Excellent credit score");
    }

    if app.debt_to_income > 0.4 {
        reasons.push("High debt-to-income ratio");
    } else if app.debt_to_income < 0.2 {
        reasons.push("Low debt-to-income ratio");
    }

    if app.annual_income < 40_000.0 {
        reasons.push("Low income");
    } else if app.annual_income > 100_000.0 {
        reasons.push("High income");
    }

    reasons
        .into_iter()
        .take(MAX_DECISION_REASONS)
        .map(String::from)
        .collect()
}
