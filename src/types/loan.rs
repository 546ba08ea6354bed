//! Loan applications and approval decisions

use crate::error::{ScoringError, ScoringResult};
use crate::types::wire;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest and highest credit scores accepted
pub const CREDIT_SCORE_RANGE: std::ops::RangeInclusive<u16> = 300..=850;

/// Most reasons a decision carries
pub const MAX_DECISION_REASONS: usize = 2;

/// Applicant housing situation.
///
/// On the wire this is either the lower-case name or the numeric code used
/// by the loan form (0 = none, 1 = own, 2 = mortgage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeOwnership {
    None,
    Own,
    Mortgage,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 3] = [
        HomeOwnership::None,
        HomeOwnership::Own,
        HomeOwnership::Mortgage,
    ];

    /// Owners and mortgage holders both count as homeowners
    pub fn is_homeowner(&self) -> bool {
        matches!(self, HomeOwnership::Own | HomeOwnership::Mortgage)
    }

    pub fn code(&self) -> u8 {
        match self {
            HomeOwnership::None => 0,
            HomeOwnership::Own => 1,
            HomeOwnership::Mortgage => 2,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(HomeOwnership::None),
            1 => Some(HomeOwnership::Own),
            2 => Some(HomeOwnership::Mortgage),
            _ => None,
        }
    }
}

struct HomeOwnershipVisitor;

impl<'de> Visitor<'de> for HomeOwnershipVisitor {
    type Value = HomeOwnership;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("one of \"none\", \"own\", \"mortgage\" or the code 0, 1, 2")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<HomeOwnership, E> {
        HomeOwnership::from_code(v).ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<HomeOwnership, E> {
        u64::try_from(v)
            .ok()
            .and_then(HomeOwnership::from_code)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
    }

    /// Whole-number floats such as `1.0` count as codes
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<HomeOwnership, E> {
        if v.fract() == 0.0 && (0.0..=2.0).contains(&v) {
            self.visit_u64(v as u64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<HomeOwnership, E> {
        match v.to_ascii_lowercase().as_str() {
            "none" => Ok(HomeOwnership::None),
            "own" => Ok(HomeOwnership::Own),
            "mortgage" => Ok(HomeOwnership::Mortgage),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for HomeOwnership {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HomeOwnershipVisitor)
    }
}

/// A loan application submitted for approval scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// FICO-style score (300-850)
    pub credit_score: u16,
    pub annual_income: f64,
    /// Monthly debt over monthly income, typically 0-1
    pub debt_to_income: f64,
    pub employment_length_years: f64,
    pub loan_amount: f64,
    pub loan_term_months: u32,
    pub home_ownership: HomeOwnership,
}

impl LoanApplication {
    /// Decode and validate an application from a JSON payload.
    pub fn from_json(value: &serde_json::Value) -> ScoringResult<Self> {
        let application: Self = wire::decode("loan_application", value)?;
        application.validate()?;
        Ok(application)
    }

    pub fn validate(&self) -> ScoringResult<()> {
        if !CREDIT_SCORE_RANGE.contains(&self.credit_score) {
            return Err(ScoringError::invalid(
                "credit_score",
                format!("must be in 300..=850, got {}", self.credit_score),
            ));
        }
        positive("annual_income", self.annual_income)?;
        non_negative("debt_to_income", self.debt_to_income)?;
        non_negative("employment_length_years", self.employment_length_years)?;
        positive("loan_amount", self.loan_amount)?;
        if self.loan_term_months == 0 {
            return Err(ScoringError::invalid("loan_term_months", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> ScoringResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> ScoringResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScoringError::invalid(field, format!("must be a non-negative number, got {value}")))
    }
}

/// Outcome of loan scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub approved: bool,
    /// Approval probability, always within [0, 1]
    pub approval_probability: f64,
    /// At most two reasons, in rule evaluation order
    pub decision_reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "credit_score": 720,
            "annual_income": 90000.0,
            "debt_to_income": 0.15,
            "employment_length_years": 6,
            "loan_amount": 25000,
            "loan_term_months": 36,
            "home_ownership": 1
        })
    }

    #[test]
    fn test_from_json_with_numeric_home_code() {
        let app = LoanApplication::from_json(&payload()).unwrap();
        assert_eq!(app.home_ownership, HomeOwnership::Own);
        assert_eq!(app.employment_length_years, 6.0);
    }

    #[test]
    fn test_home_ownership_names() {
        let mut value = payload();
        value["home_ownership"] = json!("mortgage");
        let app = LoanApplication::from_json(&value).unwrap();
        assert_eq!(app.home_ownership, HomeOwnership::Mortgage);
        assert!(app.home_ownership.is_homeowner());
        assert!(!HomeOwnership::None.is_homeowner());

        value["home_ownership"] = json!(7);
        assert!(LoanApplication::from_json(&value).is_err());
    }

    #[test]
    fn test_invalid_ranges() {
        for (field, bad) in [
            ("credit_score", json!(299)),
            ("credit_score", json!(851)),
            ("annual_income", json!(0)),
            ("debt_to_income", json!(-0.1)),
            ("employment_length_years", json!(-1)),
            ("loan_term_months", json!(0)),
        ] {
            let mut value = payload();
            value[field] = bad;
            let err = LoanApplication::from_json(&value).unwrap_err();
            assert!(
                matches!(err, ScoringError::InvalidInput { .. }),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn test_wrong_type_names_field() {
        let mut value = payload();
        value["credit_score"] = json!("excellent");
        match LoanApplication::from_json(&value) {
            Err(ScoringError::InvalidInput { field, .. }) => assert_eq!(field, "credit_score"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_whole_number_float_home_code() {
        let mut value = payload();
        value["home_ownership"] = json!(2.0);
        let app = LoanApplication::from_json(&value).unwrap();
        assert_eq!(app.home_ownership, HomeOwnership::Mortgage);

        for bad in [json!(1.5), json!(3.0), json!(-1.0)] {
            value["home_ownership"] = bad;
            assert!(LoanApplication::from_json(&value).is_err());
        }
    }
}
