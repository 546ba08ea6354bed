//! Hand-written rule scorers

pub mod fraud;
pub mod loan;

pub use fraud::FraudRuleScorer;
pub use loan::{threshold_reasons, LoanRuleScorer};
