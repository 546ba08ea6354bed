//! Type definitions for scoring records, decisions and pipeline envelopes

pub mod chat;
pub mod loan;
pub mod request;
pub mod transaction;
mod wire;

pub use chat::{ChatQuery, ChatReply};
pub use loan::{HomeOwnership, LoanApplication, LoanDecision};
pub use request::{Endpoint, ScoringOutcome, ScoringRequest, ScoringResponse};
pub use transaction::{FraudDecision, RiskLevel, RiskLevelThresholds, TransactionRecord};
