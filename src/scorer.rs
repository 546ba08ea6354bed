//! Common interface implemented by every fraud and loan scorer

use crate::error::ScoringResult;
use crate::noise::NoiseSource;
use crate::types::{FraudDecision, LoanApplication, LoanDecision, TransactionRecord};

/// Maps one input record to one decision.
///
/// Implementations are immutable once built and shared across concurrent
/// requests; any per-call randomness comes from the `noise` argument.
/// Classifier-backed scorers ignore it.
pub trait Scorer: Send + Sync {
    type Record;
    type Decision;

    /// Stable identifier reported in responses and logs
    fn name(&self) -> &'static str;

    fn score(
        &self,
        record: &Self::Record,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResult<Self::Decision>;
}

/// Any scorer answering fraud requests
pub type FraudScorer = dyn Scorer<Record = TransactionRecord, Decision = FraudDecision>;

/// Any scorer answering loan requests
pub type LoanScorer = dyn Scorer<Record = LoanApplication, Decision = LoanDecision>;
