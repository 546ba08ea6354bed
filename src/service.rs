//! Scorer selection and request dispatch

use crate::chatbot::ChatResponder;
use crate::config::{AppConfig, DetectionConfig, ScoringStrategy};
use crate::error::{ScoringError, ScoringResult};
use crate::models::{FraudClassifierScorer, LoanClassifierScorer, ModelTrainer, TrainedModels};
use crate::noise::NoiseSource;
use crate::rules::{FraudRuleScorer, LoanRuleScorer};
use crate::scorer::{FraudScorer, LoanScorer};
use crate::types::{
    ChatQuery, ChatReply, Endpoint, FraudDecision, LoanApplication, LoanDecision, ScoringOutcome,
    ScoringRequest, ScoringResponse, TransactionRecord,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Front door for all three operations.
///
/// Cheap to clone; every scorer is behind an `Arc` and never mutated.
#[derive(Clone)]
pub struct ScoringService {
    strategy: ScoringStrategy,
    fraud: Arc<FraudScorer>,
    loan: Arc<LoanScorer>,
    chat: ChatResponder,
}

impl ScoringService {
    /// Build the service for the configured strategy, training the
    /// classifiers first when the strategy needs them.
    pub fn from_config(config: &AppConfig) -> ScoringResult<Self> {
        match config.scoring.strategy {
            ScoringStrategy::Rules => Ok(Self::rule_based(config.detection.clone())),
            ScoringStrategy::Classifier => {
                let (models, _) = ModelTrainer::new(config.training.clone()).train()?;
                Ok(Self::classifier_based(
                    Arc::new(models),
                    config.detection.clone(),
                ))
            }
        }
    }

    pub fn rule_based(detection: DetectionConfig) -> Self {
        Self {
            strategy: ScoringStrategy::Rules,
            fraud: Arc::new(FraudRuleScorer::new(detection.clone())),
            loan: Arc::new(LoanRuleScorer::new(detection)),
            chat: ChatResponder::new(),
        }
    }

    pub fn classifier_based(models: Arc<TrainedModels>, detection: DetectionConfig) -> Self {
        Self {
            strategy: ScoringStrategy::Classifier,
            fraud: Arc::new(FraudClassifierScorer::new(models.clone(), detection)),
            loan: Arc::new(LoanClassifierScorer::new(models)),
            chat: ChatResponder::new(),
        }
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Scorer names in endpoint order (fraud, loan, chat)
    pub fn scorer_names(&self) -> [&'static str; 3] {
        [self.fraud.name(), self.loan.name(), self.chat.name()]
    }

    fn scorer_for(&self, endpoint: Endpoint) -> &'static str {
        match endpoint {
            Endpoint::FraudDetection => self.fraud.name(),
            Endpoint::LoanApproval => self.loan.name(),
            Endpoint::Chatbot => self.chat.name(),
        }
    }

    pub fn score_fraud(
        &self,
        payload: &serde_json::Value,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResult<FraudDecision> {
        let record = TransactionRecord::from_json(payload)?;
        self.fraud.score(&record, noise)
    }

    pub fn score_loan(
        &self,
        payload: &serde_json::Value,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResult<LoanDecision> {
        let application = LoanApplication::from_json(payload)?;
        self.loan.score(&application, noise)
    }

    pub fn chat(&self, payload: &serde_json::Value) -> ScoringResult<ChatReply> {
        let query = ChatQuery::from_json(payload)?;
        Ok(self.chat.respond(&query))
    }

    /// Dispatch one request envelope. Invalid payloads become error responses.
    pub fn handle(
        &self,
        request: &ScoringRequest,
        noise: &mut dyn NoiseSource,
    ) -> ScoringResponse {
        let outcome: Result<ScoringOutcome, ScoringError> = match request.endpoint {
            Endpoint::FraudDetection => self
                .score_fraud(&request.payload, noise)
                .map(ScoringOutcome::Fraud),
            Endpoint::LoanApproval => self
                .score_loan(&request.payload, noise)
                .map(ScoringOutcome::Loan),
            Endpoint::Chatbot => self.chat(&request.payload).map(ScoringOutcome::Chat),
        };

        if let Err(e) = &outcome {
            warn!(
                endpoint = request.endpoint.as_str(),
                request_id = ?request.id,
                error = %e,
                "Request rejected"
            );
        }

        ScoringResponse::new(request, self.scorer_for(request.endpoint), outcome)
    }

    pub fn log_summary(&self) {
        let [fraud, loan, chat] = self.scorer_names();
        info!(
            strategy = self.strategy.as_str(),
            fraud_scorer = fraud,
            loan_scorer = loan,
            chat_responder = chat,
            "Scoring service ready"
        );
    }
}
