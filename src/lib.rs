//! Banking AI Scoring Library
//!
//! Transaction fraud scoring, loan approval scoring and a keyword FAQ
//! chatbot. Fraud and loan requests are answered either by weighted rules
//! or by logistic classifiers fit once on synthetic data at startup.

pub mod chatbot;
pub mod config;
pub mod consumer;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod noise;
pub mod producer;
pub mod rules;
pub mod scorer;
pub mod service;
pub mod types;

pub use chatbot::ChatResponder;
pub use config::{AppConfig, ScoringStrategy};
pub use consumer::RequestReader;
pub use error::{ScoringError, ScoringResult};
pub use feature_extractor::FeatureExtractor;
pub use models::{ModelTrainer, TrainedModels};
pub use noise::{FixedNoise, NoiseSource, UniformNoise};
pub use producer::ResponseWriter;
pub use scorer::Scorer;
pub use service::ScoringService;
pub use types::{
    FraudDecision, LoanApplication, LoanDecision, RiskLevel, ScoringRequest, ScoringResponse,
    TransactionRecord,
};
