//! Classifier components: model, synthetic data, training and scorers

pub mod classifier;
pub mod inference;
pub mod synthetic;
pub mod trainer;

pub use classifier::{FitParams, LogisticModel, Standardizer};
pub use inference::{FraudClassifierScorer, LoanClassifierScorer};
pub use synthetic::LabeledSet;
pub use trainer::{ModelTrainer, TrainedModels, TrainingReport};
