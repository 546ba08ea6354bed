//! Request and response envelopes exchanged by the line pipeline

use crate::error::ScoringError;
use crate::types::{ChatReply, FraudDecision, LoanDecision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operation a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    FraudDetection,
    LoanApproval,
    Chatbot,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::FraudDetection => "fraud_detection",
            Endpoint::LoanApproval => "loan_approval",
            Endpoint::Chatbot => "chatbot",
        }
    }
}

/// One request line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    /// Caller-supplied correlation id
    #[serde(default)]
    pub id: Option<String>,
    pub endpoint: Endpoint,
    /// Record fields for the targeted endpoint
    pub payload: serde_json::Value,
}

impl ScoringRequest {
    pub fn new(endpoint: Endpoint, payload: serde_json::Value) -> Self {
        Self {
            id: None,
            endpoint,
            payload,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Decision record produced by one of the scorers.
///
/// Serialized untagged so the result carries exactly the decision's own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoringOutcome {
    Fraud(FraudDecision),
    Loan(LoanDecision),
    Chat(ChatReply),
}

/// Error body returned in place of a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ScoringError> for ErrorBody {
    fn from(err: &ScoringError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResponse {
    pub id: String,
    pub endpoint: Endpoint,
    /// Name of the scorer variant that handled the request
    pub scorer: &'static str,
    pub processed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoringOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ScoringResponse {
    /// Build a response for `request`, generating an id when the caller gave none.
    pub fn new(
        request: &ScoringRequest,
        scorer: &'static str,
        outcome: Result<ScoringOutcome, ScoringError>,
    ) -> Self {
        let (result, error) = match outcome {
            Ok(outcome) => (Some(outcome), None),
            Err(err) => (None, Some(ErrorBody::from(&err))),
        };

        Self {
            id: request
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            endpoint: request.endpoint,
            scorer,
            processed_at: Utc::now(),
            result,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;
    use serde_json::json;

    #[test]
    fn test_request_parsing() {
        let line = r#"{"endpoint": "loan_approval", "payload": {"credit_score": 700}}"#;
        let request: ScoringRequest = serde_json::from_str(line).unwrap();
        assert_eq!(request.endpoint, Endpoint::LoanApproval);
        assert!(request.id.is_none());
        assert_eq!(request.payload["credit_score"], 700);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let line = r#"{"endpoint": "visualizations", "payload": {}}"#;
        assert!(serde_json::from_str::<ScoringRequest>(line).is_err());
    }

    #[test]
    fn test_result_serializes_decision_fields_only() {
        let request = ScoringRequest::new(Endpoint::FraudDetection, json!({})).with_id("req-1");
        let decision = FraudDecision {
            is_fraud: false,
            fraud_probability: 0.12,
            risk_level: RiskLevel::Low,
        };
        let response =
            ScoringResponse::new(&request, "fraud_rules", Ok(ScoringOutcome::Fraud(decision)));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], "req-1");
        assert_eq!(value["endpoint"], "fraud_detection");
        assert_eq!(
            value["result"],
            json!({"is_fraud": false, "fraud_probability": 0.12, "risk_level": "LOW"})
        );
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_response_gets_generated_id() {
        let request = ScoringRequest::new(Endpoint::Chatbot, json!({}));
        let err = ScoringError::invalid("message", "missing");
        let response = ScoringResponse::new(&request, "keyword_chatbot", Err(err));

        assert!(response.error.is_some());
        assert!(uuid::Uuid::parse_str(&response.id).is_ok());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["kind"], "invalid_input");
        assert!(value.get("result").is_none());
    }
}
