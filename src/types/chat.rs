//! Chatbot request and reply records

use crate::error::ScoringResult;
use crate::types::wire;
use serde::{Deserialize, Serialize};

/// Free-text message sent to the chatbot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub message: String,
}

impl ChatQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> ScoringResult<Self> {
        wire::decode("chat_query", value)
    }
}

/// Canned chatbot answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use serde_json::json;

    #[test]
    fn test_query_requires_string_message() {
        assert_eq!(
            ChatQuery::from_json(&json!({"message": "hi"})).unwrap(),
            ChatQuery::new("hi")
        );
        assert!(ChatQuery::from_json(&json!({})).is_err());
        assert!(matches!(
            ChatQuery::from_json(&json!({"message": 42})),
            Err(ScoringError::InvalidInput { field, .. }) if field == "message"
        ));
    }
}
