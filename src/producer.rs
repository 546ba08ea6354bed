//! Line-delimited response writer

use crate::types::ScoringResponse;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::debug;

/// Writes one JSON response per line to a shared sink
pub struct ResponseWriter<W> {
    sink: Arc<Mutex<W>>,
}

impl<W> Clone for ResponseWriter<W> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
        }
    }
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Publish a response as a single line
    pub async fn publish(&self, response: &ScoringResponse) -> Result<()> {
        let mut line = serde_json::to_vec(response).context("Failed to serialize response")?;
        line.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_all(&line).await.context("Failed to write response")?;
        sink.flush().await.context("Failed to flush response")?;

        debug!(
            request_id = %response.id,
            endpoint = response.endpoint.as_str(),
            "Published response"
        );

        Ok(())
    }

    /// Recover the sink once every clone has been dropped
    pub fn into_inner(self) -> Option<W> {
        Arc::try_unwrap(self.sink).ok().map(Mutex::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatReply, Endpoint, ScoringOutcome, ScoringRequest};
    use serde_json::json;

    fn response(id: &str) -> ScoringResponse {
        let request = ScoringRequest::new(Endpoint::Chatbot, json!({"message": "hi"})).with_id(id);
        let reply = ChatReply {
            response: "hello".to_string(),
        };
        ScoringResponse::new(&request, "keyword_chatbot", Ok(ScoringOutcome::Chat(reply)))
    }

    #[tokio::test]
    async fn test_publish_writes_json_lines() {
        let writer = ResponseWriter::new(Vec::new());
        let clone = writer.clone();
        writer.publish(&response("a")).await.unwrap();
        clone.publish(&response("b")).await.unwrap();
        drop(clone);

        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "a");
        assert_eq!(first["result"]["response"], "hello");
    }
}
