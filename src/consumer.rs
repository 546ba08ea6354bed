//! Line-delimited request reader

use anyhow::Result;
use futures::stream::{self, Stream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::info;

/// Reads JSON request lines from any buffered async source
pub struct RequestReader<R> {
    reader: R,
    source: String,
}

impl<R> RequestReader<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Create a new request reader; `source` names the input in logs
    pub fn new(reader: R, source: &str) -> Self {
        Self {
            reader,
            source: source.to_string(),
        }
    }

    /// Stream of non-blank lines, ending at EOF or on the first read error
    pub fn subscribe(self) -> impl Stream<Item = Result<String>> + Send {
        info!(source = %self.source, "Reading requests");

        stream::unfold(Some(self.reader.lines()), |state| async move {
            let mut lines: Lines<R> = match state {
                Some(lines) => lines,
                None => return None,
            };
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => return Some((Ok(line), Some(lines))),
                    Ok(None) => return None,
                    Err(e) => return Some((Err(e.into()), None)),
                }
            }
        })
    }
}
