//! Server-sent event parsing for OpenAI-compatible streaming responses

use super::unified_provider::ProviderError;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use std::pin::Pin;

/// Stream of content deltas from one provider
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send>>;

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Incremental `data:` line parser
///
/// Bytes are buffered until a full line is available, so chunk boundaries may fall anywhere,
/// including inside a multi-byte character.
pub struct ChatSseParser {
    provider: &'static str,
    buffer: Vec<u8>,
    done: bool,
}

impl ChatSseParser {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// True once `[DONE]` was seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed raw bytes and return the content deltas completed by them
    pub fn process_chunk(&mut self, chunk: &[u8]) -> Result<Vec<String>, ProviderError> {
        self.buffer.extend_from_slice(chunk);
        let mut deltas = Vec::new();

        while let Some(newline_pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            if self.done {
                continue;
            }
            let line = std::str::from_utf8(&line).map_err(|e| {
                ProviderError::response_parsing(self.provider, format!("Invalid UTF-8: {}", e))
            })?;
            if let Some(delta) = self.parse_line(line.trim())? {
                deltas.push(delta);
            }
        }

        Ok(deltas)
    }

    /// Parse whatever is left when the upstream closes without a trailing newline
    pub fn finish(&mut self) -> Result<Option<String>, ProviderError> {
        if self.done || self.buffer.is_empty() {
            return Ok(None);
        }
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8(rest).map_err(|e| {
            ProviderError::response_parsing(self.provider, format!("Invalid UTF-8: {}", e))
        })?;
        self.parse_line(line.trim())
    }

    fn parse_line(&mut self, line: &str) -> Result<Option<String>, ProviderError> {
        let Some(data) = line.strip_prefix("data:") else {
            return Ok(None);
        };
        let data = data.trim_start();

        if data == "[DONE]" {
            self.done = true;
            return Ok(None);
        }

        let chunk: StreamChunk = serde_json::from_str(data).map_err(|e| {
            ProviderError::response_parsing(self.provider, format!("Invalid JSON: {}", e))
        })?;

        Ok(chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty()))
    }
}

/// Turn an upstream byte stream into a stream of content deltas
pub fn delta_stream<S>(provider: &'static str, upstream: S) -> DeltaStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut parser = ChatSseParser::new(provider);
        let mut upstream = Box::pin(upstream);

        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(bytes) => match parser.process_chunk(&bytes) {
                    Ok(deltas) => {
                        for delta in deltas {
                            yield Ok(delta);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                },
                Err(e) => {
                    yield Err(ProviderError::from_reqwest(provider, e));
                    return;
                }
            }
            if parser.is_done() {
                return;
            }
        }

        match parser.finish() {
            Ok(Some(delta)) => yield Ok(delta),
            Ok(None) => {}
            Err(e) => yield Err(e),
        }
    })
}
