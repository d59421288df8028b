//! SSE client - connects to the relay stream endpoint

use std::pin::Pin;

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};

/// One server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event name (the relay sets this to the item kind)
    pub event: String,
    /// Data payload, multi-line data joined with newlines
    pub data: String,
}

/// Incremental SSE frame parser
///
/// Fed one line at a time; emits an event on each blank-line dispatch.
/// Comment lines (leading `:`) are keep-alives and are skipped.
#[derive(Debug, Default)]
pub struct FrameParser {
    event: Option<String>,
    data: Vec<String>,
}

impl FrameParser {
    /// Feed one line (without the trailing newline)
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id and retry are not used by the relay
            _ => {}
        }

        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        if self.event.is_none() && self.data.is_empty() {
            return None;
        }
        let event = self.event.take().unwrap_or_else(|| "message".to_string());
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent { event, data })
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// Client for the relay's SSE stream
pub struct SseClient {
    stream: ByteStream,
    parser: FrameParser,
    buf: Vec<u8>,
}

impl SseClient {
    /// Open the stream for one session
    pub async fn connect(url: &str, session: &str, format: &str, replay: usize) -> Result<Self> {
        let response = reqwest::Client::new()
            .get(url)
            .query(&[
                ("session", session),
                ("format", format),
                ("replay", replay.to_string().as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("failed to connect to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("relay rejected stream request ({}): {}", status, body);
        }

        Ok(Self {
            stream: Box::pin(response.bytes_stream()),
            parser: FrameParser::default(),
            buf: Vec::new(),
        })
    }

    /// Receive the next event from the stream
    ///
    /// Returns `Ok(None)` when the relay closes the connection.
    pub async fn recv(&mut self) -> Result<Option<SseEvent>> {
        loop {
            // Drain complete lines already buffered
            while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = self.buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&raw[..raw.len() - 1]).into_owned();
                if let Some(event) = self.parser.feed_line(&line) {
                    return Ok(Some(event));
                }
            }

            // Need more data
            match self.stream.next().await {
                Some(chunk) => {
                    let chunk = chunk.context("failed to read from stream")?;
                    self.buf.extend_from_slice(&chunk);
                }
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
