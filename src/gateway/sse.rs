//! Server-Sent Events parsing for streaming chat completions.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DeltaEvent {
    choices: Vec<DeltaChoice>,
}

#[derive(Debug, Deserialize)]
struct DeltaChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Converts a raw SSE byte stream into a stream of text fragments.
///
/// Buffers partial lines across chunk boundaries, yields the content of each
/// `data:` event, and terminates on the `[DONE]` marker. Transport errors are
/// surfaced as stream items so the consumer decides how to recover.
pub fn fragment_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer = String::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("stream error: {e}"));
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line: String = buffer.drain(..=line_end).collect();
                let line = line.trim();

                if line == "data: [DONE]" {
                    return;
                }
                if let Some(fragment) = extract_fragment(line) {
                    yield Ok(fragment);
                }
            }
        }
    }
}

/// Extracts the delta text from one trimmed SSE line.
///
/// Returns `None` for non-data lines, comments, parse errors, and events
/// carrying no content.
fn extract_fragment(line: &str) -> Option<String> {
    let json_str = line.strip_prefix("data: ")?;

    let event = serde_json::from_str::<DeltaEvent>(json_str).ok()?;

    let fragment: String = event
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}
