//! OpenAI-compatible SSE stream to text chunk adapter.
//!
//! Chat completion streams arrive as `data: {json}` frames terminated by
//! `data: [DONE]`. Each frame's `choices[0].delta.content` becomes one text
//! chunk; frames without content (role announcements, finish reasons) are
//! skipped.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use serde::Deserialize;

use pressroom_core::action::TextStream;
use pressroom_types::error::ActionError;

#[derive(Debug, Deserialize)]
struct ChunkFrame {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the text delta from one SSE `data` payload.
pub(crate) fn parse_frame(data: &str) -> Result<Option<String>, ActionError> {
    let frame: ChunkFrame = serde_json::from_str(data)
        .map_err(|e| ActionError::Stream(format!("malformed completion chunk: {e}")))?;
    Ok(frame
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|text| !text.is_empty()))
}

/// Map a successful streaming completion response to a [`TextStream`].
pub fn create_text_stream(response: reqwest::Response) -> TextStream {
    Box::pin(async_stream::try_stream! {
        let mut events = response.bytes_stream().eventsource();

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| ActionError::Stream(format!("response body read: {e}")))?;
            let data = event.data.trim();
            if data.is_empty() {
                continue;
            }
            if data == "[DONE]" {
                break;
            }
            if let Some(text) = parse_frame(data)? {
                yield text;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_text_delta() {
        let data = r#"{"id":"c1","choices":[{"index":0,"delta":{"content":"Hel"}}]}"#;
        assert_eq!(parse_frame(data).unwrap().as_deref(), Some("Hel"));
    }

    #[test]
    fn test_parse_frame_without_content() {
        let role = r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_frame(role).unwrap(), None);

        let finish = r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
        assert_eq!(parse_frame(finish).unwrap(), None);

        let usage = r#"{"choices":[],"usage":{"prompt_tokens":3}}"#;
        assert_eq!(parse_frame(usage).unwrap(), None);
    }

    #[test]
    fn test_parse_frame_malformed() {
        assert!(matches!(parse_frame("{not json"), Err(ActionError::Stream(_))));
    }
}
