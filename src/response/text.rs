//! Text transcoding: wrap model output under a client-facing key

use serde_json::{Map, Value};

use crate::backend::{UpstreamBody, UpstreamResult};
use crate::error::{AppError, Result};

/// How the model output is shaped in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The whole text as one string
    Whole,
    /// The text split on `delimiter`, keeping at most `limit` segments in order.
    /// Best effort: relies on the model separating items the way it was asked to.
    Segments {
        delimiter: &'static str,
        limit: usize,
    },
}

/// Split `text` on `delimiter`, keeping the first `limit` segments as produced
pub fn split_segments(text: &str, delimiter: &str, limit: usize) -> Vec<String> {
    text.split(delimiter).take(limit).map(String::from).collect()
}

/// Build `{key: text}` (or `{key: [segments]}`) from an upstream text result
pub fn transcode_text(result: UpstreamResult, key: &str, shape: ResponseShape) -> Result<Value> {
    let text = match result.body {
        UpstreamBody::Text(text) => text,
        UpstreamBody::Binary(_) => {
            return Err(AppError::Internal(format!(
                "upstream '{}' returned binary data where text was expected",
                result.provider
            )))
        }
    };

    let value = match shape {
        ResponseShape::Whole => Value::String(text),
        ResponseShape::Segments { delimiter, limit } => Value::Array(
            split_segments(&text, delimiter, limit)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    };

    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Ok(Value::Object(body))
}
