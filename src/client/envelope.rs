//! Request and response envelopes exchanged with the content API.

use crate::content_store::ImageSlot;
use serde_json::Value;
use thiserror::Error;

/// Longest slice of an unparseable body echoed back in an error.
const MAX_DETAIL_LEN: usize = 200;

/// A file selected in a form, sent as one multipart part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub slot: ImageSlot,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn field_name(&self) -> &'static str {
        self.slot.field_name()
    }
}

/// A record ready for transport: the JSON `data` field plus files.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub data: Value,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server replied with a non-JSON body, or a failure status without
    /// an application error payload.
    #[error("Invalid response from server (status {status}): {detail}")]
    Transport { status: u16, detail: String },

    /// `{success: false, error}` reply.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// The request never completed.
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built; nothing was sent.
    #[error("Failed to encode request: {0}")]
    Encoding(String),
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty body".to_string();
    }
    match trimmed.char_indices().nth(MAX_DETAIL_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Classifies a raw reply from the content API.
///
/// Returns the decoded JSON object on a successful reply.
pub fn parse_envelope(status: u16, body: &str) -> Result<Value, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return Err(ApiError::Transport {
                status,
                detail: snippet(body),
            })
        }
    };

    let error_message = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Application {
            status,
            message: error_message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    if !(200..300).contains(&status) {
        return Err(ApiError::Transport {
            status,
            detail: error_message.unwrap_or_else(|| snippet(body)),
        });
    }

    Ok(value)
}

/// The `data` member of a successful envelope.
pub fn envelope_data(mut value: Value) -> Result<Value, ApiError> {
    match value.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(ApiError::Transport {
            status: 200,
            detail: "missing 'data' in response".to_string(),
        }),
    }
}
