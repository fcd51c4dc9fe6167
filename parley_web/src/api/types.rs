//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status, message}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: Status,
    pub message: String,
}

impl StatusMessage {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}

/// `{status, response}` envelope returned by `/api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub status: Status,
    pub response: String,
}

impl ChatReply {
    #[must_use]
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            response: response.into(),
        }
    }

    #[must_use]
    pub fn error(response: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            response: response.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Missing is treated the same as empty.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    /// Any JSON number; only whole numbers can address a turn.
    pub index: Number,
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

impl DeleteRequest {
    /// Position named by `index`, or `None` when no turn could match it.
    ///
    /// Integral floats such as `1.0` name the same position as `1`.
    /// Fractional values and integers beyond `i64` never match a turn.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn position(&self) -> Option<i64> {
        if let Some(index) = self.index.as_i64() {
            return Some(index);
        }
        let value = self.index.as_f64()?;
        (value.trunc() == value && value.abs() < MAX_EXACT_FLOAT).then(|| value as i64)
    }
}
