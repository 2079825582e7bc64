//! WhoAPI response structures.

use serde::Deserialize;
use serde_json::Value;

/// Body of a WhoAPI `r=taken` response.
///
/// WhoAPI has returned `status` and `taken` both as strings and as numbers,
/// so they are kept as raw JSON values and interpreted by the accessors.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WhoApiResponse {
    #[serde(default)]
    pub(crate) status: Value,
    #[serde(default)]
    pub(crate) status_desc: Option<String>,
    #[serde(default)]
    pub(crate) taken: Value,
}

impl WhoApiResponse {
    /// True when the service reports success (`status` 0).
    pub(crate) fn is_ok(&self) -> bool {
        match &self.status {
            Value::String(s) => s.trim() == "0",
            Value::Number(n) => n.as_i64() == Some(0),
            _ => false,
        }
    }

    /// Service error text, or the raw status when no description was sent.
    pub(crate) fn error_description(&self) -> String {
        self.status_desc
            .clone()
            .unwrap_or_else(|| format!("status {}", self.status))
    }

    /// Registration flag, `None` if absent or not interpretable.
    pub(crate) fn taken(&self) -> Option<bool> {
        match &self.taken {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.trim() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}
