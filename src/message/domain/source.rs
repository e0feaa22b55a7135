//! Where the documents for an import come from.

use serde::Serialize;
use serde_json::Value;

/// The `fileUrl` / `data` pair carried by import-style messages.
///
/// At least one side is always present; both may be.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl ImportSource {
    /// Builds a source, returning `None` when both sides are absent.
    #[must_use]
    pub fn new(file_url: Option<String>, data: Option<Value>) -> Option<Self> {
        if file_url.is_none() && data.is_none() {
            return None;
        }
        Some(Self { file_url, data })
    }

    /// Returns the remote file location, if supplied.
    #[must_use]
    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    /// Returns the inline payload, if supplied.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}
