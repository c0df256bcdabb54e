//! Request and response types for the chat pipeline

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The bundle of current page code and metadata supplied with each chat
/// turn. Nothing here is persisted across requests.
///
/// Only the three code sections feed the prompt; the metadata fields are
/// accepted as loose JSON so partial or extended payloads deserialize
/// without friction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatContext {
    pub html: String,
    pub css: String,
    pub js: String,
    pub structure: serde_json::Value,
    pub meta: serde_json::Value,
    pub links: serde_json::Value,
    pub scripts: serde_json::Value,
    pub styles: serde_json::Value,
    pub images: serde_json::Value,
}

impl ChatContext {
    /// Code sections in prompt order.
    pub fn code_sections(&self) -> [(&'static str, &str); 3] {
        [("html", &self.html), ("css", &self.css), ("js", &self.js)]
    }
}

/// The assistant's reply: a cleaned message plus any code blocks
/// extracted from it, keyed by language tag. `suggested_changes` is
/// `None` when the pipeline failed and the message carries the error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub suggested_changes: Option<HashMap<String, String>>,
}
