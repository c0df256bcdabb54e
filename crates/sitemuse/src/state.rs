//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use assistant::{Assistant, AssistantConfig};

use crate::constants::defaults;

/// State shared by all request handlers: the lazily-loaded chat
/// assistant and the outbound HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(assistant_config: AssistantConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::FETCH_TIMEOUT_SECS))
            .user_agent(defaults::USER_AGENT)
            .build()?;
        Ok(Self {
            assistant: Arc::new(Assistant::new(assistant_config)),
            http,
        })
    }
}
