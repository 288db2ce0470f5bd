use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_timeout_seconds() -> u64 {
    30
}

/// Recognition service connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the vision resource, e.g. `https://myres.cognitiveservices.azure.com`
    pub endpoint: String,
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    pub api_key: String,
    /// Optional BCP-47 language hint; the service auto-detects when unset
    pub language: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            language: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
