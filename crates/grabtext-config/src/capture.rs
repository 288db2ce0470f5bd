use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_settle_delay_ms() -> u64 {
    150
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Wait after hiding the overlay before copying pixels
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl CaptureConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}
