use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_combo() -> String {
    "alt+KeyX".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HotkeyConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Key combination in `global-hotkey` syntax, e.g. `ctrl+shift+KeyS`
    #[serde(default = "default_combo")]
    pub combo: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            combo: default_combo(),
        }
    }
}
