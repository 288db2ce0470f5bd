use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};

/// Registered hotkey, returned by [`HotkeyRegistrar::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyHandle(u32);

impl HotkeyHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Global hotkey capability provided by the platform layer
pub trait HotkeyRegistrar {
    fn register(&mut self, combo: &str) -> Result<HotkeyHandle>;

    fn unregister(&mut self, handle: HotkeyHandle) -> Result<()>;
}

/// Parse a combination like `alt+KeyX` or `ctrl+shift+KeyS`
pub fn parse_combo(combo: &str) -> Result<HotKey> {
    combo
        .parse::<HotKey>()
        .with_context(|| format!("Invalid hotkey combination '{combo}'"))
}

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkeys: Vec<HotKey>,
}

impl HotkeyManager {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
        Ok(Self {
            manager,
            hotkeys: Vec::new(),
        })
    }

    /// Check for a press of any registered hotkey (non-blocking)
    pub fn poll(&self) -> Option<HotkeyHandle> {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            if let Some(handle) = self.match_event(&event) {
                return Some(handle);
            }
        }
        None
    }

    fn match_event(&self, event: &GlobalHotKeyEvent) -> Option<HotkeyHandle> {
        if event.state != HotKeyState::Pressed {
            return None;
        }
        let matched = self.hotkeys.iter().find(|h| h.id() == event.id);
        if matched.is_none() {
            tracing::debug!("Ignoring event for unknown hotkey id {}", event.id);
        }
        matched.map(|h| HotkeyHandle(h.id()))
    }
}

impl HotkeyRegistrar for HotkeyManager {
    fn register(&mut self, combo: &str) -> Result<HotkeyHandle> {
        let hotkey = parse_combo(combo)?;
        self.manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey '{combo}'"))?;
        self.hotkeys.push(hotkey);
        Ok(HotkeyHandle(hotkey.id()))
    }

    fn unregister(&mut self, handle: HotkeyHandle) -> Result<()> {
        let Some(index) = self.hotkeys.iter().position(|h| h.id() == handle.0) else {
            return Ok(());
        };
        let hotkey = self.hotkeys.remove(index);
        self.manager
            .unregister(hotkey)
            .context("Failed to unregister hotkey")
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for hotkey in self.hotkeys.drain(..) {
            let _ = self.manager.unregister(hotkey);
        }
    }
}
