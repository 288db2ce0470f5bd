use std::sync::Arc;
use std::time::Duration;

use grabtext_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::hotkey_watcher;
use crate::state::AppState;
use crate::ui::ui_loop;

const HOTKEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // pointer-move bursts
            ui_to_app: kanal::bounded_async(64),  // user input
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Hotkey watcher
        if self.state.config.hotkey.enabled {
            tasks.spawn(hotkey_watcher(
                self.state.config.hotkey.combo.clone(),
                HOTKEY_POLL_INTERVAL,
                self.cancel_token.child_token(),
                self.channels.ui_to_app.0.clone(),
            ));
        } else {
            tracing::warn!("Hotkey disabled, captures must be triggered externally");
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
