use std::time::Duration;

use anyhow::Context;
use grabtext_capture::{HotkeyManager, HotkeyRegistrar};
use grabtext_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

/// Poll the global hotkey and forward each press to the event loop
pub async fn hotkey_watcher(
    combo: String,
    poll_interval: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut hotkey_manager = HotkeyManager::new()?;
        hotkey_manager.register(&combo)?;
        tracing::info!("Capture hotkey registered ({})", combo);

        while !cancel.is_cancelled() {
            if hotkey_manager.poll().is_some() {
                tracing::debug!("Capture hotkey pressed");
                match event_tx.try_send(AppEvent::HotkeyPressed) {
                    Ok(true) => {}
                    Ok(false) => tracing::warn!("Event channel full, dropping hotkey press"),
                    Err(e) => {
                        tracing::warn!("Event channel closed: {}", e);
                        break;
                    }
                }
            }

            std::thread::sleep(poll_interval);
        }

        tracing::info!("Hotkey watcher stopping");
        Ok::<_, anyhow::Error>(())
    })
    .await
    .context("Hotkey watcher panicked")?
}
