use std::sync::Arc;

use grabtext_capture::{RegionSelector, SelectionOutcome};
use grabtext_types::{AppEvent, OverlayEvent, SessionId, UiState};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::ui::{ChannelOverlay, ChannelPresenter};

pub mod session;

use session::{Session, Stage};

/// App's main loop. Owns the current capture session; a new hotkey press replaces it.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session: Option<Session> = None;

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("Event loop stopping");
                return Ok(());
            }
        };

        tracing::trace!("Event received: {:?}", event);
        handle_event(&state, &mut session, &app_to_ui_tx, event).await;
    }
}

async fn handle_event(
    state: &AppState,
    session: &mut Option<Session>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) {
    match event {
        AppEvent::HotkeyPressed => {
            if let Some(old) = session.take() {
                tracing::debug!("[{}] Replaced by new capture", old.id);
                if matches!(old.stage, Stage::Selecting(_)) {
                    send(app_to_ui_tx, AppEvent::OverlayClosed { session: old.id }).await;
                }
            }

            let id = SessionId::new();
            tracing::info!("[{}] Capture started", id);
            let overlay = ChannelOverlay::open(id, app_to_ui_tx.clone());
            let selector = RegionSelector::new(
                overlay,
                Arc::clone(&state.rasterizer),
                state.config.capture.settle_delay(),
            );
            *session = Some(Session::new(id, selector));
        }
        AppEvent::Overlay(overlay_event) => {
            handle_overlay_event(state, session, app_to_ui_tx, overlay_event).await;
        }
        AppEvent::ProcessCapture => {
            let Some(current) = session.as_mut() else {
                tracing::debug!("Convert requested without a capture");
                return;
            };
            if current.is_converting() {
                tracing::debug!("[{}] Conversion already running", current.id);
                return;
            }
            if let Stage::Results {
                orchestrator,
                conversion,
            } = &mut current.stage
            {
                let orchestrator = Arc::clone(orchestrator);
                *conversion = Some(tokio::spawn(async move {
                    orchestrator.process_capture().await
                }));
            }
        }
        AppEvent::CloseResults => {
            if let Some(closed) = session.take() {
                tracing::info!("[{}] Session closed", closed.id);
            }
        }
        other => {
            tracing::debug!("Ignoring outbound event on inbound channel: {:?}", other);
        }
    }
}

async fn handle_overlay_event(
    state: &AppState,
    session: &mut Option<Session>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: OverlayEvent,
) {
    let Some(current) = session.as_mut() else {
        return;
    };
    let id = current.id;
    let Stage::Selecting(selector) = &mut current.stage else {
        return;
    };

    match selector.handle(event).await {
        Ok(SelectionOutcome::Pending) => {}
        Ok(SelectionOutcome::Cancelled) => {
            tracing::info!("[{}] Capture cancelled", id);
            *session = None;
        }
        Ok(SelectionOutcome::Captured(image)) => {
            send(
                app_to_ui_tx,
                AppEvent::CaptureReady {
                    session: id,
                    width: image.width(),
                    height: image.height(),
                },
            )
            .await;
            send(
                app_to_ui_tx,
                AppEvent::ButtonState {
                    session: id,
                    state: UiState::default(),
                },
            )
            .await;

            let presenter = ChannelPresenter::new(id, app_to_ui_tx.clone());
            current.show_results(image, Arc::clone(&state.recognizer), presenter);
        }
        Err(e) => {
            tracing::error!("[{}] Capture failed: {}", id, e);
            send(
                app_to_ui_tx,
                AppEvent::CaptureFailed {
                    session: id,
                    message: e.to_string(),
                },
            )
            .await;
            *session = None;
        }
    }
}

async fn send(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!("Failed to send event to UI: {}", e);
    }
}
