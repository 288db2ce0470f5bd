use grabtext_capture::Overlay;
use grabtext_core::{ResultPayload, ResultPresenter};
use grabtext_types::{AppEvent, ScreenRect, SessionId, UiState};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

/// Push an outbound event without waiting. A full or closed channel drops it, so overlay
/// frames may be skipped; result notifications go through [`ChannelPresenter`]'s relay.
fn notify(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    match tx.try_send(event) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("UI channel full, dropping event"),
        Err(e) => tracing::warn!("UI channel closed: {}", e),
    }
}

/// Overlay that forwards drawing commands to the presentation layer
pub struct ChannelOverlay {
    session: SessionId,
    tx: AsyncSender<AppEvent>,
}

impl ChannelOverlay {
    pub fn open(session: SessionId, tx: AsyncSender<AppEvent>) -> Self {
        notify(&tx, AppEvent::OverlayOpened { session });
        Self { session, tx }
    }
}

impl Overlay for ChannelOverlay {
    fn show_hole(&mut self, hole: ScreenRect) {
        notify(
            &self.tx,
            AppEvent::OverlayHole {
                session: self.session,
                rect: hole,
            },
        );
    }

    fn clear_hole(&mut self) {
        // An empty hole dims the whole surface
        notify(
            &self.tx,
            AppEvent::OverlayHole {
                session: self.session,
                rect: ScreenRect::default(),
            },
        );
    }

    fn hide(&mut self) {
        notify(
            &self.tx,
            AppEvent::OverlayHidden {
                session: self.session,
            },
        );
    }

    fn close(&mut self) {
        notify(
            &self.tx,
            AppEvent::OverlayClosed {
                session: self.session,
            },
        );
    }
}

/// Result surface reached through the outbound channel.
///
/// Notifications go through an unbounded relay drained by a forwarding task, so a busy UI
/// channel delays them instead of dropping them. Order is preserved and events queued before
/// the presenter is dropped are still delivered.
pub struct ChannelPresenter {
    session: SessionId,
    relay: AsyncSender<AppEvent>,
}

impl ChannelPresenter {
    /// Must be called from within a tokio runtime.
    pub fn new(session: SessionId, tx: AsyncSender<AppEvent>) -> Self {
        let (relay, queued) = kanal::unbounded_async();
        tokio::spawn(forward(queued, tx));
        Self { session, relay }
    }
}

async fn forward(queued: AsyncReceiver<AppEvent>, tx: AsyncSender<AppEvent>) {
    while let Ok(event) = queued.recv().await {
        if let Err(e) = tx.send(event).await {
            tracing::warn!("UI channel closed, dropping result notifications: {}", e);
            break;
        }
    }
}

impl ResultPresenter for ChannelPresenter {
    fn set_button_state(&self, disabled: bool, label: &str) {
        notify(
            &self.relay,
            AppEvent::ButtonState {
                session: self.session,
                state: UiState {
                    disabled,
                    label: label.to_string(),
                },
            },
        );
    }

    fn update_results(&self, payload: ResultPayload) {
        notify(
            &self.relay,
            AppEvent::UpdateResults {
                session: self.session,
                html: payload.to_html(),
                plain: payload.to_plain_text(),
            },
        );
    }
}

/// Prints final results for the one-shot modes
#[derive(Default)]
pub struct StdoutPresenter;

impl ResultPresenter for StdoutPresenter {
    fn set_button_state(&self, disabled: bool, label: &str) {
        tracing::debug!("Button: {} (disabled: {})", label, disabled);
    }

    fn update_results(&self, payload: ResultPayload) {
        match payload {
            ResultPayload::Processing => tracing::info!("{}", payload.to_plain_text()),
            ResultPayload::Failed(_) => eprintln!("{}", payload.to_plain_text()),
            _ => println!("{}", payload.to_plain_text()),
        }
    }
}

/// Stand-in presentation layer: follows the newest session and logs what it would render
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut current: Option<SessionId> = None;

    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("UI loop stopping");
                return Ok(());
            }
        };

        if let AppEvent::OverlayOpened { session } = &event {
            current = Some(*session);
        }
        if event_session(&event) != current {
            tracing::debug!("Dropping event for stale session");
            continue;
        }

        match event {
            AppEvent::OverlayOpened { session } => {
                tracing::info!("[{}] Overlay opened, drag to select", session)
            }
            AppEvent::OverlayHole { rect, .. } => tracing::trace!("Selection {}", rect),
            AppEvent::OverlayHidden { .. } => tracing::debug!("Overlay hidden"),
            AppEvent::OverlayClosed { .. } => tracing::debug!("Overlay closed"),
            AppEvent::CaptureReady { width, height, .. } => {
                tracing::info!("Captured {}x{}, ready to convert", width, height)
            }
            AppEvent::ButtonState { state, .. } => {
                tracing::info!("Button: {} (disabled: {})", state.label, state.disabled)
            }
            AppEvent::UpdateResults { plain, .. } => tracing::info!("Results:\n{}", plain),
            AppEvent::CaptureFailed { message, .. } => {
                tracing::error!("Capture failed: {}", message)
            }
            _ => {}
        }
    }
}

fn event_session(event: &AppEvent) -> Option<SessionId> {
    match event {
        AppEvent::OverlayOpened { session }
        | AppEvent::OverlayHole { session, .. }
        | AppEvent::OverlayHidden { session }
        | AppEvent::OverlayClosed { session }
        | AppEvent::CaptureReady { session, .. }
        | AppEvent::ButtonState { session, .. }
        | AppEvent::UpdateResults { session, .. }
        | AppEvent::CaptureFailed { session, .. } => Some(*session),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_overlay_commands_tagged_with_session() {
        let (tx, rx) = kanal::unbounded_async::<AppEvent>();
        let session = SessionId::new();

        let mut overlay = ChannelOverlay::open(session, tx);
        overlay.show_hole(ScreenRect::new(1, 2, 3, 4));
        overlay.clear_hole();
        overlay.close();

        let rx = rx.to_sync();
        assert!(matches!(
            rx.try_recv(),
            Ok(Some(AppEvent::OverlayOpened { session: s })) if s == session
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(Some(AppEvent::OverlayHole { rect, .. })) if rect == ScreenRect::new(1, 2, 3, 4)
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(Some(AppEvent::OverlayHole { rect, .. })) if rect.is_empty()
        ));
        assert!(matches!(rx.try_recv(), Ok(Some(AppEvent::OverlayClosed { .. }))));
    }

    async fn next(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for UI event")
            .expect("UI channel closed")
    }

    #[tokio::test]
    async fn test_presenter_renders_both_forms() {
        let (tx, rx) = kanal::unbounded_async::<AppEvent>();
        let presenter = ChannelPresenter::new(SessionId::new(), tx);

        presenter.update_results(ResultPayload::NoText);
        presenter.set_button_state(true, "Converting...");

        match next(&rx).await {
            AppEvent::UpdateResults { html, plain, .. } => {
                assert_eq!(html, "<p>No text was detected.</p>");
                assert_eq!(plain, "No text was detected.");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            next(&rx).await,
            AppEvent::ButtonState { state, .. } if state == UiState::busy()
        ));
    }

    #[tokio::test]
    async fn test_full_channel_still_delivers_final_button_state() {
        let (tx, rx) = kanal::bounded_async::<AppEvent>(2);
        let session = SessionId::new();
        let presenter = ChannelPresenter::new(session, tx);

        // Nobody reads until the whole conversion has reported
        presenter.set_button_state(true, "Converting...");
        presenter.update_results(ResultPayload::Processing);
        presenter.update_results(ResultPayload::NoText);
        presenter.set_button_state(false, "Convert to Text");
        drop(presenter);

        let mut events = Vec::new();
        for _ in 0..4 {
            events.push(next(&rx).await);
        }

        assert!(matches!(
            &events[0],
            AppEvent::ButtonState { state, .. } if *state == UiState::busy()
        ));
        assert!(matches!(
            &events[2],
            AppEvent::UpdateResults { plain, .. } if plain == "No text was detected."
        ));
        match &events[3] {
            AppEvent::ButtonState { session: s, state } => {
                assert_eq!(*s, session);
                assert_eq!(*state, UiState::default());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_channel_does_not_panic() {
        let (tx, rx) = kanal::bounded_async::<AppEvent>(1);
        drop(rx);
        let presenter = ChannelPresenter::new(SessionId::new(), tx);
        presenter.update_results(ResultPayload::Processing);
        presenter.set_button_state(false, "Convert to Text");
        tokio::task::yield_now().await;
    }
}
