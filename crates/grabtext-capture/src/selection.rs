use std::sync::Arc;
use std::time::Duration;

use grabtext_types::{OverlayEvent, Point, PointerButton, ScreenRect};

use crate::capture::{CapturedImage, ScreenRasterizer};
use crate::error::CaptureError;
use crate::overlay::Overlay;

/// Selection phases. Transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    Selecting,
    Finalizing,
    Closed,
}

#[derive(Debug)]
pub enum SelectionOutcome {
    /// Session still open, keep feeding events
    Pending,
    /// Closed without a capture (Escape or zero-size selection)
    Cancelled,
    Captured(CapturedImage),
}

/// Drag-to-select state machine for one overlay lifetime
pub struct RegionSelector<O, R: ?Sized> {
    overlay: O,
    rasterizer: Arc<R>,
    settle_delay: Duration,
    phase: Phase,
    start: Point,
    rect: ScreenRect,
}

impl<O, R> RegionSelector<O, R>
where
    O: Overlay,
    R: ScreenRasterizer + ?Sized + 'static,
{
    pub fn new(overlay: O, rasterizer: Arc<R>, settle_delay: Duration) -> Self {
        Self {
            overlay,
            rasterizer,
            settle_delay,
            phase: Phase::Idle,
            start: Point::default(),
            rect: ScreenRect::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current (or finalized) selection rectangle
    pub fn selection(&self) -> ScreenRect {
        self.rect
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Feed one overlay event.
    ///
    /// A primary pointer-up on a non-empty selection hides the overlay, waits the settle delay
    /// and rasterizes; the session is closed afterwards whether or not the copy succeeded.
    pub async fn handle(&mut self, event: OverlayEvent) -> Result<SelectionOutcome, CaptureError> {
        match (self.phase, event) {
            (Phase::Finalizing | Phase::Closed, _) => Ok(SelectionOutcome::Pending),
            (_, OverlayEvent::Cancel) => {
                tracing::debug!("Selection cancelled");
                self.close();
                Ok(SelectionOutcome::Cancelled)
            }
            (
                Phase::Idle,
                OverlayEvent::PointerDown {
                    position,
                    button: PointerButton::Primary,
                },
            ) => {
                self.start = position;
                self.rect = ScreenRect::spanning(position, position);
                self.phase = Phase::Selecting;
                Ok(SelectionOutcome::Pending)
            }
            (
                Phase::Selecting,
                OverlayEvent::PointerMove {
                    position,
                    primary_held: true,
                },
            ) => {
                self.rect = ScreenRect::spanning(self.start, position);
                self.overlay.show_hole(self.rect);
                Ok(SelectionOutcome::Pending)
            }
            (
                Phase::Selecting,
                OverlayEvent::PointerUp {
                    position,
                    button: PointerButton::Primary,
                },
            ) => self.finalize(position).await,
            _ => Ok(SelectionOutcome::Pending),
        }
    }

    async fn finalize(&mut self, end: Point) -> Result<SelectionOutcome, CaptureError> {
        self.phase = Phase::Finalizing;
        self.rect = ScreenRect::spanning(self.start, end);

        if self.rect.is_empty() {
            tracing::debug!("Empty selection {}, closing without capture", self.rect);
            self.close();
            return Ok(SelectionOutcome::Cancelled);
        }

        self.overlay.clear_hole();
        self.overlay.hide();
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let rect = self.rect;
        let rasterizer = Arc::clone(&self.rasterizer);
        let result = tokio::task::spawn_blocking(move || rasterizer.rasterize(rect)).await;
        self.close();

        match result {
            Ok(Ok(image)) => {
                tracing::info!("Captured {} ({}x{})", rect, image.width(), image.height());
                Ok(SelectionOutcome::Captured(image))
            }
            Ok(Err(e)) => {
                tracing::error!("Failed to capture {}: {}", rect, e);
                Err(e)
            }
            Err(e) => Err(CaptureError::Worker(e.to_string())),
        }
    }

    fn close(&mut self) {
        self.phase = Phase::Closed;
        self.overlay.close();
    }
}
