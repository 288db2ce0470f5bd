use std::sync::Arc;

use grabtext_capture::{CapturedImage, RegionSelector, ScreenRasterizer};
use grabtext_core::{CaptureOrchestrator, ProcessOutcome};
use grabtext_ocr::Recognizer;
use grabtext_types::SessionId;
use tokio::task::JoinHandle;

use crate::ui::{ChannelOverlay, ChannelPresenter};

pub type Selector = RegionSelector<ChannelOverlay, dyn ScreenRasterizer>;
pub type Orchestrator = CaptureOrchestrator<Arc<dyn Recognizer>, ChannelPresenter>;

/// What a session is currently showing
pub enum Stage {
    Selecting(Selector),
    Results {
        orchestrator: Arc<Orchestrator>,
        conversion: Option<JoinHandle<ProcessOutcome>>,
    },
}

/// One hotkey-initiated capture: the overlay, then the result surface for its image.
///
/// Dropping a session aborts any conversion still running for it.
pub struct Session {
    pub id: SessionId,
    pub stage: Stage,
}

impl Session {
    pub fn new(id: SessionId, selector: Selector) -> Self {
        Self {
            id,
            stage: Stage::Selecting(selector),
        }
    }

    /// Switch to the result surface for `image`
    pub fn show_results(
        &mut self,
        image: CapturedImage,
        recognizer: Arc<dyn Recognizer>,
        presenter: ChannelPresenter,
    ) {
        let orchestrator = CaptureOrchestrator::new(Arc::new(image), recognizer, presenter);
        self.stage = Stage::Results {
            orchestrator: Arc::new(orchestrator),
            conversion: None,
        };
    }

    pub fn is_converting(&self) -> bool {
        matches!(
            &self.stage,
            Stage::Results { conversion: Some(handle), .. } if !handle.is_finished()
        )
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Stage::Results {
            conversion: Some(handle),
            ..
        } = &self.stage
        {
            if !handle.is_finished() {
                tracing::debug!("[{}] Aborting running conversion", self.id);
                handle.abort();
            }
        }
    }
}
