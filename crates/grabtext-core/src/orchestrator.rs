use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use grabtext_capture::CapturedImage;
use grabtext_ocr::{OcrResult, Recognizer};
use grabtext_types::{CONVERT_LABEL, CONVERTING_LABEL};

use crate::error::PipelineError;
use crate::normalize::{encode_png, normalize};
use crate::presenter::{ResultPayload, ResultPresenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Completed,
    Failed,
    /// A conversion was already running; nothing was sent
    AlreadyInFlight,
}

/// Drives conversions of one captured image.
///
/// Holds the image for the lifetime of the results surface, so the user can convert
/// the same capture again after a failure.
pub struct CaptureOrchestrator<R, P> {
    image: Arc<CapturedImage>,
    recognizer: R,
    presenter: P,
    in_flight: AtomicBool,
}

impl<R, P> CaptureOrchestrator<R, P>
where
    R: Recognizer,
    P: ResultPresenter,
{
    pub fn new(image: Arc<CapturedImage>, recognizer: R, presenter: P) -> Self {
        Self {
            image,
            recognizer,
            presenter,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn image(&self) -> &Arc<CapturedImage> {
        &self.image
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Convert the held image to text and push the result to the presenter.
    ///
    /// A second call while one is running is ignored. The button is restored however the
    /// conversion ends, including when this future is dropped before completion.
    pub async fn process_capture(&self) -> ProcessOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, &self.presenter) else {
            tracing::debug!("Conversion already in flight, ignoring request");
            return ProcessOutcome::AlreadyInFlight;
        };

        self.presenter.update_results(ResultPayload::Processing);

        match self.recognize().await {
            Ok(result) => {
                let payload = ResultPayload::from_result(&result);
                if let ResultPayload::Text(blocks) = &payload {
                    tracing::info!("Conversion finished with {} text blocks", blocks.len());
                } else {
                    tracing::info!("Conversion finished, no text detected");
                }
                self.presenter.update_results(payload);
                ProcessOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Conversion failed: {}", e);
                self.presenter
                    .update_results(ResultPayload::Failed(e.to_string()));
                ProcessOutcome::Failed
            }
        }
    }

    async fn recognize(&self) -> Result<OcrResult, PipelineError> {
        // Normalized copy and encoding only live for this attempt
        let png = {
            let normalized = normalize(self.image.pixels())?;
            encode_png(&normalized)?
        };
        tracing::debug!("Uploading {} byte PNG", png.len());

        Ok(self.recognizer.recognize(png).await?)
    }
}

/// Holds the busy state. Dropping it re-enables the button and clears the flag.
struct InFlightGuard<'a, P: ResultPresenter> {
    flag: &'a AtomicBool,
    presenter: &'a P,
}

impl<'a, P: ResultPresenter> InFlightGuard<'a, P> {
    fn acquire(flag: &'a AtomicBool, presenter: &'a P) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        presenter.set_button_state(true, CONVERTING_LABEL);
        Some(Self { flag, presenter })
    }
}

impl<P: ResultPresenter> Drop for InFlightGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.set_button_state(false, CONVERT_LABEL);
        self.flag.store(false, Ordering::Release);
    }
}
