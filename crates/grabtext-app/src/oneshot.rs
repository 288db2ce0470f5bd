use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use grabtext_capture::CapturedImage;
use grabtext_core::{CaptureOrchestrator, ProcessOutcome, ResultPresenter};
use grabtext_types::ScreenRect;

use crate::state::AppState;

/// Rasterize `rect` and convert it once
pub async fn convert_region(
    state: &AppState,
    rect: ScreenRect,
    presenter: impl ResultPresenter,
) -> anyhow::Result<()> {
    if rect.is_empty() {
        anyhow::bail!("Region {} is empty", rect);
    }

    let rasterizer = Arc::clone(&state.rasterizer);
    let image = tokio::task::spawn_blocking(move || rasterizer.rasterize(rect))
        .await
        .context("Capture worker panicked")?
        .with_context(|| format!("Failed to capture {rect}"))?;

    convert(state, image, presenter).await
}

/// Load an image file and convert it once
pub async fn convert_file(
    state: &AppState,
    path: &Path,
    presenter: impl ResultPresenter,
) -> anyhow::Result<()> {
    let pixels = image::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .to_rgba8();
    let image = CapturedImage::new(pixels)
        .with_context(|| format!("Unusable image {}", path.display()))?;

    convert(state, image, presenter).await
}

async fn convert(
    state: &AppState,
    image: CapturedImage,
    presenter: impl ResultPresenter,
) -> anyhow::Result<()> {
    tracing::info!("Converting {}x{} image", image.width(), image.height());
    let orchestrator =
        CaptureOrchestrator::new(Arc::new(image), Arc::clone(&state.recognizer), presenter);

    match orchestrator.process_capture().await {
        ProcessOutcome::Completed => Ok(()),
        ProcessOutcome::Failed => anyhow::bail!("Conversion failed"),
        ProcessOutcome::AlreadyInFlight => anyhow::bail!("Conversion already running"),
    }
}
