use grabtext_ocr::OcrError;

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
}

/// Anything that can go wrong between a captured image and a recognition result
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Normalize(#[from] NormalizationError),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Ocr(#[from] OcrError),
}
