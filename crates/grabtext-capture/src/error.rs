use grabtext_types::ScreenRect;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("captured image must have positive dimensions, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("screen copy refused: {0}")]
    Denied(String),

    #[error("no monitor found")]
    NoMonitor,

    #[error("region {0} is not fully inside a monitor")]
    OutsideScreen(ScreenRect),

    #[error("capture worker failed: {0}")]
    Worker(String),
}
