use std::sync::Arc;

use anyhow::Context;
use grabtext_capture::{ScreenRasterizer, XcapRasterizer};
use grabtext_config::Config;
use grabtext_ocr::{OcrClient, Recognizer};

pub struct AppState {
    pub config: Config,
    pub rasterizer: Arc<dyn ScreenRasterizer>,
    pub recognizer: Arc<dyn Recognizer>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = OcrClient::new(&config.service).context("Failed to create OCR client")?;
        tracing::info!("Recognition service at {}", client.url());

        Ok(Self::with_parts(
            config,
            Arc::new(XcapRasterizer::new()),
            Arc::new(client),
        ))
    }

    pub fn with_parts(
        config: Config,
        rasterizer: Arc<dyn ScreenRasterizer>,
        recognizer: Arc<dyn Recognizer>,
    ) -> Self {
        Self {
            config,
            rasterizer,
            recognizer,
        }
    }
}
