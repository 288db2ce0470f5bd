//! App-level tests: drive the event loop through its channels with fake capture and recognition

mod controller_tests;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use grabtext_capture::{CaptureError, CapturedImage, ScreenRasterizer};
use grabtext_config::Config;
use grabtext_ocr::{Line, OcrError, OcrResult, Recognizer, Region, Word};
use grabtext_types::ScreenRect;
use image::{Rgba, RgbaImage};
use tokio::sync::Notify;

use crate::state::AppState;

#[derive(Default)]
pub struct FakeRasterizer {
    pub calls: AtomicUsize,
    pub deny: bool,
}

impl FakeRasterizer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScreenRasterizer for FakeRasterizer {
    fn rasterize(&self, rect: ScreenRect) -> Result<CapturedImage, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(CaptureError::Denied("permission denied".into()));
        }
        CapturedImage::new(RgbaImage::from_pixel(
            rect.width,
            rect.height,
            Rgba([0, 0, 0, 255]),
        ))
    }
}

#[derive(Default)]
pub struct FakeRecognizer {
    pub calls: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
    pub response: Mutex<OcrResult>,
}

impl FakeRecognizer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Recognizer for FakeRecognizer {
    async fn recognize(&self, _image: Vec<u8>) -> Result<OcrResult, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.response.lock().unwrap().clone())
    }
}

pub fn hello_world() -> OcrResult {
    let word = |text: &str| Word {
        bounding_box: None,
        text: text.to_string(),
    };
    OcrResult {
        regions: vec![Region {
            bounding_box: None,
            lines: vec![Line {
                bounding_box: None,
                words: vec![word("Hello"), word("world")],
            }],
        }],
        ..Default::default()
    }
}

pub fn test_state(rasterizer: Arc<FakeRasterizer>, recognizer: Arc<FakeRecognizer>) -> AppState {
    let mut config = Config::default();
    config.service.endpoint = "http://127.0.0.1:1".into();
    config.service.api_key = "test-key".into();
    config.capture.settle_delay_ms = 0;
    config.hotkey.enabled = false;
    AppState::with_parts(config, rasterizer, recognizer)
}
