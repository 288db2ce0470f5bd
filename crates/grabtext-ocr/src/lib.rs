mod client;
mod error;
mod model;

use std::sync::Arc;

pub use client::{OCR_API_PATH, OcrClient, SUBSCRIPTION_KEY_HEADER};
pub use error::OcrError;
pub use model::{Line, OcrResult, Region, TextBlock, Word};

/// Text recognition provider interface
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize text in an encoded image. One call is at most one network attempt.
    async fn recognize(&self, image: Vec<u8>) -> Result<OcrResult, OcrError>;
}

#[async_trait::async_trait]
impl<T: Recognizer + ?Sized> Recognizer for Arc<T> {
    async fn recognize(&self, image: Vec<u8>) -> Result<OcrResult, OcrError> {
        (**self).recognize(image).await
    }
}
