use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed. Status: {status}. Details: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0:?}")]
    InvalidEndpoint(String),
}
