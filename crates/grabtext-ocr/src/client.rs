use grabtext_config::service::ServiceConfig;
use reqwest::header::CONTENT_TYPE;

use crate::error::OcrError;
use crate::model::OcrResult;
use crate::Recognizer;

pub const OCR_API_PATH: &str = "vision/v3.2/ocr";
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the vision `ocr` endpoint
#[derive(Clone)]
pub struct OcrClient {
    url: String,
    api_key: String,
    language: Option<String>,
    client: reqwest::Client,
}

impl OcrClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, OcrError> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(OcrError::InvalidEndpoint(config.endpoint.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            url: format!("{endpoint}/{OCR_API_PATH}"),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one image and parse the response. Never retries.
    pub async fn recognize(&self, image: Vec<u8>) -> Result<OcrResult, OcrError> {
        tracing::debug!("Posting {} bytes to {}", image.len(), self.url);

        let mut request = self
            .client
            .post(&self.url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Recognition service returned {}", status);
            return Err(OcrError::Api { status, body });
        }

        let result: OcrResult = serde_json::from_str(&body)?;
        tracing::debug!(
            "Recognized {} regions (language: {:?})",
            result.regions.len(),
            result.language
        );
        Ok(result)
    }
}

#[async_trait::async_trait]
impl Recognizer for OcrClient {
    async fn recognize(&self, image: Vec<u8>) -> Result<OcrResult, OcrError> {
        OcrClient::recognize(self, image).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    const PATH: &str = "/vision/v3.2/ocr";

    fn config(endpoint: String) -> ServiceConfig {
        ServiceConfig {
            endpoint,
            api_key: "test-key".to_string(),
            language: None,
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_url_composed_from_endpoint() {
        let client = OcrClient::new(&config("https://vision.example.test/".into())).unwrap();
        assert_eq!(client.url(), "https://vision.example.test/vision/v3.2/ocr");
    }

    #[test]
    fn test_blank_endpoint_rejected() {
        let err = OcrClient::new(&config("  ".into())).err().unwrap();
        assert!(matches!(err, OcrError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn test_recognize_sends_key_and_octet_stream() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header(SUBSCRIPTION_KEY_HEADER, "test-key")
            .match_header("content-type", "application/octet-stream")
            .match_body(Matcher::Exact("fake-png".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "language": "en", "regions": [ { "lines": [ { "words": [
                    { "text": "Hello" }, { "text": "there" } ] } ] } ] }"#,
            )
            .create_async()
            .await;

        let client = OcrClient::new(&config(server.url())).unwrap();
        let result = client.recognize(b"fake-png".to_vec()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.text_blocks()[0].lines, vec!["Hello there".to_string()]);
    }

    #[tokio::test]
    async fn test_language_hint_sent_as_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::UrlEncoded("language".into(), "ja".into()))
            .with_status(200)
            .with_body(r#"{ "regions": [] }"#)
            .create_async()
            .await;

        let mut cfg = config(server.url());
        cfg.language = Some("ja".into());
        let result = OcrClient::new(&cfg)
            .unwrap()
            .recognize(vec![1, 2, 3])
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_carries_status_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(403)
            .with_body(r#"{"error":{"code":"401","message":"Access denied"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = OcrClient::new(&config(server.url())).unwrap();
        let err = client.recognize(vec![0]).await.unwrap_err();

        mock.assert_async().await;
        match &err {
            OcrError::Api { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert!(body.contains("Access denied"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = OcrClient::new(&config(server.url())).unwrap();
        let err = client.recognize(vec![0]).await.unwrap_err();
        assert!(matches!(err, OcrError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = OcrClient::new(&config("http://127.0.0.1:1".into())).unwrap();
        let err = client.recognize(vec![0]).await.unwrap_err();
        assert!(matches!(err, OcrError::Network(_)));
    }
}
