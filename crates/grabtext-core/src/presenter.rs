use std::sync::Arc;

use grabtext_ocr::{OcrResult, TextBlock};

pub const PROCESSING_MESSAGE: &str = "Processing, please wait...";
pub const NO_TEXT_MESSAGE: &str = "No text was detected.";
pub const FAILURE_MESSAGE: &str = "Failed to process image.";

/// Outbound notifications to the result surface.
///
/// Both calls are fire-and-forget: implementations must not block and callers never wait for
/// an acknowledgment.
pub trait ResultPresenter: Send + Sync {
    fn set_button_state(&self, disabled: bool, label: &str);

    fn update_results(&self, payload: ResultPayload);
}

impl<T: ResultPresenter + ?Sized> ResultPresenter for Arc<T> {
    fn set_button_state(&self, disabled: bool, label: &str) {
        (**self).set_button_state(disabled, label)
    }

    fn update_results(&self, payload: ResultPayload) {
        (**self).update_results(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPayload {
    /// Placeholder while a request is in flight
    Processing,
    /// One block per text region, in service order
    Text(Vec<TextBlock>),
    /// Service answered but found nothing
    NoText,
    Failed(String),
}

impl ResultPayload {
    pub fn from_result(result: &OcrResult) -> Self {
        let blocks = result.text_blocks();
        if blocks.is_empty() {
            ResultPayload::NoText
        } else {
            ResultPayload::Text(blocks)
        }
    }

    /// HTML fragment for the results pane
    pub fn to_html(&self) -> String {
        match self {
            ResultPayload::Processing => format!("<i>{PROCESSING_MESSAGE}</i>"),
            ResultPayload::NoText => format!("<p>{NO_TEXT_MESSAGE}</p>"),
            ResultPayload::Failed(detail) => format!(
                "<p style='color: red;'><b>{FAILURE_MESSAGE}</b><br/>Error: {}</p>",
                escape_html(detail)
            ),
            ResultPayload::Text(blocks) => blocks
                .iter()
                .map(|block| {
                    let lines: String = block
                        .lines
                        .iter()
                        .map(|line| format!("{}<br/>", escape_html(line)))
                        .collect();
                    format!("<div class='region-box'>{lines}</div>")
                })
                .collect(),
        }
    }

    /// Plain text: a line per recognized line, blank line between regions
    pub fn to_plain_text(&self) -> String {
        match self {
            ResultPayload::Processing => PROCESSING_MESSAGE.to_string(),
            ResultPayload::NoText => NO_TEXT_MESSAGE.to_string(),
            ResultPayload::Failed(detail) => format!("{FAILURE_MESSAGE}\nError: {detail}"),
            ResultPayload::Text(blocks) => blocks
                .iter()
                .map(|block| block.lines.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(lines: &[&[&str]]) -> ResultPayload {
        ResultPayload::Text(
            lines
                .iter()
                .map(|block| TextBlock {
                    lines: block.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_text_html_has_one_box_per_region() {
        let payload = blocks(&[&["Hello world"], &["Second block", "more"]]);
        assert_eq!(
            payload.to_html(),
            "<div class='region-box'>Hello world<br/></div>\
             <div class='region-box'>Second block<br/>more<br/></div>"
        );
    }

    #[test]
    fn test_plain_text_separates_regions() {
        let payload = blocks(&[&["Hello world"], &["Second block", "more"]]);
        assert_eq!(payload.to_plain_text(), "Hello world\n\nSecond block\nmore");
    }

    #[test]
    fn test_words_are_escaped() {
        let payload = blocks(&[&["<script>alert('x')</script> & co"]]);
        let html = payload.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(ResultPayload::NoText.to_html(), "<p>No text was detected.</p>");
        assert_eq!(
            ResultPayload::Processing.to_html(),
            "<i>Processing, please wait...</i>"
        );

        let failed = ResultPayload::Failed("API request failed. Status: 403 Forbidden".into());
        assert!(failed.to_html().contains("Failed to process image."));
        assert!(
            failed
                .to_plain_text()
                .ends_with("Error: API request failed. Status: 403 Forbidden")
        );
    }

    #[test]
    fn test_from_empty_result_is_no_text() {
        assert_eq!(
            ResultPayload::from_result(&OcrResult::default()),
            ResultPayload::NoText
        );
    }
}
