use serde::{Deserialize, Deserializer, Serialize};

/// Parsed recognition response: regions, lines, words from largest to smallest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub text_angle: Option<f64>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub bounding_box: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default)]
    pub bounding_box: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub bounding_box: Option<String>,
    pub text: String,
}

/// One region's text, a line per entry with words single-space joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub lines: Vec<String>,
}

impl OcrResult {
    pub fn text_blocks(&self) -> Vec<TextBlock> {
        self.regions
            .iter()
            .filter_map(|region| {
                let lines: Vec<String> = region
                    .lines
                    .iter()
                    .filter(|line| !line.words.is_empty())
                    .map(Line::text)
                    .collect();
                (!lines.is_empty()).then_some(TextBlock { lines })
            })
            .collect()
    }

    /// No text detected. Valid result, not a failure.
    pub fn is_empty(&self) -> bool {
        self.text_blocks().is_empty()
    }
}

impl Line {
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
