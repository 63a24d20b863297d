use serde::{Deserialize, Serialize};

/// One generated keyword suggestion with model-estimated metrics.
///
/// Records are immutable once received; every transformation in the pipeline
/// works on copies and leaves the fetched set untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    pub keyword: String,
    /// Estimated monthly search volume.
    pub search_volume: u64,
    /// Estimated creator competition, 1 (low) to 100 (high).
    pub competition: u8,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, search_volume: u64, competition: u8) -> Self {
        KeywordRecord {
            keyword: keyword.into(),
            search_volume,
            competition,
        }
    }
}

/// Generated content suggestions for a single keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdeas {
    /// Three suggested video titles.
    pub titles: Vec<String>,
    /// A sample description, roughly 100-150 words.
    pub description: String,
}
