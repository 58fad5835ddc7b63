use serde::{Deserialize, Serialize};

use super::reading_level::ReadingLevel;

/// Validated contents of a `POST /generate` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_language: String,
    pub target_language: String,
    pub pair_count: u32,
    pub reading_level: ReadingLevel,
}

/// One translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(rename = "L1")]
    pub first_language_text: String,
    #[serde(rename = "L2")]
    pub second_language_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_story: Option<String>,
    pub pairs: Vec<Pair>,
}
