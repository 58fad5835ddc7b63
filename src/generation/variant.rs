use serde::{Deserialize, Serialize};

use super::reading_level::ReadingLevel;

const CLASSIC_LEVELS: &[ReadingLevel] = &[
    ReadingLevel::Beginner,
    ReadingLevel::Intermediate,
    ReadingLevel::Advanced,
];

/// Prompt configuration. All variants share one request/response contract and
/// differ in wording, offered reading levels, and whether a story is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Plain word pairs, three reading levels.
    Classic,
    /// Word pairs steered toward sampled categories.
    Themed,
    /// A short story over sampled categories, then pairs taken from it.
    Story,
    /// `Story` with the full five-step reading scale.
    #[default]
    Graded,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Themed => "themed",
            Variant::Story => "story",
            Variant::Graded => "graded",
        }
    }

    pub fn reading_levels(&self) -> &'static [ReadingLevel] {
        match self {
            Variant::Classic | Variant::Themed | Variant::Story => CLASSIC_LEVELS,
            Variant::Graded => &ReadingLevel::ALL,
        }
    }

    pub fn supports(&self, level: ReadingLevel) -> bool {
        self.reading_levels().contains(&level)
    }

    pub fn uses_categories(&self) -> bool {
        !matches!(self, Variant::Classic)
    }

    pub fn includes_story(&self) -> bool {
        matches!(self, Variant::Story | Variant::Graded)
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Variant::Classic => {
                "You are a helpful assistant generating language pairs. Generate n pairs of \
                 random words in two different languages. Adjust the complexity of the words \
                 based on the reading level provided."
            }
            Variant::Themed => {
                "You are a helpful assistant generating vocabulary for language learners. \
                 Generate n pairs of words in two different languages, drawing the words from \
                 the topic categories provided. Adjust the complexity of the words based on the \
                 reading level provided."
            }
            Variant::Story | Variant::Graded => {
                "You are a creative assistant helping language learners. First write a short, \
                 vivid story that weaves together the topic categories provided. Then extract \
                 n words or short phrases from the story and pair each with its translation. \
                 Match vocabulary and grammar to the reading level provided."
            }
        }
    }

    /// Comma-separated keys of the offered reading levels.
    pub fn reading_level_keys(&self) -> String {
        self.reading_levels()
            .iter()
            .map(|level| level.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
