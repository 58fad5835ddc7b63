use serde::Serialize;
use std::fmt;

/// Vocabulary and grammar complexity requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Beginner,
    Basic,
    Intermediate,
    Proficient,
    Advanced,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 5] = [
        ReadingLevel::Beginner,
        ReadingLevel::Basic,
        ReadingLevel::Intermediate,
        ReadingLevel::Proficient,
        ReadingLevel::Advanced,
    ];

    /// Key used on the wire, e.g. `"beginner"`.
    pub fn key(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "beginner",
            ReadingLevel::Basic => "basic",
            ReadingLevel::Intermediate => "intermediate",
            ReadingLevel::Proficient => "proficient",
            ReadingLevel::Advanced => "advanced",
        }
    }

    /// Capitalised label interpolated into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "Beginner",
            ReadingLevel::Basic => "Basic",
            ReadingLevel::Intermediate => "Intermediate",
            ReadingLevel::Proficient => "Proficient",
            ReadingLevel::Advanced => "Advanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "Simple, common words suitable for new learners.",
            ReadingLevel::Basic => {
                "Everyday words and short phrases for learners who know the fundamentals."
            }
            ReadingLevel::Intermediate => {
                "Moderately complex words for learners with basic proficiency."
            }
            ReadingLevel::Proficient => {
                "Less common words and idiomatic phrases for confident learners."
            }
            ReadingLevel::Advanced => "Challenging and uncommon words for fluent speakers.",
        }
    }

    /// Exact, case-sensitive lookup by wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for level in ReadingLevel::ALL {
            assert_eq!(ReadingLevel::from_key(level.key()), Some(level));
        }
    }

    #[test]
    fn lookup_is_case_sensitive_and_closed() {
        assert_eq!(ReadingLevel::from_key("expert"), None);
        assert_eq!(ReadingLevel::from_key("Beginner"), None);
        assert_eq!(ReadingLevel::from_key(""), None);
    }

    #[test]
    fn serde_uses_wire_keys() {
        let json = serde_json::to_string(&ReadingLevel::Proficient).unwrap();
        assert_eq!(json, "\"proficient\"");
    }
}
