use std::fmt::Write;

use super::types::GenerationRequest;
use super::variant::Variant;
use crate::llm::interface::ChatMessage;

/// The two instruction blocks sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn build(variant: Variant, request: &GenerationRequest, categories: &[String]) -> Self {
        let level = request.reading_level;
        let mut user = String::new();

        if variant.includes_story() {
            let _ = write!(
                user,
                "Write a short, creative story in {} that touches on each of these categories: {}.\n\
                 Then generate {} matching pairs of words or short phrases taken from the story.\n",
                request.source_language,
                categories.join(", "),
                request.pair_count,
            );
        } else {
            let _ = writeln!(
                user,
                "Generate {} matching pairs of words in the following languages:",
                request.pair_count
            );
        }

        let _ = write!(
            user,
            "L1: {}\nL2: {}\nReading Level: {}\nDescription: {}",
            request.source_language,
            request.target_language,
            level.label(),
            level.description(),
        );

        if variant.uses_categories() && !variant.includes_story() {
            let _ = write!(user, "\nCategories: {}", categories.join(", "));
        }

        Self {
            system: variant.system_prompt().to_string(),
            user,
        }
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}
