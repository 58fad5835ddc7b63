use std::sync::Arc;
use tracing::{debug, info, warn};

use super::categories::CategoryCatalog;
use super::prompt::Prompt;
use super::types::{GenerationRequest, GenerationResult};
use super::variant::Variant;
use crate::error::GenerationError;
use crate::llm::interface::StructuredLLMInterface;
use crate::llm::schema::generation_schema;

/// Turns a validated request into pairs: sample categories, build the prompt,
/// ask the model, check the shape of what came back.
pub struct PairGenerator {
    variant: Variant,
    catalog: CategoryCatalog,
    sample_size: usize,
    llm: Arc<dyn StructuredLLMInterface>,
}

impl PairGenerator {
    /// Fails when the variant samples categories and the catalog cannot
    /// supply `sample_size` distinct ones.
    pub fn new(
        variant: Variant,
        catalog: CategoryCatalog,
        sample_size: usize,
        llm: Arc<dyn StructuredLLMInterface>,
    ) -> Result<Self, GenerationError> {
        if variant.uses_categories() && sample_size > catalog.len() {
            return Err(GenerationError::CatalogTooSmall {
                requested: sample_size,
                available: catalog.len(),
            });
        }
        info!(
            "PairGenerator ready: variant={}, catalog={} categories, sample_size={}",
            variant.name(),
            catalog.len(),
            sample_size
        );
        debug!("Category catalog: {:?}", catalog.categories());
        Ok(Self {
            variant,
            catalog,
            sample_size,
            llm,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let categories = if self.variant.uses_categories() {
            self.catalog.sample(self.sample_size)?
        } else {
            Vec::new()
        };
        debug!("Sampled categories: {:?}", categories);

        let prompt = Prompt::build(self.variant, request, &categories);
        let schema = generation_schema(self.variant.includes_story());
        let value = self
            .llm
            .structured_completion(prompt.into_messages(), &schema)
            .await?;

        let result: GenerationResult = serde_json::from_value(value)?;
        if self.variant.includes_story() && result.representative_story.is_none() {
            return Err(GenerationError::MalformedResponse(
                "missing field `representative_story`".to_string(),
            ));
        }

        if result.pairs.len() != request.pair_count as usize {
            warn!(
                "Model returned {} pairs, {} requested",
                result.pairs.len(),
                request.pair_count
            );
        }
        Ok(result)
    }
}
