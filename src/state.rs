use std::sync::Arc;

use crate::config::Config;
use crate::generation::{CategoryCatalog, PairGenerator};
use crate::llm::StructuredLLMFactory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<PairGenerator>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StructuredLLMFactory::create_llm(&config.llm_config)?;

        let generation = &config.generation_config;
        let catalog = if generation.categories.is_empty() {
            CategoryCatalog::default()
        } else {
            CategoryCatalog::new(generation.categories.iter().cloned())
        };
        if catalog.is_empty() && generation.variant.uses_categories() {
            anyhow::bail!("generation_config.categories contains no usable labels");
        }
        let generator = PairGenerator::new(
            generation.variant,
            catalog,
            generation.category_sample_size,
            llm,
        )?;

        Ok(Self::with_generator(config, generator))
    }

    pub fn with_generator(config: Config, generator: PairGenerator) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
        }
    }
}
