pub mod interface;
pub mod openai_compatible_llm;
pub mod schema;
pub mod factory;

pub use factory::*;
