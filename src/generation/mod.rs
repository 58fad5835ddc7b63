pub mod categories;
pub mod prompt;
pub mod reading_level;
pub mod service;
pub mod types;
pub mod variant;

pub use categories::CategoryCatalog;
pub use reading_level::ReadingLevel;
pub use service::PairGenerator;
pub use types::*;
pub use variant::Variant;
