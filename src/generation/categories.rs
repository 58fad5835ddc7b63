use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GenerationError;

pub const DEFAULT_SAMPLE_SIZE: usize = 8;

const DEFAULT_CATEGORIES: &[&str] = &[
    "Animals",
    "Food and Drink",
    "Family",
    "Weather",
    "Travel",
    "Clothing",
    "Colors",
    "Numbers",
    "Body Parts",
    "Health",
    "House and Home",
    "Furniture",
    "Kitchen",
    "School",
    "Work and Jobs",
    "Office",
    "Sports",
    "Music",
    "Art",
    "Movies and Television",
    "Books and Reading",
    "Technology",
    "Computers",
    "Science",
    "Nature",
    "Plants and Flowers",
    "Ocean",
    "Mountains",
    "City Life",
    "Countryside",
    "Transportation",
    "Shopping",
    "Money",
    "Time",
    "Seasons",
    "Holidays",
    "Emotions",
    "Personality",
    "Hobbies",
    "Games",
    "Cooking",
    "Restaurants",
    "Fruits",
    "Vegetables",
    "Insects",
    "Birds",
    "Tools",
    "Buildings",
    "Directions",
    "Greetings",
    "Friendship",
    "History",
    "Geography",
    "Space",
    "Mythology",
    "Fairy Tales",
    "Medicine",
    "Law",
    "Politics",
    "Environment",
    "Agriculture",
    "Camping",
    "Celebrations",
    "Daily Routine",
];

/// Topic labels the prompt draws a random handful from on every request.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<String>,
}

impl CategoryCatalog {
    /// Builds a catalog, dropping blank and duplicate labels but keeping order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !categories.contains(&label) {
                categories.push(label);
            }
        }
        Self { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn sample(&self, size: usize) -> Result<Vec<String>, GenerationError> {
        self.sample_with(&mut rand::thread_rng(), size)
    }

    /// Uniform sample of `size` distinct labels, without replacement.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<Vec<String>, GenerationError> {
        if size > self.categories.len() {
            return Err(GenerationError::CatalogTooSmall {
                requested: size,
                available: self.categories.len(),
            });
        }
        Ok(self
            .categories
            .choose_multiple(rng, size)
            .cloned()
            .collect())
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn samples_are_distinct_members_of_the_catalog() {
        let catalog = CategoryCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let sample = catalog.sample_with(&mut rng, DEFAULT_SAMPLE_SIZE).unwrap();
            assert_eq!(sample.len(), DEFAULT_SAMPLE_SIZE);
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), DEFAULT_SAMPLE_SIZE);
            assert!(sample.iter().all(|c| catalog.categories().contains(c)));
        }
    }

    #[test]
    fn sampling_the_whole_catalog_returns_every_label() {
        let catalog = CategoryCatalog::new(["Animals", "Weather", "Food"]);
        let mut sample = catalog.sample(3).unwrap();
        sample.sort();
        assert_eq!(sample, vec!["Animals", "Food", "Weather"]);
    }

    #[test]
    fn oversized_sample_is_rejected() {
        let catalog = CategoryCatalog::new(["Animals", "Weather"]);
        match catalog.sample(3) {
            Err(GenerationError::CatalogTooSmall { requested, available }) => {
                assert_eq!((requested, available), (3, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn blank_and_duplicate_labels_are_dropped() {
        let catalog = CategoryCatalog::new(["Animals", " ", "Animals", " Weather "]);
        assert_eq!(catalog.categories(), &["Animals", "Weather"]);

        let blank = CategoryCatalog::new(["", "  "]);
        assert!(blank.is_empty());
        assert_eq!(blank.len(), 0);
    }

    #[test]
    fn default_catalog_covers_default_sample_size() {
        assert!(CategoryCatalog::default().len() >= DEFAULT_SAMPLE_SIZE);
    }
}
