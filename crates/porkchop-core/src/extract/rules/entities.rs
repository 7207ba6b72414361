//! Government entity names.

use super::patterns::ENTITY;
use super::FieldExtractor;

/// Entity extractor. Names are deduplicated case-insensitively, first spelling wins.
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EntityExtractor {
    type Output = String;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut seen: Vec<String> = Vec::new();
        let mut entities = Vec::new();

        for caps in ENTITY.captures_iter(text) {
            let name = caps[1].trim();
            let key = name.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                entities.push(name.to_string());
            }
        }

        entities
    }
}
