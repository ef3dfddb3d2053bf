use std::collections::BTreeMap;
use std::sync::Arc;

use sleuth_core::models::Category;
use sleuth_core::traits::Specialist;

/// Specialists registered at startup, keyed by category.
#[derive(Clone, Default)]
pub struct SpecialistRegistry {
    specialists: BTreeMap<Category, Arc<dyn Specialist>>,
}

impl SpecialistRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a specialist under its own category. Returns the one it
    /// replaced, if any.
    pub fn register(&mut self, specialist: Arc<dyn Specialist>) -> Option<Arc<dyn Specialist>> {
        self.specialists.insert(specialist.category(), specialist)
    }

    pub fn with(mut self, specialist: Arc<dyn Specialist>) -> Self {
        self.register(specialist);
        self
    }

    pub fn get(&self, category: &Category) -> Option<Arc<dyn Specialist>> {
        self.specialists.get(category).cloned()
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.specialists.contains_key(category)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.specialists.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }
}

impl std::fmt::Debug for SpecialistRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecialistRegistry")
            .field("categories", &self.specialists.keys().collect::<Vec<_>>())
            .finish()
    }
}
