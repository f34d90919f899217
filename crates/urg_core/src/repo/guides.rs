use crate::domain::{Guide, GuidePatch, NewGuide};
use crate::error::AppError;

use super::{Collection, Record};

impl Record for Guide {
    const COLLECTION_KEY: &'static str = "urgences_guides";
    const ID_PREFIX: &'static str = "guide";

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct GuideRepository<'a> {
    records: Collection<'a, Guide>,
}

impl<'a> GuideRepository<'a> {
    pub(super) fn new(records: Collection<'a, Guide>) -> Self {
        Self { records }
    }

    pub fn list_all(&self) -> Result<Vec<Guide>, AppError> {
        self.records.list_all()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Guide>, AppError> {
        self.records.get_by_id(id)
    }

    pub fn filter_by(&self, predicate: impl Fn(&Guide) -> bool) -> Result<Vec<Guide>, AppError> {
        self.records.filter_by(predicate)
    }

    pub fn get_by_category(&self, category: &str) -> Result<Vec<Guide>, AppError> {
        self.records.filter_by(|g| g.category == category)
    }

    pub fn create(&self, input: NewGuide) -> Result<Guide, AppError> {
        self.records.create(|stamp| Guide {
            id: stamp.id,
            title: input.title,
            body: input.body,
            category: input.category,
            created_at: stamp.created_at,
        })
    }

    pub fn update(&self, id: &str, patch: GuidePatch) -> Result<Option<Guide>, AppError> {
        self.records.update(id, |guide| patch.apply_to(guide))
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.records.delete(id)
    }

    /// Fails with `STORE_COLLECTION_CORRUPT` when the stored value cannot be read, so an
    /// unreadable collection is never mistaken for an empty one.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.records.list_strict()?.is_empty())
    }
}
