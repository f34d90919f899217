use crate::domain::{AdminRole, NewRegionalAdmin, RegionalAdmin, RegionalAdminPatch};
use crate::error::AppError;

use super::{Collection, Record};

impl Record for RegionalAdmin {
    const COLLECTION_KEY: &'static str = "urgences_regional_admins";
    const ID_PREFIX: &'static str = "admin";

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct RegionalAdminRepository<'a> {
    records: Collection<'a, RegionalAdmin>,
}

impl<'a> RegionalAdminRepository<'a> {
    pub(super) fn new(records: Collection<'a, RegionalAdmin>) -> Self {
        Self { records }
    }

    pub fn list_all(&self) -> Result<Vec<RegionalAdmin>, AppError> {
        self.records.list_all()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<RegionalAdmin>, AppError> {
        self.records.get_by_id(id)
    }

    pub fn filter_by(
        &self,
        predicate: impl Fn(&RegionalAdmin) -> bool,
    ) -> Result<Vec<RegionalAdmin>, AppError> {
        self.records.filter_by(predicate)
    }

    /// Active administrators of `region` only.
    pub fn get_by_region(&self, region: &str) -> Result<Vec<RegionalAdmin>, AppError> {
        self.records.filter_by(|a| a.active && a.region == region)
    }

    pub fn create(&self, input: NewRegionalAdmin) -> Result<RegionalAdmin, AppError> {
        self.records.create(|stamp| RegionalAdmin {
            id: stamp.id,
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            region: input.region,
            role: AdminRole::RegionalAdmin,
            permissions: input.permissions,
            notifications_enabled: input.notifications_enabled,
            created_at: stamp.created_at,
            active: input.active,
        })
    }

    pub fn update(
        &self,
        id: &str,
        patch: RegionalAdminPatch,
    ) -> Result<Option<RegionalAdmin>, AppError> {
        self.records.update(id, |admin| patch.apply_to(admin))
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.records.delete(id)
    }
}
