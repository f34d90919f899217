use crate::domain::{Alert, AlertPatch, NewAlert};
use crate::error::AppError;

use super::{Collection, Record};

impl Record for Alert {
    const COLLECTION_KEY: &'static str = "urgences_alerts";
    const ID_PREFIX: &'static str = "alert";

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct AlertRepository<'a> {
    records: Collection<'a, Alert>,
}

impl<'a> AlertRepository<'a> {
    pub(super) fn new(records: Collection<'a, Alert>) -> Self {
        Self { records }
    }

    pub fn list_all(&self, active_only: bool) -> Result<Vec<Alert>, AppError> {
        if active_only {
            self.records.filter_by(|a| a.active)
        } else {
            self.records.list_all()
        }
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Alert>, AppError> {
        self.records.get_by_id(id)
    }

    pub fn filter_by(&self, predicate: impl Fn(&Alert) -> bool) -> Result<Vec<Alert>, AppError> {
        self.records.filter_by(predicate)
    }

    /// Alerts for `region` plus every global alert. Inactive alerts are included; combine with
    /// `filter_by` to narrow further.
    pub fn get_by_region(&self, region: &str) -> Result<Vec<Alert>, AppError> {
        self.records.filter_by(|a| a.is_visible_in(region))
    }

    /// The scope of the new alert is regional exactly when `input.region` is set.
    pub fn create(&self, input: NewAlert) -> Result<Alert, AppError> {
        let alert = self.records.create(|stamp| Alert {
            id: stamp.id,
            title: input.title,
            message: input.message,
            level: input.level,
            active: input.active,
            created_at: stamp.created_at,
            expires_at: input.expires_at,
            region: input.region,
        })?;
        tracing::info!(
            id = %alert.id,
            level = %alert.level,
            scope = ?alert.scope(),
            "alert published"
        );
        Ok(alert)
    }

    pub fn update(&self, id: &str, patch: AlertPatch) -> Result<Option<Alert>, AppError> {
        self.records.update(id, |alert| patch.apply_to(alert))
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.records.delete(id)
    }
}
