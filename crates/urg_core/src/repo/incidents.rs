use serde::{Deserialize, Serialize};

use crate::domain::{
    Comment, Incident, IncidentPatch, IncidentStatus, IncidentType, NewComment, NewIncident,
};
use crate::error::AppError;

use super::{Collection, Record};

impl Record for Incident {
    const COLLECTION_KEY: &'static str = "urgences_incidents";
    const ID_PREFIX: &'static str = "inc";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentStats {
    pub total: usize,
    /// Incidents not yet resolved.
    pub active: usize,
    /// Incidents reported by the requesting user; zero when no user is given.
    pub reported_by_user: usize,
}

pub struct IncidentRepository<'a> {
    records: Collection<'a, Incident>,
}

impl<'a> IncidentRepository<'a> {
    pub(super) fn new(records: Collection<'a, Incident>) -> Self {
        Self { records }
    }

    pub fn list_all(&self) -> Result<Vec<Incident>, AppError> {
        self.records.list_all()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Incident>, AppError> {
        self.records.get_by_id(id)
    }

    pub fn filter_by(
        &self,
        predicate: impl Fn(&Incident) -> bool,
    ) -> Result<Vec<Incident>, AppError> {
        self.records.filter_by(predicate)
    }

    pub fn get_by_user(&self, user_id: &str) -> Result<Vec<Incident>, AppError> {
        self.records.filter_by(|i| i.reporter_id.as_deref() == Some(user_id))
    }

    pub fn get_by_type(&self, incident_type: IncidentType) -> Result<Vec<Incident>, AppError> {
        self.records.filter_by(|i| i.incident_type == incident_type)
    }

    pub fn get_by_region(&self, region: &str) -> Result<Vec<Incident>, AppError> {
        self.records.filter_by(|i| i.region.as_deref() == Some(region))
    }

    /// New incidents always start as [`IncidentStatus::Received`] with no comments and no
    /// assignee.
    pub fn create(&self, input: NewIncident) -> Result<Incident, AppError> {
        let incident = self.records.create(|stamp| Incident {
            id: stamp.id,
            incident_type: input.incident_type,
            subtype: input.subtype,
            latitude: input.latitude,
            longitude: input.longitude,
            address: input.address,
            description: input.description,
            victim_count: input.victim_count,
            danger_level: input.danger_level,
            reporter_id: input.reporter_id,
            status: IncidentStatus::Received,
            attachments: input.attachments,
            created_at: stamp.created_at,
            updated_at: None,
            region: input.region,
            comments: None,
            assigned_to: None,
        })?;
        tracing::info!(id = %incident.id, kind = %incident.incident_type, "incident reported");
        Ok(incident)
    }

    /// Every successful update stamps `updated_at`.
    ///
    /// Stamps have millisecond resolution. With the system clock an update made in the same
    /// millisecond as the creation gets an equal stamp, so `updated_at >= created_at` is the
    /// only ordering guaranteed.
    pub fn update(&self, id: &str, patch: IncidentPatch) -> Result<Option<Incident>, AppError> {
        let now = self.records.timestamp()?;
        self.records.update(id, |incident| {
            patch.apply_to(incident);
            incident.updated_at = Some(now);
        })
    }

    /// Unguarded status assignment: any status may follow any other.
    pub fn update_status(
        &self,
        id: &str,
        status: IncidentStatus,
    ) -> Result<Option<Incident>, AppError> {
        self.update(id, IncidentPatch::status(status))
    }

    /// Status change checked against [`IncidentStatus::can_transition_to`].
    pub fn transition_status(
        &self,
        id: &str,
        to: IncidentStatus,
    ) -> Result<Option<Incident>, AppError> {
        let Some(current) = self.get_by_id(id)? else {
            return Ok(None);
        };
        if !current.status.can_transition_to(to) {
            return Err(AppError::new(
                "INCIDENT_TRANSITION_INVALID",
                "Incident status cannot move to the requested state",
            )
            .with_details(format!("id={id}; from={}; to={to}", current.status)));
        }
        self.update_status(id, to)
    }

    /// Append a comment stamped with the current time. Earlier comments keep their order.
    pub fn add_comment(&self, id: &str, comment: NewComment) -> Result<Option<Incident>, AppError> {
        let Some(incident) = self.get_by_id(id)? else {
            return Ok(None);
        };
        let mut comments = incident.comments.unwrap_or_default();
        comments.push(Comment {
            author: comment.author,
            message: comment.message,
            created_at: self.records.timestamp()?,
        });
        self.update(
            id,
            IncidentPatch {
                comments: Some(comments),
                ..IncidentPatch::default()
            },
        )
    }

    pub fn assign(&self, id: &str, admin_id: &str) -> Result<Option<Incident>, AppError> {
        self.update(
            id,
            IncidentPatch {
                assigned_to: Some(admin_id.to_string()),
                ..IncidentPatch::default()
            },
        )
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.records.delete(id)
    }

    pub fn stats(&self, user_id: Option<&str>) -> Result<IncidentStats, AppError> {
        let all = self.records.list_all()?;
        Ok(IncidentStats {
            total: all.len(),
            active: all.iter().filter(|i| i.status.is_active()).count(),
            reported_by_user: user_id.map_or(0, |u| {
                all.iter()
                    .filter(|i| i.reporter_id.as_deref() == Some(u))
                    .count()
            }),
        })
    }
}
