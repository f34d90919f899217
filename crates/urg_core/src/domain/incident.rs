use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    #[serde(rename = "URGENCE_VITALE")]
    LifeThreateningEmergency,
    #[serde(rename = "PROBLEME_CIVIL")]
    CivilProblem,
}

impl IncidentType {
    pub const ALL: [IncidentType; 2] = [Self::LifeThreateningEmergency, Self::CivilProblem];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LifeThreateningEmergency => "URGENCE_VITALE",
            Self::CivilProblem => "PROBLEME_CIVIL",
        }
    }

    /// Subtypes the reporting form offers for this type. Stored subtypes are free-form and are
    /// not checked against this list.
    pub fn subtypes(self) -> &'static [&'static str] {
        match self {
            Self::LifeThreateningEmergency => &[
                "ACCIDENT_ROUTIER",
                "INCENDIE",
                "INONDATION",
                "SEISME",
                "AUTRE_URGENCE",
            ],
            Self::CivilProblem => &[
                "FEU_ROUGE_CASSE",
                "PANNEAU_SIGNALISATION",
                "NID_DE_POULE",
                "ECLAIRAGE_PUBLIC",
                "AUTRE_PROBLEME",
            ],
        }
    }

    pub fn accepts_subtype(self, subtype: &str) -> bool {
        self.subtypes().contains(&subtype)
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                AppError::new("INCIDENT_TYPE_UNKNOWN", "Unknown incident type")
                    .with_details(format!("value={s}"))
            })
    }
}

/// Response pipeline position of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    #[serde(rename = "ALERTE_RECUE")]
    Received,
    #[serde(rename = "SECOURS_EN_ROUTE")]
    RespondersEnRoute,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "RESOLU")]
    Resolved,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 4] = [
        Self::Received,
        Self::RespondersEnRoute,
        Self::InProgress,
        Self::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "ALERTE_RECUE",
            Self::RespondersEnRoute => "SECOURS_EN_ROUTE",
            Self::InProgress => "EN_COURS",
            Self::Resolved => "RESOLU",
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::Resolved
    }

    /// Forward moves permitted by the validated transition. Skipping ahead is allowed; going
    /// back is not.
    pub fn allowed_next(self) -> &'static [IncidentStatus] {
        match self {
            Self::Received => &[Self::RespondersEnRoute, Self::InProgress, Self::Resolved],
            Self::RespondersEnRoute => &[Self::InProgress, Self::Resolved],
            Self::InProgress => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }

    /// Re-asserting the current status is always accepted.
    pub fn can_transition_to(self, to: IncidentStatus) -> bool {
        self == to || self.allowed_next().contains(&to)
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                AppError::new("INCIDENT_STATUS_UNKNOWN", "Unknown incident status")
                    .with_details(format!("value={s}"))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    #[serde(rename = "auteur")]
    pub author: String,
    pub message: String,
    #[serde(rename = "date")]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    #[serde(rename = "auteur")]
    pub author: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    #[serde(rename = "sousType")]
    pub subtype: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "adresse", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub description: String,
    #[serde(rename = "nombreVictimes", default, skip_serializing_if = "Option::is_none")]
    pub victim_count: Option<u32>,
    /// Nominally 1 to 5; not range-checked.
    #[serde(rename = "niveauDanger", default, skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<i32>,
    #[serde(rename = "utilisateurId", default, skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
    #[serde(rename = "statut")]
    pub status: IncidentStatus,
    #[serde(rename = "piecesJointes", default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(rename = "dateCreation")]
    pub created_at: String,
    #[serde(rename = "dateMiseAJour", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "commentaires", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    /// Identifier of the regional administrator handling the incident.
    #[serde(rename = "assigne", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Caller-supplied fields for a new incident. Identity, creation time and the initial status
/// are assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    #[serde(rename = "sousType")]
    pub subtype: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    pub description: String,
    #[serde(rename = "nombreVictimes", default)]
    pub victim_count: Option<u32>,
    #[serde(rename = "niveauDanger", default)]
    pub danger_level: Option<i32>,
    #[serde(rename = "utilisateurId", default)]
    pub reporter_id: Option<String>,
    #[serde(rename = "piecesJointes", default)]
    pub attachments: Option<Vec<String>>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Shallow partial update: every `Some` field overwrites the stored value, `None` leaves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IncidentPatch {
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    #[serde(rename = "sousType")]
    pub subtype: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "adresse")]
    pub address: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "nombreVictimes")]
    pub victim_count: Option<u32>,
    #[serde(rename = "niveauDanger")]
    pub danger_level: Option<i32>,
    #[serde(rename = "utilisateurId")]
    pub reporter_id: Option<String>,
    #[serde(rename = "statut")]
    pub status: Option<IncidentStatus>,
    #[serde(rename = "piecesJointes")]
    pub attachments: Option<Vec<String>>,
    pub region: Option<String>,
    #[serde(rename = "commentaires")]
    pub comments: Option<Vec<Comment>>,
    #[serde(rename = "assigne")]
    pub assigned_to: Option<String>,
}

impl IncidentPatch {
    pub fn status(status: IncidentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, incident: &mut Incident) {
        if let Some(v) = self.incident_type {
            incident.incident_type = v;
        }
        if let Some(v) = self.subtype {
            incident.subtype = v;
        }
        if let Some(v) = self.latitude {
            incident.latitude = v;
        }
        if let Some(v) = self.longitude {
            incident.longitude = v;
        }
        if let Some(v) = self.description {
            incident.description = v;
        }
        if let Some(v) = self.status {
            incident.status = v;
        }
        overwrite(&mut incident.address, self.address);
        overwrite(&mut incident.victim_count, self.victim_count);
        overwrite(&mut incident.danger_level, self.danger_level);
        overwrite(&mut incident.reporter_id, self.reporter_id);
        overwrite(&mut incident.attachments, self.attachments);
        overwrite(&mut incident.region, self.region);
        overwrite(&mut incident.comments, self.comments);
        overwrite(&mut incident.assigned_to, self.assigned_to);
    }
}

pub(crate) fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for st in IncidentStatus::ALL {
            let json = serde_json::to_string(&st).unwrap();
            assert_eq!(json, format!("\"{}\"", st.as_str()));
            assert_eq!(st.as_str().parse::<IncidentStatus>().unwrap(), st);
        }
        assert_eq!(
            "CLOSED".parse::<IncidentStatus>().unwrap_err().code,
            "INCIDENT_STATUS_UNKNOWN"
        );
    }

    #[test]
    fn transition_table_only_moves_forward() {
        use IncidentStatus::*;
        assert!(Received.can_transition_to(RespondersEnRoute));
        assert!(Received.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Received));
        assert!(!Resolved.can_transition_to(InProgress));
        assert!(Resolved.allowed_next().is_empty());
    }

    #[test]
    fn subtype_catalogue_is_per_type() {
        assert!(IncidentType::LifeThreateningEmergency.accepts_subtype("INCENDIE"));
        assert!(!IncidentType::CivilProblem.accepts_subtype("INCENDIE"));
        assert!(IncidentType::CivilProblem.accepts_subtype("NID_DE_POULE"));
    }

    #[test]
    fn unset_optional_fields_are_omitted_from_json() {
        let incident = Incident {
            id: "inc_1_abc".to_string(),
            incident_type: IncidentType::CivilProblem,
            subtype: "NID_DE_POULE".to_string(),
            latitude: 33.57,
            longitude: -7.59,
            address: None,
            description: "Pothole".to_string(),
            victim_count: None,
            danger_level: None,
            reporter_id: None,
            status: IncidentStatus::Received,
            attachments: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: None,
            region: None,
            comments: None,
            assigned_to: None,
        };
        let v = serde_json::to_value(&incident).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj["type"], "PROBLEME_CIVIL");
        assert_eq!(obj["sousType"], "NID_DE_POULE");
        assert_eq!(obj["statut"], "ALERTE_RECUE");
        assert_eq!(obj["dateCreation"], "2026-01-01T00:00:00.000Z");
        assert!(!obj.contains_key("dateMiseAJour"));
        assert!(!obj.contains_key("commentaires"));
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut incident: Incident = serde_json::from_str(
            r#"{"id":"inc_1_a","type":"URGENCE_VITALE","sousType":"INCENDIE","latitude":1.0,
                "longitude":2.0,"description":"Fire","statut":"ALERTE_RECUE",
                "dateCreation":"2026-01-01T00:00:00.000Z","region":"Oriental"}"#,
        )
        .unwrap();
        let patch: IncidentPatch =
            serde_json::from_str(r#"{"description":"Large fire","niveauDanger":4}"#).unwrap();
        patch.apply_to(&mut incident);
        assert_eq!(incident.description, "Large fire");
        assert_eq!(incident.danger_level, Some(4));
        assert_eq!(incident.region.as_deref(), Some("Oriental"));
        assert_eq!(incident.status, IncidentStatus::Received);
    }
}
