use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::incident::overwrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    #[serde(rename = "CRITIQUE")]
    Critical,
    #[serde(rename = "ELEVE")]
    High,
    #[serde(rename = "MOYEN")]
    Medium,
    #[serde(rename = "FAIBLE")]
    Low,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITIQUE",
            Self::High => "ELEVE",
            Self::Medium => "MOYEN",
            Self::Low => "FAIBLE",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| {
                AppError::new("ALERT_LEVEL_UNKNOWN", "Unknown alert level")
                    .with_details(format!("value={s}"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertScope {
    #[serde(rename = "GLOBAL")]
    Global,
    #[serde(rename = "REGIONAL")]
    Regional,
}

/// Public alert. `scope` is never stored on the value: it is derived from `region` whenever it
/// is read or serialized, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AlertRecord", from = "AlertRecord")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub level: AlertLevel,
    pub active: bool,
    pub created_at: String,
    pub expires_at: Option<String>,
    pub region: Option<String>,
}

impl Alert {
    pub fn scope(&self) -> AlertScope {
        match self.region {
            Some(_) => AlertScope::Regional,
            None => AlertScope::Global,
        }
    }

    /// Global alerts are visible from every region.
    pub fn is_visible_in(&self, region: &str) -> bool {
        self.scope() == AlertScope::Global || self.region.as_deref() == Some(region)
    }
}

/// Persisted shape. A `scope` read back from storage is discarded and recomputed.
#[derive(Serialize, Deserialize)]
struct AlertRecord {
    id: String,
    #[serde(rename = "titre")]
    title: String,
    message: String,
    #[serde(rename = "niveau")]
    level: AlertLevel,
    #[serde(rename = "actif")]
    active: bool,
    #[serde(rename = "dateCreation")]
    created_at: String,
    #[serde(rename = "dateExpiration", default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(default, skip_deserializing)]
    scope: Option<AlertScope>,
}

impl From<Alert> for AlertRecord {
    fn from(a: Alert) -> Self {
        let scope = Some(a.scope());
        Self {
            id: a.id,
            title: a.title,
            message: a.message,
            level: a.level,
            active: a.active,
            created_at: a.created_at,
            expires_at: a.expires_at,
            region: a.region,
            scope,
        }
    }
}

impl From<AlertRecord> for Alert {
    fn from(r: AlertRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            message: r.message,
            level: r.level,
            active: r.active,
            created_at: r.created_at,
            expires_at: r.expires_at,
            region: r.region,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAlert {
    #[serde(rename = "titre")]
    pub title: String,
    pub message: String,
    #[serde(rename = "niveau")]
    pub level: AlertLevel,
    #[serde(rename = "actif", default = "default_active")]
    pub active: bool,
    #[serde(rename = "dateExpiration", default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlertPatch {
    #[serde(rename = "titre")]
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "niveau")]
    pub level: Option<AlertLevel>,
    #[serde(rename = "actif")]
    pub active: Option<bool>,
    #[serde(rename = "dateExpiration")]
    pub expires_at: Option<String>,
    pub region: Option<String>,
}

impl AlertPatch {
    pub fn apply_to(self, alert: &mut Alert) {
        if let Some(v) = self.title {
            alert.title = v;
        }
        if let Some(v) = self.message {
            alert.message = v;
        }
        if let Some(v) = self.level {
            alert.level = v;
        }
        if let Some(v) = self.active {
            alert.active = v;
        }
        overwrite(&mut alert.expires_at, self.expires_at);
        overwrite(&mut alert.region, self.region);
    }
}
