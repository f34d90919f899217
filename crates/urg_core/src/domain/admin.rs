use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdminRole {
    #[default]
    #[serde(rename = "REGIONAL_ADMIN")]
    RegionalAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(rename = "lecture")]
    pub read: bool,
    #[serde(rename = "edition")]
    pub edit: bool,
    #[serde(rename = "suppression")]
    pub delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalAdmin {
    pub id: String,
    #[serde(rename = "nomComplet")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub region: String,
    pub role: AdminRole,
    pub permissions: Permissions,
    #[serde(rename = "notificationsActives")]
    pub notifications_enabled: bool,
    #[serde(rename = "dateCreation")]
    pub created_at: String,
    #[serde(rename = "actif")]
    pub active: bool,
}

/// The role is not caller-supplied; every record created through the repository is a
/// regional administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegionalAdmin {
    #[serde(rename = "nomComplet")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub region: String,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(rename = "notificationsActives", default)]
    pub notifications_enabled: bool,
    #[serde(rename = "actif", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalAdminPatch {
    #[serde(rename = "nomComplet")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telephone")]
    pub phone: Option<String>,
    pub region: Option<String>,
    pub permissions: Option<Permissions>,
    #[serde(rename = "notificationsActives")]
    pub notifications_enabled: Option<bool>,
    #[serde(rename = "actif")]
    pub active: Option<bool>,
}

impl RegionalAdminPatch {
    pub fn apply_to(self, admin: &mut RegionalAdmin) {
        if let Some(v) = self.full_name {
            admin.full_name = v;
        }
        if let Some(v) = self.email {
            admin.email = v;
        }
        if let Some(v) = self.phone {
            admin.phone = v;
        }
        if let Some(v) = self.region {
            admin.region = v;
        }
        if let Some(v) = self.permissions {
            admin.permissions = v;
        }
        if let Some(v) = self.notifications_enabled {
            admin.notifications_enabled = v;
        }
        if let Some(v) = self.active {
            admin.active = v;
        }
    }
}
