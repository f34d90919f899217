//! Persisted record shapes.
//!
//! Field names on the wire are the French camelCase names existing stores already hold
//! (`dateCreation`, `niveauDanger`, `nomComplet`, ...); Rust-side names are English and mapped
//! with serde renames. Optional fields are omitted from the JSON when unset.

mod admin;
mod alert;
mod guide;
mod incident;

pub use admin::{AdminRole, NewRegionalAdmin, Permissions, RegionalAdmin, RegionalAdminPatch};
pub use alert::{Alert, AlertLevel, AlertPatch, AlertScope, NewAlert};
pub use guide::{Guide, GuidePatch, NewGuide};
pub use incident::{
    Comment, Incident, IncidentPatch, IncidentStatus, IncidentType, NewComment, NewIncident,
};

/// Administrative regions selectable for incidents, alerts and regional administrators.
pub const REGIONS: [&str; 12] = [
    "Casablanca-Settat",
    "Rabat-Salé-Kénitra",
    "Tanger-Tétouan-Al Hoceïma",
    "Fès-Meknès",
    "Marrakech-Safi",
    "Oriental",
    "Béni Mellal-Khénifra",
    "Souss-Massa",
    "Drâa-Tafilalet",
    "Laâyoune-Sakia El Hamra",
    "Dakhla-Oued Ed-Dahab",
    "Guelmim-Oued Noun",
];
