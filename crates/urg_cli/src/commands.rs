use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use urg_core::domain::{
    AlertPatch, GuidePatch, IncidentPatch, IncidentStatus, IncidentType, NewAlert, NewComment,
    NewGuide, NewIncident, NewRegionalAdmin, RegionalAdminPatch, REGIONS,
};
use urg_core::seed::seed_reference_guides;
use urg_core::{AppError, Store};

use crate::cli::{AdminCommands, AlertCommands, Commands, GuideCommands, IncidentCommands};

/// Run one command against the store. Missing records come back as JSON `null`.
pub fn dispatch(command: Commands, store: &Store) -> Result<Value, AppError> {
    match command {
        Commands::Init => to_json(seed_reference_guides(store)?),
        Commands::Regions => to_json(REGIONS),
        Commands::Incidents(cmd) => incidents(cmd, store),
        Commands::Alerts(cmd) => alerts(cmd, store),
        Commands::Admins(cmd) => admins(cmd, store),
        Commands::Guides(cmd) => guides(cmd, store),
    }
}

fn incidents(cmd: IncidentCommands, store: &Store) -> Result<Value, AppError> {
    let repo = store.incidents();
    match cmd {
        IncidentCommands::List {
            user,
            incident_type,
            region,
        } => {
            let incident_type = incident_type
                .as_deref()
                .map(str::parse::<IncidentType>)
                .transpose()?;
            let found = repo.filter_by(|i| {
                user.as_deref()
                    .map_or(true, |u| i.reporter_id.as_deref() == Some(u))
                    && incident_type.map_or(true, |t| i.incident_type == t)
                    && region
                        .as_deref()
                        .map_or(true, |r| i.region.as_deref() == Some(r))
            })?;
            to_json(found)
        }
        IncidentCommands::Get { id } => to_json(repo.get_by_id(&id)?),
        IncidentCommands::Create(arg) => {
            to_json(repo.create(parse_json::<NewIncident>(&arg.json)?)?)
        }
        IncidentCommands::Update { id, json } => {
            to_json(repo.update(&id, parse_json::<IncidentPatch>(&json)?)?)
        }
        IncidentCommands::Status { id, status, strict } => {
            let status: IncidentStatus = status.parse()?;
            if strict {
                to_json(repo.transition_status(&id, status)?)
            } else {
                to_json(repo.update_status(&id, status)?)
            }
        }
        IncidentCommands::Comment {
            id,
            author,
            message,
        } => to_json(repo.add_comment(&id, NewComment { author, message })?),
        IncidentCommands::Assign { id, admin_id } => to_json(repo.assign(&id, &admin_id)?),
        IncidentCommands::Delete { id } => Ok(json!({ "deleted": repo.delete(&id)? })),
        IncidentCommands::Stats { user } => to_json(repo.stats(user.as_deref())?),
    }
}

fn alerts(cmd: AlertCommands, store: &Store) -> Result<Value, AppError> {
    let repo = store.alerts();
    match cmd {
        AlertCommands::List {
            active,
            region: Some(region),
        } => to_json(
            repo.get_by_region(&region)?
                .into_iter()
                .filter(|a| !active || a.active)
                .collect::<Vec<_>>(),
        ),
        AlertCommands::List {
            active,
            region: None,
        } => to_json(repo.list_all(active)?),
        AlertCommands::Get { id } => to_json(repo.get_by_id(&id)?),
        AlertCommands::Create(arg) => to_json(repo.create(parse_json::<NewAlert>(&arg.json)?)?),
        AlertCommands::Update { id, json } => {
            to_json(repo.update(&id, parse_json::<AlertPatch>(&json)?)?)
        }
        AlertCommands::Delete { id } => Ok(json!({ "deleted": repo.delete(&id)? })),
    }
}

fn admins(cmd: AdminCommands, store: &Store) -> Result<Value, AppError> {
    let repo = store.regional_admins();
    match cmd {
        AdminCommands::List {
            region: Some(region),
        } => to_json(repo.get_by_region(&region)?),
        AdminCommands::List { region: None } => to_json(repo.list_all()?),
        AdminCommands::Get { id } => to_json(repo.get_by_id(&id)?),
        AdminCommands::Create(arg) => {
            to_json(repo.create(parse_json::<NewRegionalAdmin>(&arg.json)?)?)
        }
        AdminCommands::Update { id, json } => {
            to_json(repo.update(&id, parse_json::<RegionalAdminPatch>(&json)?)?)
        }
        AdminCommands::Delete { id } => Ok(json!({ "deleted": repo.delete(&id)? })),
    }
}

fn guides(cmd: GuideCommands, store: &Store) -> Result<Value, AppError> {
    let repo = store.guides();
    match cmd {
        GuideCommands::List {
            category: Some(category),
        } => to_json(repo.get_by_category(&category)?),
        GuideCommands::List { category: None } => to_json(repo.list_all()?),
        GuideCommands::Get { id } => to_json(repo.get_by_id(&id)?),
        GuideCommands::Create(arg) => to_json(repo.create(parse_json::<NewGuide>(&arg.json)?)?),
        GuideCommands::Update { id, json } => {
            to_json(repo.update(&id, parse_json::<GuidePatch>(&json)?)?)
        }
        GuideCommands::Delete { id } => Ok(json!({ "deleted": repo.delete(&id)? })),
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::new("CLI_INVALID_JSON", "Failed to parse JSON payload")
            .with_details(e.to_string())
    })
}

fn to_json(value: impl Serialize) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| {
        AppError::new("CLI_ENCODE_FAILED", "Failed to encode result").with_details(e.to_string())
    })
}
