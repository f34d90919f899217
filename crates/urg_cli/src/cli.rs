use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Local incident, alert, administrator and guide store.
#[derive(Debug, Parser)]
#[command(name = "urgences", version, about)]
pub struct Cli {
    /// SQLite file to use instead of the configured one.
    #[arg(long, global = true, conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Use a throwaway in-memory store.
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the store and seed reference data; prints the seeding summary.
    Init,
    /// Known region labels.
    Regions,
    #[command(subcommand)]
    Incidents(IncidentCommands),
    #[command(subcommand)]
    Alerts(AlertCommands),
    #[command(subcommand)]
    Admins(AdminCommands),
    #[command(subcommand)]
    Guides(GuideCommands),
}

/// Record payloads are JSON objects using the stored field names.
#[derive(Debug, Args)]
pub struct JsonArg {
    pub json: String,
}

#[derive(Debug, Subcommand)]
pub enum IncidentCommands {
    List {
        #[arg(long)]
        user: Option<String>,
        /// URGENCE_VITALE or PROBLEME_CIVIL
        #[arg(long = "type")]
        incident_type: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },
    Get {
        id: String,
    },
    Create(JsonArg),
    Update {
        id: String,
        json: String,
    },
    Status {
        id: String,
        /// ALERTE_RECUE, SECOURS_EN_ROUTE, EN_COURS or RESOLU
        status: String,
        /// Refuse moves that go back in the response pipeline.
        #[arg(long)]
        strict: bool,
    },
    Comment {
        id: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        message: String,
    },
    Assign {
        id: String,
        admin_id: String,
    },
    Delete {
        id: String,
    },
    Stats {
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AlertCommands {
    List {
        #[arg(long)]
        active: bool,
        #[arg(long)]
        region: Option<String>,
    },
    Get {
        id: String,
    },
    Create(JsonArg),
    Update {
        id: String,
        json: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    List {
        #[arg(long)]
        region: Option<String>,
    },
    Get {
        id: String,
    },
    Create(JsonArg),
    Update {
        id: String,
        json: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GuideCommands {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Get {
        id: String,
    },
    Create(JsonArg),
    Update {
        id: String,
        json: String,
    },
    Delete {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_strict_status_change() {
        let cli = Cli::try_parse_from([
            "urgences", "--memory", "incidents", "status", "inc_1_a", "RESOLU", "--strict",
        ])
        .expect("parse");
        assert!(cli.memory);
        match cli.command {
            Commands::Incidents(IncidentCommands::Status { id, status, strict }) => {
                assert_eq!(id, "inc_1_a");
                assert_eq!(status, "RESOLU");
                assert!(strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn db_and_memory_conflict() {
        assert!(Cli::try_parse_from(["urgences", "--db", "x.sqlite", "--memory", "init"]).is_err());
    }
}
