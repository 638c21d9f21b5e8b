//! Data-source selection.

use crate::error::{CliError, Result};
use std::path::PathBuf;

/// Author database used when neither the flag nor the config names one
pub const DEFAULT_DATABASE: &str = "dblp.sqlite";

/// Where the pipeline starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Resolve a roster against the author database
    Roster {
        /// Roster file
        roster: PathBuf,
        /// Author database
        database: PathBuf,
    },
    /// Start from a resolved-author checkpoint
    Authors(PathBuf),
    /// Start from a relation table
    Relations(PathBuf),
}

impl DataSource {
    /// Pick the single data source named by the flags
    ///
    /// Exactly one of `roster`, `authors` and `relations` must be given. A
    /// roster is resolved against `database`, or [`DEFAULT_DATABASE`] in the
    /// working directory when none is configured.
    pub fn select(
        roster: Option<PathBuf>,
        authors: Option<PathBuf>,
        relations: Option<PathBuf>,
        database: Option<PathBuf>,
    ) -> Result<Self> {
        let given: Vec<&str> = [
            roster.as_ref().map(|_| "--roster"),
            authors.as_ref().map(|_| "--csv"),
            relations.as_ref().map(|_| "--relations"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if given.len() > 1 {
            return Err(CliError::ConfigurationConflict(format!(
                "{} are mutually exclusive",
                given.join(", ")
            )));
        }

        match (roster, authors, relations) {
            (_, _, Some(path)) => Ok(Self::Relations(path)),
            (_, Some(path), _) => Ok(Self::Authors(path)),
            (Some(roster), _, _) => {
                let database = database.unwrap_or_else(|| {
                    tracing::info!("No database specified, defaulting to {}", DEFAULT_DATABASE);
                    PathBuf::from(DEFAULT_DATABASE)
                });
                Ok(Self::Roster { roster, database })
            }
            (None, None, None) => Err(CliError::ConfigurationConflict(
                "one of --roster, --csv or --relations is required".into(),
            )),
        }
    }

    /// Short label for logs and reports
    pub fn describe(&self) -> String {
        match self {
            Self::Roster { roster, database } => {
                format!("roster {} against {}", roster.display(), database.display())
            }
            Self::Authors(path) => format!("author checkpoint {}", path.display()),
            Self::Relations(path) => format!("relation table {}", path.display()),
        }
    }
}
