//! Roster input: the list of researchers to resolve
//!
//! The roster is a CSV export of the source spreadsheet with a `name` column
//! and an optional `dblp` column holding a known profile key.

use crate::StoreError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One researcher listed in the roster
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    /// Name as written in the roster
    pub name: String,

    /// Known profile key, if the roster records one
    #[serde(default)]
    pub dblp: Option<String>,
}

impl RosterEntry {
    fn identity(&self) -> &str {
        self.dblp.as_deref().unwrap_or(&self.name)
    }
}

/// Read roster entries, dropping blank names and duplicates
///
/// Entries are deduplicated on the profile key when present, otherwise on the
/// name. The first occurrence wins.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, StoreError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let mut entry: RosterEntry = record?;
        if entry.name.is_empty() {
            continue;
        }
        if entry.dblp.as_deref().is_some_and(str::is_empty) {
            entry.dblp = None;
        }
        entries.push(entry);
    }

    let before = entries.len();
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.identity().to_string()));

    if entries.len() != before {
        tracing::info!("Deduplicated {} to {} entries", before, entries.len());
    }
    Ok(entries)
}

/// Read a roster file
pub fn read_roster_file(path: &Path) -> Result<Vec<RosterEntry>, StoreError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StoreError::NotFound(format!("roster {}", path.display())),
        _ => StoreError::Io(e),
    })?;
    read_roster(file)
}
