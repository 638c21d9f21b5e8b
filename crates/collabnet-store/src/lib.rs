//! Collabnet Storage Layer
//!
//! Implements the domain's infrastructure traits on top of local files.
//!
//! # Architecture
//!
//! - SQLite for the reference bibliography ([`SqliteAuthorIndex`])
//! - CSV for the pipeline checkpoints: the resolved-author list and the
//!   temporal relation table ([`CsvAuthorCheckpoint`], [`CsvRelationTable`])
//! - CSV roster exports of the input spreadsheet ([`read_roster`])
//! - A plain directory as the artifact sink ([`DirectorySink`])
//!
//! # Examples
//!
//! ```no_run
//! use collabnet_domain::traits::AuthorIndex;
//! use collabnet_store::SqliteAuthorIndex;
//!
//! let index = SqliteAuthorIndex::open_existing("dblp.sqlite").unwrap();
//! let matches = index.query("Jim Gray").unwrap();
//! ```

#![warn(missing_docs)]

mod authors;
mod index;
mod relations;
mod roster;
mod sink;

pub use authors::{read_authors, write_authors, CsvAuthorCheckpoint};
pub use index::{PersonRecord, PublicationRecord, SqliteAuthorIndex};
pub use relations::{read_relation_table, write_relation_table, CsvRelationTable};
pub use roster::{read_roster, read_roster_file, RosterEntry};
pub use sink::DirectorySink;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required file or record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A checkpoint table does not have the expected layout
    #[error("Malformed table: {0}")]
    MalformedTable(String),
}
