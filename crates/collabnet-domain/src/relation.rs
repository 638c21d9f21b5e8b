//! Temporal relation module - per-author, per-year collaborator lists
//!
//! The temporal relation is the central intermediate artifact: one row per
//! author, one cell per year, each cell holding the co-authors the author has
//! worked with up to and including that year.

use crate::{CanonicalAuthor, YearRange};
use std::collections::{BTreeMap, BTreeSet};

/// Delimiter joining co-author names inside a serialized cell
///
/// Author names are guaranteed not to contain it.
pub const DELIMITER: &str = "::";

/// Placeholder some tabular tools write for missing cells
const MISSING_TOKEN: &str = "nan";

/// A serialized cell whose structure cannot be read as a delimited list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed cell {raw:?}: {reason}")]
pub struct MalformedCell {
    /// The raw cell content
    pub raw: String,

    /// What made the cell unreadable
    pub reason: String,
}

/// Whether `name` survives being joined with `delimiter` and parsed back
///
/// Rejects empty or padded names, control characters, the missing-value
/// placeholder, names containing the delimiter, and names that start or end
/// with a fragment of it (`Foo:` next to `::` would split ambiguously).
///
/// # Examples
///
/// ```
/// use collabnet_domain::relation::is_valid_name;
///
/// assert!(is_valid_name("Ada Lovelace", "::"));
/// assert!(!is_valid_name("X::Y", "::"));
/// assert!(!is_valid_name("Foo:", "::"));
/// assert!(!is_valid_name("nan", "::"));
/// ```
pub fn is_valid_name(name: &str, delimiter: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.chars().any(char::is_control)
        && !name.eq_ignore_ascii_case(MISSING_TOKEN)
        && (delimiter.is_empty() || !name.contains(delimiter))
        && !has_stray_fragment(name, delimiter)
}

/// A token that starts with the delimiter's last char or ends with its first
fn has_stray_fragment(token: &str, delimiter: &str) -> bool {
    delimiter.chars().last().is_some_and(|c| token.starts_with(c))
        || delimiter.chars().next().is_some_and(|c| token.ends_with(c))
}

/// Parse a serialized cell into its collaborator list
///
/// Empty tokens and the missing-value placeholder (`nan`, any case) are dropped
/// here so no sentinel string ever reaches the graph builder. Duplicates are
/// removed, keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use collabnet_domain::relation::parse_cell;
///
/// assert_eq!(parse_cell("B::C", "::").unwrap(), vec!["B", "C"]);
/// assert!(parse_cell("nan", "::").unwrap().is_empty());
/// assert!(parse_cell("B:::C", "::").is_err());
/// ```
pub fn parse_cell(raw: &str, delimiter: &str) -> Result<Vec<String>, MalformedCell> {
    let malformed = |reason: &str| MalformedCell {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw.chars().any(char::is_control) {
        return Err(malformed("contains control characters"));
    }

    let mut seen = BTreeSet::new();
    let mut names = Vec::new();

    for token in raw.split(delimiter) {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case(MISSING_TOKEN) {
            continue;
        }

        // A leftover fragment of the delimiter means the separators are ragged
        if has_stray_fragment(token, delimiter) {
            return Err(malformed("stray delimiter fragment"));
        }

        if seen.insert(token) {
            names.push(token.to_string());
        }
    }

    Ok(names)
}

/// One row of the temporal relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalRelationRow {
    /// Author name (row key)
    pub author: String,

    /// Year -> collaborators as of that year
    cells: BTreeMap<i32, Vec<String>>,
}

impl TemporalRelationRow {
    /// Create a row with no cells
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Build the cumulative-to-date row for an author
    ///
    /// The cell at year `Y` holds every distinct co-author across all
    /// publications up to and including `Y`, including publications that
    /// predate the range. Cells are sorted by name. The author never appears
    /// in their own cells.
    ///
    /// Co-author names that fail [`is_valid_name`] cannot be serialized and
    /// are left out; they are returned alongside the row.
    pub fn cumulative(author: &CanonicalAuthor, range: YearRange, delimiter: &str) -> (Self, Vec<String>) {
        let mut row = Self::new(author.name.clone());
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut rejected: BTreeSet<String> = BTreeSet::new();
        let publications = author.publications();
        let mut next = 0;

        for year in range.years() {
            while next < publications.len() && publications[next].year <= year {
                for name in &publications[next].coauthors {
                    if name == &author.name {
                        continue;
                    }
                    if !is_valid_name(name, delimiter) {
                        rejected.insert(name.clone());
                        continue;
                    }
                    seen.insert(name.as_str());
                }
                next += 1;
            }
            row.set(year, seen.iter().map(|s| s.to_string()).collect());
        }

        (row, rejected.into_iter().collect())
    }

    /// Set the collaborators for a year
    pub fn set(&mut self, year: i32, collaborators: Vec<String>) {
        self.cells.insert(year, collaborators);
    }

    /// Collaborators for a year (empty when the year has no cell)
    pub fn collaborators(&self, year: i32) -> &[String] {
        self.cells.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Years that have a cell, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.cells.keys().copied()
    }

    /// Serialize one cell by joining its collaborators with `delimiter`
    pub fn encode_cell(&self, year: i32, delimiter: &str) -> String {
        self.collaborators(year).join(delimiter)
    }
}

/// The full temporal relation: one row per author over a year range
///
/// Every row holds a cell for every year of the range; missing years are
/// filled with empty cells on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationTable {
    range: YearRange,
    rows: Vec<TemporalRelationRow>,
}

impl RelationTable {
    /// Create an empty table spanning `range`
    pub fn new(range: YearRange) -> Self {
        Self {
            range,
            rows: Vec::new(),
        }
    }

    /// The years the table has columns for
    pub fn range(&self) -> YearRange {
        self.range
    }

    /// Add a row, padding missing years with empty cells and dropping years
    /// outside the table range
    pub fn push(&mut self, mut row: TemporalRelationRow) {
        let range = self.range;
        row.cells.retain(|year, _| range.contains(*year));
        for year in range.years() {
            row.cells.entry(year).or_default();
        }
        self.rows.push(row);
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[TemporalRelationRow] {
        &self.rows
    }

    /// Look up a row by author name
    pub fn row(&self, author: &str) -> Option<&TemporalRelationRow> {
        self.rows.iter().find(|r| r.author == author)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
