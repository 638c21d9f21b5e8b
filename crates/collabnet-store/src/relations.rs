//! CSV persistence for the temporal relation table
//!
//! Layout: an `author` column followed by one column per year; each cell is
//! empty or a delimiter-joined list of co-author names.

use crate::StoreError;
use collabnet_domain::relation::parse_cell;
use collabnet_domain::traits::RelationCheckpoint;
use collabnet_domain::{RelationTable, TemporalRelationRow, YearRange};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const AUTHOR_COLUMN: &str = "author";

/// Write the table as CSV
pub fn write_relation_table<W: Write>(table: &RelationTable, writer: W, delimiter: &str) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(writer);

    let range = table.range();
    let mut header = vec![AUTHOR_COLUMN.to_string()];
    header.extend(range.years().map(|year| year.to_string()));
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.author.clone()];
        record.extend(range.years().map(|year| row.encode_cell(year, delimiter)));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a table written by [`write_relation_table`] (or an equivalent export)
///
/// Columns with an empty or `Unnamed` header (index columns added by some
/// tabular tools) are ignored. Any other non-year column makes the table
/// malformed. Cells that cannot be parsed are logged and read as empty.
pub fn read_relation_table<R: Read>(reader: R, delimiter: &str) -> Result<RelationTable, StoreError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut author_column = None;
    let mut year_columns: Vec<(usize, i32)> = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        let header = header.trim();
        if header == AUTHOR_COLUMN {
            author_column = Some(index);
        } else if let Ok(year) = header.parse::<i32>() {
            year_columns.push((index, year));
        } else if !(header.is_empty() || header.starts_with("Unnamed")) {
            return Err(StoreError::MalformedTable(format!(
                "unexpected column {:?}; expected '{}' and year columns",
                header, AUTHOR_COLUMN
            )));
        }
    }

    let author_column = author_column.ok_or_else(|| {
        StoreError::MalformedTable(format!("missing '{}' column", AUTHOR_COLUMN))
    })?;

    let (start, end) = match (
        year_columns.iter().map(|c| c.1).min(),
        year_columns.iter().map(|c| c.1).max(),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(StoreError::MalformedTable("no year columns".to_string())),
    };

    let mut table = RelationTable::new(YearRange::new(start, end));
    let mut malformed = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let author = record.get(author_column).unwrap_or_default().trim();
        if author.is_empty() {
            tracing::warn!(line = line + 2, "skipping relation row without author");
            continue;
        }

        let mut row = TemporalRelationRow::new(author);
        for &(index, year) in &year_columns {
            let raw = record.get(index).unwrap_or_default();
            let collaborators = match parse_cell(raw, delimiter) {
                Ok(collaborators) => collaborators,
                Err(e) => {
                    malformed += 1;
                    tracing::warn!(author, year, "treating cell as empty: {}", e);
                    Vec::new()
                }
            };
            row.set(year, collaborators);
        }
        table.push(row);
    }

    tracing::debug!(
        rows = table.len(),
        malformed_cells = malformed,
        "read relation table {}",
        table.range()
    );
    Ok(table)
}

/// File-backed [`RelationCheckpoint`]
#[derive(Debug, Clone)]
pub struct CsvRelationTable {
    path: PathBuf,
    delimiter: String,
}

impl CsvRelationTable {
    /// Checkpoint stored at `path`, using `delimiter` inside cells
    pub fn new(path: impl Into<PathBuf>, delimiter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Location of the checkpoint file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RelationCheckpoint for CsvRelationTable {
    type Error = StoreError;

    fn save(&mut self, table: &RelationTable) -> Result<(), Self::Error> {
        let file = File::create(&self.path)?;
        write_relation_table(table, file, &self.delimiter)?;
        tracing::info!("saved relation table ({} rows) to {}", table.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<RelationTable, Self::Error> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                StoreError::NotFound(format!("relation table {}", self.path.display()))
            }
            _ => StoreError::Io(e),
        })?;
        read_relation_table(file, &self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_domain::DELIMITER;

    #[test]
    fn test_read_skips_index_column_and_placeholders() {
        let data = ",author,2000,2001\n0,A,B::nan,B::C\n1,B,,A\n";
        let table = read_relation_table(data.as_bytes(), DELIMITER).unwrap();

        assert_eq!(table.range(), YearRange::new(2000, 2001));
        assert_eq!(table.row("A").unwrap().collaborators(2000), ["B"]);
        assert_eq!(table.row("A").unwrap().collaborators(2001), ["B", "C"]);
        assert!(table.row("B").unwrap().collaborators(2000).is_empty());
    }

    #[test]
    fn test_read_treats_malformed_cell_as_empty() {
        let data = "author,2000\nA,B:::C\n";
        let table = read_relation_table(data.as_bytes(), DELIMITER).unwrap();
        assert!(table.row("A").unwrap().collaborators(2000).is_empty());
    }

    #[test]
    fn test_read_rejects_unknown_columns() {
        let data = "author,notes,2000\nA,x,B\n";
        let result = read_relation_table(data.as_bytes(), DELIMITER);
        assert!(matches!(result, Err(StoreError::MalformedTable(_))));
    }

    #[test]
    fn test_read_requires_author_and_years() {
        assert!(matches!(
            read_relation_table("name,2000\nA,B\n".as_bytes(), DELIMITER),
            Err(StoreError::MalformedTable(_))
        ));
        assert!(matches!(
            read_relation_table("author\nA\n".as_bytes(), DELIMITER),
            Err(StoreError::MalformedTable(_))
        ));
    }

    #[test]
    fn test_read_rejects_ragged_rows() {
        let data = "author,2000,2001\nA,B\n";
        assert!(matches!(
            read_relation_table(data.as_bytes(), DELIMITER),
            Err(StoreError::Csv(_))
        ));
    }
}
