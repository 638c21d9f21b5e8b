//! CSV checkpoint of the resolved authors
//!
//! One row per (author, publication); an author without publications gets a
//! single row with empty publication fields so the author is not lost.

use crate::StoreError;
use collabnet_domain::relation::{is_valid_name, parse_cell};
use collabnet_domain::{AuthorKey, CanonicalAuthor, Publication};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct AuthorRecord {
    key: String,
    name: String,
    publication: Option<String>,
    year: Option<i32>,
    coauthors: String,
}

/// Write resolved authors as CSV
///
/// Co-authors that would not survive the delimited encoding are dropped and
/// logged, matching what the relation builder keeps.
pub fn write_authors<W: Write>(authors: &[CanonicalAuthor], writer: W, delimiter: &str) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(writer);

    for author in authors {
        if !author.has_publications() {
            writer.serialize(AuthorRecord {
                key: author.key.to_string(),
                name: author.name.clone(),
                publication: None,
                year: None,
                coauthors: String::new(),
            })?;
            continue;
        }

        for publication in author.publications() {
            let (coauthors, dropped): (Vec<&str>, Vec<&str>) = publication
                .coauthors
                .iter()
                .map(String::as_str)
                .partition(|name| is_valid_name(name, delimiter));
            for name in dropped {
                tracing::warn!(
                    author = %author.key,
                    publication = %publication.key,
                    "not checkpointing co-author {:?}: name does not survive the delimiter {:?}",
                    name,
                    delimiter
                );
            }
            writer.serialize(AuthorRecord {
                key: author.key.to_string(),
                name: author.name.clone(),
                publication: Some(publication.key.clone()),
                year: Some(publication.year),
                coauthors: coauthors.join(delimiter),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Read authors written by [`write_authors`], in first-seen order
pub fn read_authors<R: Read>(reader: R, delimiter: &str) -> Result<Vec<CanonicalAuthor>, StoreError> {
    let mut reader = csv::Reader::from_reader(reader);

    // (key, name, publications) in first-seen order
    let mut grouped: Vec<(String, String, Vec<Publication>)> = Vec::new();

    for record in reader.deserialize() {
        let record: AuthorRecord = record?;

        let position = match grouped.iter().position(|(key, _, _)| *key == record.key) {
            Some(position) => {
                if grouped[position].1 != record.name {
                    return Err(StoreError::InvalidData(format!(
                        "author {} is listed as both {:?} and {:?}",
                        record.key, grouped[position].1, record.name
                    )));
                }
                position
            }
            None => {
                grouped.push((record.key.clone(), record.name.clone(), Vec::new()));
                grouped.len() - 1
            }
        };

        match (record.publication, record.year) {
            (Some(publication), Some(year)) => {
                let coauthors = parse_cell(&record.coauthors, delimiter)
                    .map_err(|e| StoreError::InvalidData(format!("author {}: {}", record.key, e)))?;
                grouped[position].2.push(Publication::new(publication, year, coauthors));
            }
            (None, None) => {}
            _ => {
                return Err(StoreError::InvalidData(format!(
                    "author {} has a publication row without both key and year",
                    record.key
                )));
            }
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(key, name, publications)| CanonicalAuthor::new(AuthorKey::new(key), name, publications))
        .collect())
}

/// File-backed checkpoint of the resolved authors
#[derive(Debug, Clone)]
pub struct CsvAuthorCheckpoint {
    path: PathBuf,
    delimiter: String,
}

impl CsvAuthorCheckpoint {
    /// Checkpoint stored at `path`, using `delimiter` between co-authors
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

    /// Replace the checkpoint with `authors`
    pub fn save(&self, authors: &[CanonicalAuthor]) -> Result<(), StoreError> {
        let file = File::create(&self.path)?;
        write_authors(authors, file, &self.delimiter)?;
        tracing::info!("saved {} resolved authors to {}", authors.len(), self.path.display());
        Ok(())
    }

    /// Load the authors of a previous run
    pub fn load(&self) -> Result<Vec<CanonicalAuthor>, StoreError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                StoreError::NotFound(format!("author checkpoint {}", self.path.display()))
            }
            _ => StoreError::Io(e),
        })?;
        read_authors(file, &self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_domain::DELIMITER;

    #[test]
    fn test_author_without_publications_survives() {
        let authors = vec![CanonicalAuthor::new(AuthorKey::new("k/solo"), "Solo", Vec::new())];

        let mut buffer = Vec::new();
        write_authors(&authors, &mut buffer, DELIMITER).unwrap();
        let loaded = read_authors(buffer.as_slice(), DELIMITER).unwrap();

        assert_eq!(loaded, authors);
    }

    #[test]
    fn test_unencodable_coauthors_are_dropped_on_write() {
        let authors = vec![CanonicalAuthor::new(
            AuthorKey::new("k/a"),
            "A",
            vec![Publication::new("p1", 2000, ["X::Y", "Foo:", "B"])],
        )];

        let mut buffer = Vec::new();
        write_authors(&authors, &mut buffer, DELIMITER).unwrap();
        let loaded = read_authors(buffer.as_slice(), DELIMITER).unwrap();

        let coauthors: Vec<&str> = loaded[0].publications()[0].coauthors.iter().map(String::as_str).collect();
        assert_eq!(coauthors, vec!["B"]);
    }

    #[test]
    fn test_read_rejects_conflicting_names() {
        let data = "key,name,publication,year,coauthors\nk,A,p1,2000,B\nk,Other,p2,2001,C\n";
        assert!(matches!(
            read_authors(data.as_bytes(), DELIMITER),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_rejects_half_empty_publication() {
        let data = "key,name,publication,year,coauthors\nk,A,p1,,B\n";
        assert!(matches!(
            read_authors(data.as_bytes(), DELIMITER),
            Err(StoreError::InvalidData(_))
        ));
    }
}
