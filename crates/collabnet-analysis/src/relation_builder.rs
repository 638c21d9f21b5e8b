//! Temporal relation builder
//!
//! Resolves roster names against an [`AuthorIndex`] and turns the resolved
//! authors into the cumulative-to-date relation table.

use crate::{AnalysisConfig, AnalysisError};
use collabnet_domain::traits::{AuthorIndex, RelationCheckpoint};
use collabnet_domain::{AuthorKey, CanonicalAuthor, RelationTable, TemporalRelationRow, YearRange};
use std::collections::HashSet;

/// A name to resolve, optionally pinned to a known profile key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    /// Free-text name
    pub name: String,

    /// Profile key; when set and present among the matches, that match wins
    pub key: Option<AuthorKey>,
}

impl NameQuery {
    /// Query by name only
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    /// Prefer the match with this profile key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(AuthorKey::new(key));
        self
    }
}

impl From<&str> for NameQuery {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Outcome of resolving a roster
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Resolved authors, one per distinct key, in roster order
    pub authors: Vec<CanonicalAuthor>,

    /// Names with no match in the index, in roster order
    pub unmatched: Vec<String>,
}

/// Builds the temporal relation from resolved authors
///
/// # Examples
///
/// ```
/// use collabnet_analysis::{AnalysisConfig, TemporalRelationBuilder};
/// use collabnet_domain::{AuthorKey, CanonicalAuthor, Publication, YearRange};
///
/// let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
/// let author = CanonicalAuthor::new(
///     AuthorKey::new("homepages/a/A"),
///     "A",
///     vec![Publication::new("p", 2000, ["B"])],
/// );
///
/// let table = builder.build(&[author], YearRange::new(2000, 2001));
/// assert_eq!(table.row("A").unwrap().collaborators(2001), ["B"]);
/// ```
pub struct TemporalRelationBuilder {
    config: AnalysisConfig,
}

impl TemporalRelationBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Resolve every query against the index
    ///
    /// A name without matches is recorded as unmatched and the run continues.
    /// Otherwise the first match is taken, unless the query carries a key that
    /// one of the matches has. Authors resolved more than once are kept once.
    pub fn resolve<I, Q>(&self, queries: Q, index: &I) -> Result<ResolutionReport, AnalysisError>
    where
        I: AuthorIndex,
        I::Error: std::fmt::Display,
        Q: IntoIterator,
        Q::Item: Into<NameQuery>,
    {
        let mut report = ResolutionReport::default();
        let mut seen: HashSet<AuthorKey> = HashSet::new();

        for query in queries {
            let query: NameQuery = query.into();
            let mut matches = index
                .query(&query.name)
                .map_err(|e| AnalysisError::Index(format!("{}: {}", query.name, e)))?;

            if matches.is_empty() {
                tracing::warn!("No match for author {:?}", query.name);
                report.unmatched.push(query.name);
                continue;
            }

            let chosen = query
                .key
                .as_ref()
                .and_then(|key| matches.iter().position(|m| &m.key == key))
                .unwrap_or(0);
            if matches.len() > 1 {
                tracing::debug!(
                    candidates = matches.len(),
                    "{:?} is ambiguous; using {}",
                    query.name,
                    matches[chosen].key
                );
            }

            let author = matches.swap_remove(chosen);
            if seen.insert(author.key.clone()) {
                report.authors.push(author);
            } else {
                tracing::debug!("{:?} resolves to already listed {}", query.name, author.key);
            }
        }

        tracing::info!(
            resolved = report.authors.len(),
            unmatched = report.unmatched.len(),
            "resolved roster"
        );
        Ok(report)
    }

    /// Build one cumulative row per author over `range`
    ///
    /// Authors without collaborators keep a row of empty cells. Co-author
    /// names that would not survive the delimited encoding are dropped from
    /// the row and logged.
    pub fn build(&self, authors: &[CanonicalAuthor], range: YearRange) -> RelationTable {
        let mut table = RelationTable::new(range);

        for author in authors {
            let (row, rejected) = TemporalRelationRow::cumulative(author, range, &self.config.delimiter);
            for name in &rejected {
                tracing::warn!(
                    "Dropping co-author {:?} of {}: name does not survive the delimiter {:?}",
                    name,
                    author.name,
                    self.config.delimiter
                );
            }
            tracing::debug!(author = %author.key, publications = author.publications().len(), "built relation row");
            table.push(row);
        }

        tracing::info!(rows = table.len(), "built temporal relation for {}", range);
        table
    }

    /// Build the table and persist it through `checkpoint`
    pub fn build_and_checkpoint<C>(
        &self,
        authors: &[CanonicalAuthor],
        range: YearRange,
        checkpoint: &mut C,
    ) -> Result<RelationTable, AnalysisError>
    where
        C: RelationCheckpoint,
        C::Error: std::fmt::Display,
    {
        let table = self.build(authors, range);
        checkpoint
            .save(&table)
            .map_err(|e| AnalysisError::Checkpoint(e.to_string()))?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_domain::Publication;
    use std::collections::HashMap;

    struct MapIndex(HashMap<&'static str, Vec<CanonicalAuthor>>);

    impl AuthorIndex for MapIndex {
        type Error = String;

        fn query(&self, name: &str) -> Result<Vec<CanonicalAuthor>, Self::Error> {
            Ok(self.0.get(name).cloned().unwrap_or_default())
        }
    }

    fn author(key: &str, name: &str) -> CanonicalAuthor {
        CanonicalAuthor::new(AuthorKey::new(key), name, vec![Publication::new("p", 2000, ["X"])])
    }

    fn index() -> MapIndex {
        let mut map = HashMap::new();
        map.insert("Ada", vec![author("k/ada", "Ada")]);
        map.insert("Lee", vec![author("k/lee1", "Lee"), author("k/lee2", "Lee")]);
        map.insert("Augusta", vec![author("k/ada", "Ada")]);
        MapIndex(map)
    }

    #[test]
    fn test_unmatched_names_are_reported() {
        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
        let report = builder.resolve(["Ada", "Nobody", "Ghost"], &index()).unwrap();

        assert_eq!(report.authors.len(), 1);
        assert_eq!(report.unmatched, vec!["Nobody", "Ghost"]);
    }

    #[test]
    fn test_first_match_unless_key_given() {
        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());

        let report = builder.resolve(["Lee"], &index()).unwrap();
        assert_eq!(report.authors[0].key, AuthorKey::new("k/lee1"));

        let report = builder.resolve([NameQuery::new("Lee").with_key("k/lee2")], &index()).unwrap();
        assert_eq!(report.authors[0].key, AuthorKey::new("k/lee2"));

        // An unknown key falls back to the first match
        let report = builder.resolve([NameQuery::new("Lee").with_key("k/other")], &index()).unwrap();
        assert_eq!(report.authors[0].key, AuthorKey::new("k/lee1"));
    }

    #[test]
    fn test_same_author_resolved_once() {
        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
        let report = builder.resolve(["Ada", "Augusta"], &index()).unwrap();
        assert_eq!(report.authors.len(), 1);
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn test_index_failure_propagates() {
        struct Broken;
        impl AuthorIndex for Broken {
            type Error = String;
            fn query(&self, _name: &str) -> Result<Vec<CanonicalAuthor>, Self::Error> {
                Err("database is locked".to_string())
            }
        }

        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
        let result = builder.resolve(["Ada"], &Broken);
        assert!(matches!(result, Err(AnalysisError::Index(_))));
    }

    #[test]
    fn test_build_is_cumulative() {
        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
        let a = CanonicalAuthor::new(
            AuthorKey::new("k/a"),
            "A",
            vec![
                Publication::new("p1", 2000, ["C", "B"]),
                Publication::new("p2", 2002, ["D", "B"]),
            ],
        );
        let loner = CanonicalAuthor::new(AuthorKey::new("k/l"), "Loner", Vec::new());

        let table = builder.build(&[a, loner], YearRange::new(2000, 2002));
        let row = table.row("A").unwrap();

        assert_eq!(row.encode_cell(2000, "::"), "B::C");
        assert_eq!(row.encode_cell(2001, "::"), "B::C");
        assert_eq!(row.encode_cell(2002, "::"), "B::C::D");
        assert_eq!(table.row("Loner").unwrap().years().count(), 3);
    }

    #[test]
    fn test_build_and_checkpoint_saves_table() {
        #[derive(Default)]
        struct Memory(Option<RelationTable>);
        impl RelationCheckpoint for Memory {
            type Error = String;
            fn save(&mut self, table: &RelationTable) -> Result<(), Self::Error> {
                self.0 = Some(table.clone());
                Ok(())
            }
            fn load(&self) -> Result<RelationTable, Self::Error> {
                self.0.clone().ok_or_else(|| "empty".to_string())
            }
        }

        let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
        let mut checkpoint = Memory::default();
        let table = builder
            .build_and_checkpoint(&[author("k/ada", "Ada")], YearRange::new(2000, 2000), &mut checkpoint)
            .unwrap();

        assert_eq!(checkpoint.load().unwrap(), table);
    }
}
