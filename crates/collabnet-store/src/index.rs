//! SQLite-backed author index

use crate::StoreError;
use collabnet_domain::traits::AuthorIndex;
use collabnet_domain::relation::is_valid_name;
use collabnet_domain::{AuthorKey, CanonicalAuthor, Publication, DELIMITER};
use rusqlite::{params, Connection};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A person entry of the reference bibliography
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    /// Profile key, unique per person
    pub key: String,

    /// Current name
    pub name: String,

    /// Other names the person has published under
    pub aliases: Vec<String>,
}

/// A publication entry of the reference bibliography
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRecord {
    /// Publication key, unique per publication
    pub key: String,

    /// Title, if known
    pub title: Option<String>,

    /// Year of publication
    pub year: i32,

    /// Author names in byline order
    pub authors: Vec<String>,
}

/// SQLite implementation of [`AuthorIndex`]
///
/// Names are matched exactly against the primary name first, then against
/// aliases; ties are broken by insertion order, so results are stable.
/// A person's history covers every publication authored under any of their
/// names.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own index instance.
pub struct SqliteAuthorIndex {
    conn: Connection,
}

impl SqliteAuthorIndex {
    /// Open (or create) an index at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut index = Self { conn };
        index.initialize_schema()?;
        Ok(index)
    }

    /// Open an index that must already exist on disk
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(format!(
                "author database {}",
                path.display()
            )));
        }
        Self::new(path)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Verify that every table of the schema exists
    pub fn check(&self) -> Result<(), StoreError> {
        for table in ["persons", "publications", "authorships"] {
            let found: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )?;
            if found == 0 {
                return Err(StoreError::InvalidData(format!("missing table {}", table)));
            }
        }
        Ok(())
    }

    /// Number of `(persons, publications)` stored
    pub fn counts(&self) -> Result<(usize, usize), StoreError> {
        let persons: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
        let publications: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM publications", [], |row| row.get(0))?;
        Ok((persons as usize, publications as usize))
    }

    /// Insert persons and publications in a single transaction
    ///
    /// Persons are upserted by key. Publications whose key already exists
    /// are left untouched.
    pub fn import(
        &mut self,
        persons: &[PersonRecord],
        publications: &[PublicationRecord],
    ) -> Result<(), StoreError> {
        let names = persons
            .iter()
            .flat_map(|p| std::iter::once(&p.name).chain(&p.aliases))
            .chain(publications.iter().flat_map(|p| &p.authors));
        for name in names {
            if !is_valid_name(name, DELIMITER) {
                return Err(StoreError::InvalidData(format!(
                    "name {:?} cannot be stored next to the delimiter {:?}",
                    name, DELIMITER
                )));
            }
        }

        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO persons (key, name, aliases) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET name = excluded.name, aliases = excluded.aliases",
            )?;
            for person in persons {
                stmt.execute(params![person.key, person.name, person.aliases.join(DELIMITER)])?;
            }
        }

        {
            let mut insert_publication = tx.prepare(
                "INSERT OR IGNORE INTO publications (key, title, year) VALUES (?1, ?2, ?3)",
            )?;
            let mut insert_authorship = tx.prepare(
                "INSERT INTO authorships (publication_id, author, position) VALUES (?1, ?2, ?3)",
            )?;

            for publication in publications {
                let inserted = insert_publication.execute(params![
                    publication.key,
                    publication.title,
                    publication.year,
                ])?;
                if inserted == 0 {
                    continue;
                }

                let publication_id = tx.last_insert_rowid();
                for (position, author) in publication.authors.iter().enumerate() {
                    insert_authorship.execute(params![publication_id, author, position as i64])?;
                }
            }
        }

        tx.commit()?;
        tracing::debug!(
            persons = persons.len(),
            publications = publications.len(),
            "imported bibliography records"
        );
        Ok(())
    }

    /// Load the publication history of a person across all their names
    fn load_author(&self, key: String, name: String, aliases: &str) -> Result<CanonicalAuthor, StoreError> {
        let names: BTreeSet<&str> = std::iter::once(name.as_str())
            .chain(aliases.split(DELIMITER).filter(|a| !a.is_empty()))
            .collect();

        let mut stmt = self.conn.prepare_cached(
            "SELECT p.id, p.key, p.year, a.author
             FROM authorships me
             JOIN publications p ON p.id = me.publication_id
             JOIN authorships a ON a.publication_id = p.id
             WHERE me.author = ?1
             ORDER BY p.year, p.id, a.position",
        )?;

        // (year, publication id) -> (publication key, co-authors)
        let mut history: BTreeMap<(i32, i64), (String, Vec<String>)> = BTreeMap::new();

        for alias in &names {
            let rows = stmt.query_map(params![alias], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;

            for row in rows {
                let (id, publication_key, year, author) = row?;
                let entry = history
                    .entry((year, id))
                    .or_insert_with(|| (publication_key, Vec::new()));
                if !names.contains(author.as_str()) {
                    entry.1.push(author);
                }
            }
        }

        let publications = history
            .into_iter()
            .map(|((year, _), (publication_key, coauthors))| {
                Publication::new(publication_key, year, coauthors)
            })
            .collect();

        Ok(CanonicalAuthor::new(AuthorKey::new(key), name, publications))
    }
}

impl AuthorIndex for SqliteAuthorIndex {
    type Error = StoreError;

    fn query(&self, name: &str) -> Result<Vec<CanonicalAuthor>, Self::Error> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT key, name, aliases, CASE WHEN name = ?1 THEN 0 ELSE 1 END AS rank
             FROM persons
             WHERE name = ?1 OR instr(?2 || aliases || ?2, ?2 || ?1 || ?2) > 0
             ORDER BY rank, id",
        )?;

        let persons = stmt
            .query_map(params![name, DELIMITER], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        persons
            .into_iter()
            .map(|(key, name, aliases)| self.load_author(key, name, &aliases))
            .collect()
    }
}
