//! Author module - canonical author records and their publication history

use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of a canonical author in the reference index
///
/// For DBLP-backed indexes this is the person's profile path
/// (e.g. `homepages/g/Gray:Jim`), which survives renames.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorKey(String);

impl AuthorKey {
    /// Create a key from its raw string form
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single publication event in an author's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Publication key in the reference index
    pub key: String,

    /// Year of publication
    pub year: i32,

    /// Co-authors of this publication, excluding the author the history belongs to
    pub coauthors: BTreeSet<String>,
}

impl Publication {
    /// Create a publication event
    pub fn new<I, S>(key: impl Into<String>, year: i32, coauthors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            year,
            coauthors: coauthors.into_iter().map(Into::into).collect(),
        }
    }
}

/// A resolved author record
///
/// Owned by the author index and immutable once resolved. Publications are
/// kept in ascending year order so cumulative views can be computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAuthor {
    /// Stable identity key
    pub key: AuthorKey,

    /// Canonical display name; used as the row key of the temporal relation
    pub name: String,

    /// Publication events, ordered by year
    publications: Vec<Publication>,
}

impl CanonicalAuthor {
    /// Create a canonical author, ordering the publications by year
    ///
    /// The sort is stable, so publications within the same year keep the
    /// order the index returned them in.
    pub fn new(key: AuthorKey, name: impl Into<String>, mut publications: Vec<Publication>) -> Self {
        publications.sort_by_key(|p| p.year);
        Self {
            key,
            name: name.into(),
            publications,
        }
    }

    /// Publication history, ordered by year
    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    /// Whether the author has any recorded publication
    pub fn has_publications(&self) -> bool {
        !self.publications.is_empty()
    }
}
