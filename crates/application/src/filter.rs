//! Query evaluation against the catalog.

use bookconnect_core::{Book, Catalog};

/// Wire value that disables the author or genre predicate.
pub const ANY: &str = "any";

/// An author or genre selector as submitted by the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterId {
    #[default]
    Any,
    Id(String),
}

impl FilterId {
    /// Only the exact literal `"any"` disables the predicate; ids are never trimmed or folded.
    pub fn parse(value: &str) -> Self {
        if value == ANY {
            FilterId::Any
        } else {
            FilterId::Id(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterId::Any => ANY,
            FilterId::Id(id) => id,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterId::Any)
    }
}

impl From<&str> for FilterId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub title_text: String,
    pub author: FilterId,
    pub genre: FilterId,
}

impl Query {
    pub fn new(title_text: impl Into<String>, author_id: &str, genre_id: &str) -> Self {
        Self {
            title_text: title_text.into(),
            author: FilterId::parse(author_id),
            genre: FilterId::parse(genre_id),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.title_text.trim().is_empty() && self.author.is_any() && self.genre.is_any()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matcher().matches(book)
    }

    fn matcher(&self) -> Matcher<'_> {
        let needle = if self.title_text.trim().is_empty() {
            None
        } else {
            Some(self.title_text.to_lowercase())
        };
        Matcher {
            needle,
            author: &self.author,
            genre: &self.genre,
        }
    }
}

struct Matcher<'q> {
    needle: Option<String>,
    author: &'q FilterId,
    genre: &'q FilterId,
}

impl Matcher<'_> {
    fn matches(&self, book: &Book) -> bool {
        self.matches_title(book) && self.matches_author(book) && self.matches_genre(book)
    }

    fn matches_title(&self, book: &Book) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => book.title.to_lowercase().contains(needle.as_str()),
        }
    }

    fn matches_author(&self, book: &Book) -> bool {
        match self.author {
            FilterId::Any => true,
            FilterId::Id(id) => book.author_id == *id,
        }
    }

    fn matches_genre(&self, book: &Book) -> bool {
        match self.genre {
            FilterId::Any => true,
            FilterId::Id(id) => book.has_genre(id),
        }
    }
}

/// Catalog positions matching the last applied query, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet(Vec<usize>);

impl MatchSet {
    pub fn all(catalog: &Catalog) -> Self {
        Self((0..catalog.len()).collect())
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runs `query` over the whole catalog. The result is a stable filter of the
/// catalog's source order; an empty set is a normal outcome.
pub fn apply_query(catalog: &Catalog, query: &Query) -> MatchSet {
    let matcher = query.matcher();
    MatchSet(
        catalog
            .books()
            .iter()
            .enumerate()
            .filter(|(_, book)| matcher.matches(book))
            .map(|(pos, _)| pos)
            .collect(),
    )
}

/// Books for a set of positions, skipping any position the catalog does not hold.
pub fn resolve<'c>(catalog: &'c Catalog, positions: &[usize]) -> Vec<&'c Book> {
    positions
        .iter()
        .filter_map(|pos| catalog.book(*pos))
        .collect()
}
