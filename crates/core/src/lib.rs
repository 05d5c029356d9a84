//! Core domain types for bookconnect.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when neither the catalog nor the configuration sets one.
pub const DEFAULT_PAGE_SIZE: usize = 36;

/// Upper bound applied to configured page sizes.
pub const MAX_PAGE_SIZE: usize = 500;

/// Startup failures raised while assembling a [`Catalog`].
///
/// Any of these aborts initialization; there is no degraded mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("catalog source has no `books` collection")]
    MissingBooks,

    #[error("catalog `books` must be a sequence")]
    BooksNotSequence,

    #[error("catalog contains no books")]
    EmptyCatalog,

    #[error("catalog `{0}` table is missing or not a mapping")]
    MissingTable(&'static str),

    #[error("catalog `{table}` entry {id:?} must map to a display name")]
    MalformedName { table: &'static str, id: String },

    #[error("book #{index} is malformed: {reason}")]
    MalformedBook { index: usize, reason: String },

    #[error("book {book:?} references unknown author {author:?}")]
    UnknownAuthor { book: String, author: String },

    #[error("book {book:?} references unknown genre {genre:?}")]
    UnknownGenre { book: String, genre: String },

    #[error("book id {0:?} appears more than once")]
    DuplicateBookId(String),

    #[error("page size must be a positive integer, got {0}")]
    InvalidPageSize(String),

    #[error("catalog source is not valid JSON: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog record. Field names on the wire follow the data provider's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(rename = "author")]
    pub author_id: String,
    #[serde(rename = "image")]
    pub image_url: String,
    pub description: String,
    pub published: DateTime<Utc>,
    #[serde(rename = "genres")]
    pub genre_ids: Vec<String>,
}

impl Book {
    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genre_ids.iter().any(|g| g == genre_id)
    }
}

/// Id → display name lookup that remembers the order entries were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NameTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut table = Self::default();
        for (id, name) in entries {
            if let Some(&pos) = table.index.get(&id) {
                table.entries[pos].1 = name;
                continue;
            }
            table.index.insert(id.clone(), table.entries.len());
            table.entries.push((id, name));
        }
        table
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for NameTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// The session's immutable book collection plus its author and genre tables.
///
/// Books keep the order the data provider supplied them in; positions into
/// [`Catalog::books`] are how the rest of the system refers to a book.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    authors: NameTable,
    genres: NameTable,
}

impl Catalog {
    pub fn new(books: Vec<Book>, authors: NameTable, genres: NameTable) -> Result<Self, DataError> {
        if books.is_empty() {
            return Err(DataError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                return Err(DataError::DuplicateBookId(book.id.0.clone()));
            }
            if !authors.contains(&book.author_id) {
                return Err(DataError::UnknownAuthor {
                    book: book.id.0.clone(),
                    author: book.author_id.clone(),
                });
            }
            if let Some(genre) = book.genre_ids.iter().find(|g| !genres.contains(g)) {
                return Err(DataError::UnknownGenre {
                    book: book.id.0.clone(),
                    genre: genre.clone(),
                });
            }
        }

        Ok(Self {
            books,
            authors,
            genres,
        })
    }

    /// All books in source order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, position: usize) -> Option<&Book> {
        self.books.get(position)
    }

    pub fn find(&self, id: &str) -> Option<(usize, &Book)> {
        self.books
            .iter()
            .enumerate()
            .find(|(_, book)| book.id.as_str() == id)
    }

    pub fn author_name(&self, id: &str) -> Option<&str> {
        self.authors.get(id)
    }

    pub fn genre_name(&self, id: &str) -> Option<&str> {
        self.genres.get(id)
    }

    pub fn authors(&self) -> &NameTable {
        &self.authors
    }

    pub fn genres(&self) -> &NameTable {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// The two display colours a theme assigns to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub dark: Rgb,
    pub light: Rgb,
}

const INK: Rgb = Rgb(10, 10, 20);
const PAPER: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeValue {
    Day,
    Night,
}

impl ThemeValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeValue::Day => "day",
            ThemeValue::Night => "night",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            ThemeValue::Day => ThemeColors {
                dark: INK,
                light: PAPER,
            },
            ThemeValue::Night => ThemeColors {
                dark: PAPER,
                light: INK,
            },
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeValue::Day => ThemeValue::Night,
            ThemeValue::Night => ThemeValue::Day,
        }
    }
}

impl std::fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeValue {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ThemeValue::Day),
            "night" => Ok(ThemeValue::Night),
            _ => Err("unknown theme"),
        }
    }
}

/// Configured theme choice. `Auto` defers to the environment at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Day,
    Night,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Auto => "auto",
            ThemePreference::Day => "day",
            ThemePreference::Night => "night",
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemePreference {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ThemePreference::Auto),
            "day" => Ok(ThemePreference::Day),
            "night" => Ok(ThemePreference::Night),
            _ => Err("unknown theme preference"),
        }
    }
}

/// Startup configuration read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub catalog_path: Option<String>,
    pub page_size: Option<usize>,
    pub theme: ThemePreference,
}

impl Settings {
    pub fn normalize(&mut self) {
        self.page_size = self.page_size.map(|size| size.clamp(1, MAX_PAGE_SIZE));
        self.catalog_path = self
            .catalog_path
            .take()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
    }
}
