//! Catalog and settings loading.
//!
//! The catalog is read once at startup from a JSON document; any shape
//! problem is reported as a [`DataError`] and aborts initialization.

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::Context as _;
use bookconnect_core::{Book, Catalog, DataError, MAX_PAGE_SIZE, NameTable, Settings};
use serde_json::Value;
use tracing::{debug, info};

/// A validated catalog plus the page size its source asked for, if any.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub catalog: Catalog,
    pub page_size: Option<NonZeroUsize>,
}

pub fn load_catalog(path: impl AsRef<Path>) -> anyhow::Result<CatalogSource> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog {}", path.display()))?;
    let source =
        parse_catalog(&json).with_context(|| format!("load catalog {}", path.display()))?;
    info!(
        path = %path.display(),
        books = source.catalog.len(),
        authors = source.catalog.authors().len(),
        genres = source.catalog.genres().len(),
        "catalog loaded"
    );
    Ok(source)
}

pub fn parse_catalog(json: &str) -> Result<CatalogSource, DataError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| DataError::InvalidJson(err.to_string()))?;
    catalog_from_value(value)
}

pub fn catalog_from_value(value: Value) -> Result<CatalogSource, DataError> {
    let Value::Object(mut root) = value else {
        return Err(DataError::MissingBooks);
    };

    let items = match root.remove("books") {
        None | Some(Value::Null) => return Err(DataError::MissingBooks),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DataError::BooksNotSequence),
    };
    if items.is_empty() {
        return Err(DataError::EmptyCatalog);
    }

    let authors = name_table(root.remove("authors"), "authors")?;
    let genres = name_table(root.remove("genres"), "genres")?;
    let page_size = page_size(root.get("booksPerPage"))?;

    let books = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Book>(item).map_err(|err| DataError::MalformedBook {
                index,
                reason: err.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = Catalog::new(books, authors, genres)?;
    Ok(CatalogSource { catalog, page_size })
}

fn name_table(value: Option<Value>, table: &'static str) -> Result<NameTable, DataError> {
    let Some(Value::Object(map)) = value else {
        return Err(DataError::MissingTable(table));
    };
    map.into_iter()
        .map(|(id, name)| match name {
            Value::String(name) => Ok((id, name)),
            _ => Err(DataError::MalformedName { table, id }),
        })
        .collect()
}

/// `booksPerPage` is optional; values above [`MAX_PAGE_SIZE`] are clamped.
fn page_size(value: Option<&Value>) -> Result<Option<NonZeroUsize>, DataError> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return Ok(None);
    };
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .map(|n| n.min(MAX_PAGE_SIZE))
        .and_then(NonZeroUsize::new)
        .map(Some)
        .ok_or_else(|| DataError::InvalidPageSize(value.to_string()))
}

/// Reads the TOML settings file. A missing file is not an error.
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<Option<Settings>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no settings file");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    let mut settings: Settings = toml::from_str(&contents)
        .with_context(|| format!("parse settings {}", path.display()))?;
    settings.normalize();
    Ok(Some(settings))
}
