//! The rendering contract the core pushes state changes through.

use bookconnect_core::{Book, BookId, Catalog, NameTable, ThemeColors};
use chrono::Datelike as _;

use crate::dialog::DialogKind;
use crate::filter::ANY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPlacement {
    /// Discard what is displayed and show this window.
    Replace,
    /// Add this window after what is displayed.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Author,
    Genre,
}

impl OptionKind {
    pub fn any_label(&self) -> &'static str {
        match self {
            OptionKind::Author => "All Authors",
            OptionKind::Genre => "All Genres",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

/// The `any` entry followed by the table in source order.
pub fn option_entries(kind: OptionKind, table: &NameTable) -> Vec<OptionEntry> {
    let mut entries = Vec::with_capacity(table.len() + 1);
    entries.push(OptionEntry {
        value: ANY.to_string(),
        label: kind.any_label().to_string(),
    });
    entries.extend(table.iter().map(|(id, name)| OptionEntry {
        value: id.to_string(),
        label: name.to_string(),
    }));
    entries
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPreview {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

impl BookPreview {
    pub fn from_book(book: &Book, catalog: &Catalog) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: author_name(book, catalog),
            image_url: book.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub id: BookId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
}

impl BookDetails {
    pub fn from_book(book: &Book, catalog: &Catalog) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            subtitle: format!("{} {}", author_name(book, catalog), book.published.year()),
            description: book.description.clone(),
            image_url: book.image_url.clone(),
        }
    }
}

fn author_name(book: &Book, catalog: &Catalog) -> String {
    catalog
        .author_name(&book.author_id)
        .unwrap_or(&book.author_id)
        .to_string()
}

/// Display collaborator. The core calls out to it; it never calls back in.
pub trait RenderSink {
    fn render_book_window(&mut self, books: &[BookPreview], placement: WindowPlacement);

    fn render_option_list(&mut self, kind: OptionKind, entries: &[OptionEntry]);

    fn set_remaining_count(&mut self, remaining: usize);

    fn set_dialog_open(&mut self, dialog: DialogKind, open: bool);

    fn show_empty_state(&mut self, show: bool);

    fn apply_theme_colors(&mut self, colors: ThemeColors);

    fn show_book_details(&mut self, details: &BookDetails);
}
