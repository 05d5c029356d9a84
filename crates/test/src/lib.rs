//! Test helpers and fixtures.

use std::num::NonZeroUsize;

use bookconnect_application::{
    BookDetails, BookPreview, Browser, DialogKind, FixedColorScheme, OptionEntry, OptionKind,
    RenderSink, ThemeResolver, WindowPlacement,
};
use bookconnect_core::{Book, BookId, Catalog, NameTable, ThemeColors};
use chrono::{TimeZone, Utc};

pub const AUTHORS: [(&str, &str); 3] = [
    ("a-herbert", "Frank Herbert"),
    ("a-tolkien", "J.R.R. Tolkien"),
    ("a-leguin", "Ursula K. Le Guin"),
];

pub const GENRES: [(&str, &str); 3] = [
    ("g-space", "Space Opera"),
    ("g-fantasy", "Fantasy"),
    ("g-classic", "Classic"),
];

pub fn make_book(id: &str, title: &str, author_id: &str, genre_ids: &[&str]) -> Book {
    Book {
        id: BookId(id.to_string()),
        title: title.to_string(),
        author_id: author_id.to_string(),
        image_url: format!("https://covers.example/{id}.jpg"),
        description: format!("Description of {title}."),
        published: Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap(),
        genre_ids: genre_ids.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn name_table(entries: &[(&str, &str)]) -> NameTable {
    entries
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

/// `count` books cycling through the fixture authors and genres.
pub fn make_catalog(count: usize) -> Catalog {
    let books = (0..count)
        .map(|i| {
            make_book(
                &format!("bk-{i:03}"),
                &format!("Book {i}"),
                AUTHORS[i % AUTHORS.len()].0,
                &[GENRES[i % GENRES.len()].0],
            )
        })
        .collect();
    Catalog::new(books, name_table(&AUTHORS), name_table(&GENRES))
        .expect("fixture catalog is valid")
}

/// The two-book catalog: "Dune Messiah" and "The Hobbit".
pub fn scenario_catalog() -> Catalog {
    let books = vec![
        make_book("bk-dune", "Dune Messiah", "a-herbert", &["g-space"]),
        make_book("bk-hobbit", "The Hobbit", "a-tolkien", &["g-fantasy", "g-classic"]),
    ];
    Catalog::new(books, name_table(&AUTHORS), name_table(&GENRES))
        .expect("fixture catalog is valid")
}

pub fn make_browser(catalog: Catalog, page_size: usize, prefers_dark: bool) -> Browser {
    Browser::new(
        catalog,
        NonZeroUsize::new(page_size).expect("page size is positive"),
        ThemeResolver::new(Box::new(FixedColorScheme(prefers_dark))),
    )
}

/// One sink call, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Window {
        ids: Vec<String>,
        placement: WindowPlacement,
    },
    Options {
        kind: OptionKind,
        values: Vec<String>,
    },
    Remaining(usize),
    Dialog(DialogKind, bool),
    EmptyState(bool),
    Colors(ThemeColors),
    Details(String),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<RenderCall>,
}

impl RecordingSink {
    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    /// Ids of every book rendered so far, honouring replace/append.
    pub fn visible_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for call in &self.calls {
            if let RenderCall::Window {
                ids: window,
                placement,
            } = call
            {
                if *placement == WindowPlacement::Replace {
                    ids.clear();
                }
                ids.extend(window.iter().cloned());
            }
        }
        ids
    }
}

impl RenderSink for RecordingSink {
    fn render_book_window(&mut self, books: &[BookPreview], placement: WindowPlacement) {
        self.calls.push(RenderCall::Window {
            ids: books.iter().map(|b| b.id.to_string()).collect(),
            placement,
        });
    }

    fn render_option_list(&mut self, kind: OptionKind, entries: &[OptionEntry]) {
        self.calls.push(RenderCall::Options {
            kind,
            values: entries.iter().map(|e| e.value.clone()).collect(),
        });
    }

    fn set_remaining_count(&mut self, remaining: usize) {
        self.calls.push(RenderCall::Remaining(remaining));
    }

    fn set_dialog_open(&mut self, dialog: DialogKind, open: bool) {
        self.calls.push(RenderCall::Dialog(dialog, open));
    }

    fn show_empty_state(&mut self, show: bool) {
        self.calls.push(RenderCall::EmptyState(show));
    }

    fn apply_theme_colors(&mut self, colors: ThemeColors) {
        self.calls.push(RenderCall::Colors(colors));
    }

    fn show_book_details(&mut self, details: &BookDetails) {
        self.calls.push(RenderCall::Details(details.id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_catalog_cycles_tables() {
        let catalog = make_catalog(4);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.books()[3].author_id, "a-herbert");
        assert!(catalog.books()[2].has_genre("g-classic"));
    }

    #[test]
    fn visible_ids_follow_placement() {
        let mut sink = RecordingSink::default();
        let mut browser = make_browser(make_catalog(5), 2, false);
        browser.start(&mut sink);
        browser.show_more(&mut sink);
        assert_eq!(sink.visible_ids(), vec!["bk-000", "bk-001", "bk-002", "bk-003"]);
    }
}
