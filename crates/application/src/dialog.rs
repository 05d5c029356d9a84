//! Open/closed dialog state machines.
//!
//! The description, search and settings dialogs share one machine,
//! [`Dialog`], and differ only in the form they carry. A form decides what
//! opening primes and what cancelling restores, always relative to the
//! committed value it edits.

use bookconnect_core::{NameTable, ThemeValue};

use crate::filter::{FilterId, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Description,
    Search,
    Settings,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Description => "description",
            DialogKind::Search => "search",
            DialogKind::Settings => "settings",
        }
    }
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait DialogForm {
    type Committed: ?Sized;

    /// Runs on `Closed -> Open`.
    fn prime(&mut self, committed: &Self::Committed);

    /// Runs on cancel; must leave the form as it was before the dialog opened.
    fn restore(&mut self, committed: &Self::Committed);
}

#[derive(Debug, Clone)]
pub struct Dialog<F> {
    kind: DialogKind,
    open: bool,
    form: F,
}

impl<F: DialogForm> Dialog<F> {
    pub fn new(kind: DialogKind, form: F) -> Self {
        Self {
            kind,
            open: false,
            form,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Form access for user edits; only available while the dialog is open.
    pub fn edit(&mut self) -> Option<&mut F> {
        if self.open { Some(&mut self.form) } else { None }
    }

    pub(crate) fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Returns `true` if the dialog was closed and is now open.
    pub fn open(&mut self, committed: &F::Committed) -> bool {
        if self.open {
            return false;
        }
        self.form.prime(committed);
        self.open = true;
        true
    }

    /// Returns `true` if the dialog was open and is now closed.
    pub fn cancel(&mut self, committed: &F::Committed) -> bool {
        if !self.open {
            return false;
        }
        self.form.restore(committed);
        self.open = false;
        true
    }

    /// Closes without restoring; the form keeps what was submitted.
    pub fn submit(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Book shown by the description dialog, as a catalog position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptionView {
    pub active: Option<usize>,
}

impl DialogForm for DescriptionView {
    type Committed = ();

    fn prime(&mut self, _committed: &()) {}

    fn restore(&mut self, _committed: &()) {
        self.active = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchField {
    pub fn next(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Genre,
            SearchField::Genre => SearchField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SearchField::Title => SearchField::Genre,
            SearchField::Author => SearchField::Title,
            SearchField::Genre => SearchField::Author,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub query: Query,
    pub focus: SearchField,
}

impl SearchForm {
    pub fn push_char(&mut self, ch: char) {
        self.query.title_text.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.query.title_text.pop();
    }

    /// Steps the focused selector through `any` followed by the table's ids.
    pub fn cycle_focused(&mut self, authors: &NameTable, genres: &NameTable, forward: bool) {
        match self.focus {
            SearchField::Title => {}
            SearchField::Author => {
                self.query.author = cycle_selector(&self.query.author, authors, forward);
            }
            SearchField::Genre => {
                self.query.genre = cycle_selector(&self.query.genre, genres, forward);
            }
        }
    }
}

impl DialogForm for SearchForm {
    type Committed = ();

    fn prime(&mut self, _committed: &()) {
        self.focus = SearchField::Title;
    }

    fn restore(&mut self, _committed: &()) {
        *self = Self::default();
    }
}

fn cycle_selector(current: &FilterId, table: &NameTable, forward: bool) -> FilterId {
    let slots = table.len() + 1;
    let pos = match current {
        FilterId::Any => 0,
        FilterId::Id(id) => table
            .iter()
            .position(|(candidate, _)| candidate == id.as_str())
            .map_or(0, |p| p + 1),
    };
    let next = if forward {
        (pos + 1) % slots
    } else {
        (pos + slots - 1) % slots
    };
    match next {
        0 => FilterId::Any,
        n => table
            .iter()
            .nth(n - 1)
            .map_or(FilterId::Any, |(id, _)| FilterId::Id(id.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsForm {
    pub selection: ThemeValue,
}

impl SettingsForm {
    pub fn new(selection: ThemeValue) -> Self {
        Self { selection }
    }

    pub fn toggle(&mut self) {
        self.selection = self.selection.toggled();
    }
}

impl DialogForm for SettingsForm {
    type Committed = ThemeValue;

    fn prime(&mut self, committed: &ThemeValue) {
        self.selection = *committed;
    }

    fn restore(&mut self, committed: &ThemeValue) {
        self.selection = *committed;
    }
}
