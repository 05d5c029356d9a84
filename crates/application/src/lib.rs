//! Application orchestration layer for bookconnect.
//!
//! [`Browser`] owns every piece of session state (match set, page, theme and
//! the three dialogs) and exposes one synchronous handler per user action.
//! Each handler updates state first and then pushes the resulting changes to
//! a [`RenderSink`] in a fixed order: book window, remaining count, empty
//! state, dialog visibility.

pub mod dialog;
pub mod filter;
pub mod paginator;
pub mod sink;
pub mod theme;

use std::num::NonZeroUsize;

use bookconnect_core::{Book, Catalog, ThemeValue};
use tracing::{debug, info};

pub use dialog::{
    DescriptionView, Dialog, DialogForm, DialogKind, SearchField, SearchForm, SettingsForm,
};
pub use filter::{ANY, FilterId, MatchSet, Query, apply_query};
pub use paginator::Paginator;
pub use sink::{
    BookDetails, BookPreview, OptionEntry, OptionKind, RenderSink, WindowPlacement,
    option_entries,
};
pub use theme::{
    ColorSchemeProbe, EnvColorScheme, FixedColorScheme, ThemeResolver, ThemeState,
};

/// What a search submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub matched: usize,
    pub window: Vec<BookPreview>,
    pub remaining: usize,
    pub empty: bool,
}

#[derive(Debug)]
pub struct Browser {
    catalog: Catalog,
    paginator: Paginator,
    last_query: Query,
    empty_state: bool,
    theme: ThemeState,
    resolver: ThemeResolver,
    description: Dialog<DescriptionView>,
    search: Dialog<SearchForm>,
    settings: Dialog<SettingsForm>,
}

impl Browser {
    pub fn new(catalog: Catalog, page_size: NonZeroUsize, resolver: ThemeResolver) -> Self {
        let initial = resolver.initialize();
        let matches = MatchSet::all(&catalog);
        Self {
            paginator: Paginator::new(matches, page_size),
            last_query: Query::default(),
            empty_state: false,
            theme: ThemeState::new(initial),
            resolver,
            description: Dialog::new(DialogKind::Description, DescriptionView::default()),
            search: Dialog::new(DialogKind::Search, SearchForm::default()),
            settings: Dialog::new(DialogKind::Settings, SettingsForm::new(initial)),
            catalog,
        }
    }

    /// Initial render of the whole catalog.
    pub fn start(&mut self, sink: &mut dyn RenderSink) {
        let window = self.window_previews();
        sink.render_book_window(&window, WindowPlacement::Replace);
        sink.render_option_list(
            OptionKind::Genre,
            &option_entries(OptionKind::Genre, self.catalog.genres()),
        );
        sink.render_option_list(
            OptionKind::Author,
            &option_entries(OptionKind::Author, self.catalog.authors()),
        );
        let theme = self.theme.current();
        self.resolver.apply(&mut self.theme, theme, sink);
        sink.set_remaining_count(self.paginator.remaining());
        info!(
            books = self.catalog.len(),
            page_size = self.paginator.page_size().get(),
            %theme,
            "browser started"
        );
    }

    /// Appends the next page. Does nothing once the match set is exhausted.
    pub fn show_more(&mut self, sink: &mut dyn RenderSink) -> Vec<BookPreview> {
        if self.paginator.remaining() == 0 {
            return Vec::new();
        }
        self.paginator.advance();
        let window = self.window_previews();
        let remaining = self.paginator.remaining();
        sink.render_book_window(&window, WindowPlacement::Append);
        sink.set_remaining_count(remaining);
        debug!(
            page = self.paginator.page_index(),
            shown = window.len(),
            remaining,
            "show more"
        );
        window
    }

    /// Maps a selection id to its catalog position and record.
    pub fn resolve_selection(&self, id: &str) -> Option<(usize, &Book)> {
        self.catalog.find(id)
    }

    /// Selection action on a book row. While the description dialog is open
    /// any selection closes it; otherwise an unknown id is ignored.
    pub fn select_book(&mut self, id: &str, sink: &mut dyn RenderSink) -> Option<BookDetails> {
        if self.description.is_open() {
            self.close_description(sink);
            return None;
        }

        let Some((position, book)) = self.resolve_selection(id) else {
            debug!(id, "selection does not resolve to a book");
            return None;
        };
        let details = BookDetails::from_book(book, &self.catalog);

        self.description.form_mut().active = Some(position);
        self.description.open(&());
        sink.show_book_details(&details);
        sink.set_dialog_open(self.description.kind(), true);
        Some(details)
    }

    pub fn close_description(&mut self, sink: &mut dyn RenderSink) -> bool {
        let closed = self.description.cancel(&());
        if closed {
            sink.set_dialog_open(self.description.kind(), false);
        }
        closed
    }

    pub fn active_book(&self) -> Option<&Book> {
        self.description
            .form()
            .active
            .and_then(|pos| self.catalog.book(pos))
    }

    pub fn open_search(&mut self, sink: &mut dyn RenderSink) -> bool {
        let opened = self.search.open(&());
        if opened {
            sink.set_dialog_open(self.search.kind(), true);
        }
        opened
    }

    /// Closes the search dialog and clears its inputs. The current match set is kept.
    pub fn cancel_search(&mut self, sink: &mut dyn RenderSink) -> bool {
        let closed = self.search.cancel(&());
        if closed {
            sink.set_dialog_open(self.search.kind(), false);
        }
        closed
    }

    pub fn search_form(&self) -> &SearchForm {
        self.search.form()
    }

    pub fn edit_search(&mut self) -> Option<&mut SearchForm> {
        self.search.edit()
    }

    /// Cycles the focused author/genre selector of the open search form.
    pub fn cycle_search_selector(&mut self, forward: bool) {
        let Some(form) = self.search.edit() else {
            return;
        };
        form.cycle_focused(self.catalog.authors(), self.catalog.genres(), forward);
    }

    pub fn submit_search_form(&mut self, sink: &mut dyn RenderSink) -> QueryOutcome {
        let query = self.search.form().query.clone();
        self.submit_search(query, sink)
    }

    /// Applies `query`, goes back to the first page and re-renders it.
    pub fn submit_search(&mut self, query: Query, sink: &mut dyn RenderSink) -> QueryOutcome {
        let matches = apply_query(&self.catalog, &query);
        let matched = matches.len();
        self.paginator.replace(matches);
        self.empty_state = matched == 0;
        self.search.form_mut().query = query.clone();
        self.last_query = query;
        let closed = self.search.submit();

        let window = self.window_previews();
        let remaining = self.paginator.remaining();
        sink.render_book_window(&window, WindowPlacement::Replace);
        sink.set_remaining_count(remaining);
        sink.show_empty_state(self.empty_state);
        if closed {
            sink.set_dialog_open(self.search.kind(), false);
        }

        info!(
            title = %self.last_query.title_text,
            author = %self.last_query.author,
            genre = %self.last_query.genre,
            matched,
            "search applied"
        );

        QueryOutcome {
            matched,
            window,
            remaining,
            empty: self.empty_state,
        }
    }

    pub fn open_settings(&mut self, sink: &mut dyn RenderSink) -> bool {
        let current = self.theme.current();
        let opened = self.settings.open(&current);
        if opened {
            sink.set_dialog_open(self.settings.kind(), true);
        }
        opened
    }

    /// Closes the settings dialog; the displayed selection goes back to the committed theme.
    pub fn cancel_settings(&mut self, sink: &mut dyn RenderSink) -> bool {
        let current = self.theme.current();
        let closed = self.settings.cancel(&current);
        if closed {
            sink.set_dialog_open(self.settings.kind(), false);
        }
        closed
    }

    pub fn settings_form(&self) -> &SettingsForm {
        self.settings.form()
    }

    pub fn edit_settings(&mut self) -> Option<&mut SettingsForm> {
        self.settings.edit()
    }

    pub fn submit_settings_form(&mut self, sink: &mut dyn RenderSink) -> ThemeValue {
        let selection = self.settings.form().selection;
        self.submit_settings(selection.as_str(), sink)
    }

    /// Validates and commits a theme submission.
    pub fn submit_settings(&mut self, requested: &str, sink: &mut dyn RenderSink) -> ThemeValue {
        let theme = self.resolver.validate(requested);
        self.resolver.apply(&mut self.theme, theme, sink);
        self.settings.form_mut().selection = theme;
        if self.settings.submit() {
            sink.set_dialog_open(self.settings.kind(), false);
        }
        info!(%theme, "theme committed");
        theme
    }

    pub fn is_dialog_open(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::Description => self.description.is_open(),
            DialogKind::Search => self.search.is_open(),
            DialogKind::Settings => self.settings.is_open(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn theme(&self) -> ThemeValue {
        self.theme.current()
    }

    pub fn empty_state(&self) -> bool {
        self.empty_state
    }

    pub fn last_query(&self) -> &Query {
        &self.last_query
    }

    pub fn remaining(&self) -> usize {
        self.paginator.remaining()
    }

    fn window_previews(&self) -> Vec<BookPreview> {
        filter::resolve(&self.catalog, self.paginator.current_window())
            .into_iter()
            .map(|book| BookPreview::from_book(book, &self.catalog))
            .collect()
    }
}
