use bookconnect_application::{
    BookDetails, BookPreview, DialogKind, OptionEntry, OptionKind, RenderSink, WindowPlacement,
};
use bookconnect_core::{BookId, ThemeColors, ThemeValue};

/// Everything the browser has asked to display. Drawing reads only from here.
#[derive(Debug, Clone)]
pub struct Screen {
    pub rows: Vec<BookPreview>,
    pub authors: Vec<OptionEntry>,
    pub genres: Vec<OptionEntry>,
    pub remaining: usize,
    pub empty_message: bool,
    pub colors: ThemeColors,
    pub details: Option<BookDetails>,
    description_open: bool,
    search_open: bool,
    settings_open: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            authors: Vec::new(),
            genres: Vec::new(),
            remaining: 0,
            empty_message: false,
            colors: ThemeValue::Day.colors(),
            details: None,
            description_open: false,
            search_open: false,
            settings_open: false,
        }
    }
}

impl Screen {
    /// The book id a rendered row stands for.
    pub fn row_id(&self, row: usize) -> Option<&BookId> {
        self.rows.get(row).map(|preview| &preview.id)
    }

    pub fn is_dialog_open(&self, dialog: DialogKind) -> bool {
        match dialog {
            DialogKind::Description => self.description_open,
            DialogKind::Search => self.search_open,
            DialogKind::Settings => self.settings_open,
        }
    }

    pub fn option_label<'a>(&'a self, kind: OptionKind, value: &'a str) -> &'a str {
        let entries = match kind {
            OptionKind::Author => &self.authors,
            OptionKind::Genre => &self.genres,
        };
        entries
            .iter()
            .find(|entry| entry.value == value)
            .map_or(value, |entry| entry.label.as_str())
    }
}

impl RenderSink for Screen {
    fn render_book_window(&mut self, books: &[BookPreview], placement: WindowPlacement) {
        match placement {
            WindowPlacement::Replace => self.rows = books.to_vec(),
            WindowPlacement::Append => self.rows.extend_from_slice(books),
        }
    }

    fn render_option_list(&mut self, kind: OptionKind, entries: &[OptionEntry]) {
        match kind {
            OptionKind::Author => self.authors = entries.to_vec(),
            OptionKind::Genre => self.genres = entries.to_vec(),
        }
    }

    fn set_remaining_count(&mut self, remaining: usize) {
        self.remaining = remaining;
    }

    fn set_dialog_open(&mut self, dialog: DialogKind, open: bool) {
        match dialog {
            DialogKind::Description => {
                self.description_open = open;
                if !open {
                    self.details = None;
                }
            }
            DialogKind::Search => self.search_open = open,
            DialogKind::Settings => self.settings_open = open,
        }
    }

    fn show_empty_state(&mut self, show: bool) {
        self.empty_message = show;
    }

    fn apply_theme_colors(&mut self, colors: ThemeColors) {
        self.colors = colors;
    }

    fn show_book_details(&mut self, details: &BookDetails) {
        self.details = Some(details.clone());
    }
}
