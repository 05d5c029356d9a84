use bookconnect_application::{
    BookDetails, BookPreview, DialogKind, OptionEntry, OptionKind, RenderSink, WindowPlacement,
};
use bookconnect_core::ThemeColors;

/// Collects the book window for `--print` instead of drawing it.
#[derive(Debug, Default)]
pub struct PlainSink {
    rows: Vec<BookPreview>,
    remaining: usize,
    empty: bool,
}

impl PlainSink {
    pub fn render(&self) -> String {
        if self.empty {
            return "No results found. Your filters might be too narrow.\n".to_string();
        }

        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!("{}\t{} by {}\n", row.id, row.title, row.author));
        }
        if self.remaining > 0 {
            out.push_str(&format!("Show more ({})\n", self.remaining));
        }
        out
    }
}

impl RenderSink for PlainSink {
    fn render_book_window(&mut self, books: &[BookPreview], placement: WindowPlacement) {
        match placement {
            WindowPlacement::Replace => self.rows = books.to_vec(),
            WindowPlacement::Append => self.rows.extend_from_slice(books),
        }
    }

    fn render_option_list(&mut self, _kind: OptionKind, _entries: &[OptionEntry]) {}

    fn set_remaining_count(&mut self, remaining: usize) {
        self.remaining = remaining;
    }

    fn set_dialog_open(&mut self, _dialog: DialogKind, _open: bool) {}

    fn show_empty_state(&mut self, show: bool) {
        self.empty = show;
    }

    fn apply_theme_colors(&mut self, _colors: ThemeColors) {}

    fn show_book_details(&mut self, _details: &BookDetails) {}
}
