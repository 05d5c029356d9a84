//! Page-window slicing over the current match set.

use std::num::NonZeroUsize;

use crate::filter::MatchSet;

#[derive(Debug, Clone)]
pub struct Paginator {
    matches: MatchSet,
    page_index: usize,
    page_size: NonZeroUsize,
}

impl Paginator {
    pub fn new(matches: MatchSet, page_size: NonZeroUsize) -> Self {
        Self {
            matches,
            page_index: 0,
            page_size,
        }
    }

    /// Installs a new match set and goes back to the first page.
    pub fn replace(&mut self, matches: MatchSet) {
        self.matches = matches;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Advancing past the last page is allowed; the window is then empty.
    pub fn advance(&mut self) {
        self.page_index = self.page_index.saturating_add(1);
    }

    pub fn current_window(&self) -> &[usize] {
        let positions = self.matches.positions();
        let start = self.window_start().min(positions.len());
        let end = self.window_end().min(positions.len());
        &positions[start..end]
    }

    /// Everything shown from page 0 up to and including the current page.
    pub fn shown(&self) -> &[usize] {
        let positions = self.matches.positions();
        &positions[..self.window_end().min(positions.len())]
    }

    pub fn remaining(&self) -> usize {
        self.matches.len().saturating_sub(self.window_end())
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    fn window_start(&self) -> usize {
        self.page_index.saturating_mul(self.page_size.get())
    }

    fn window_end(&self) -> usize {
        self.page_index
            .saturating_add(1)
            .saturating_mul(self.page_size.get())
    }
}
