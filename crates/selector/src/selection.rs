//! Selection results.

use crate::ranking::Window;
use data_loader::Movie;

/// Movies picked in one window, in pick order
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPicks<'a> {
    pub window: Window,
    pub movies: Vec<&'a Movie>,
}

/// Ordered result of a selector run: the windows that picked at least one
/// movie, most recent window first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    windows: Vec<WindowPicks<'a>>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the picks of a window; windows without picks are dropped
    pub fn push(&mut self, window: Window, movies: Vec<&'a Movie>) {
        if !movies.is_empty() {
            self.windows.push(WindowPicks { window, movies });
        }
    }

    pub fn windows(&self) -> &[WindowPicks<'a>] {
        &self.windows
    }

    /// Every picked movie in selection order
    pub fn movies(&self) -> impl Iterator<Item = &'a Movie> + '_ {
        self.windows.iter().flat_map(|w| w.movies.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.windows.iter().map(|w| w.movies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
