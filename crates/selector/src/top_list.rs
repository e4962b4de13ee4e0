//! The cached top list handed to the presentation layer.
//!
//! A [`TopList`] owns a copy of the selected movies and precomputes the
//! three display orders once. It is immutable afterwards and can be shared
//! behind an `Arc` for the rest of the process.

use crate::error::Result;
use crate::ranking::{id_order, rank_order, year_order, Window};
use crate::selection::Selection;
use crate::traits::Selector;
use data_loader::Movie;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::info;

/// Presentation orders of a top list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewOrder {
    /// The order the selector picked the movies in
    #[default]
    Selection,
    /// Year descending
    Year,
    /// Score descending
    Score,
    /// Identifier ascending
    Id,
}

/// Movies of one window, as positions in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpan {
    pub window: Window,
    pub range: Range<usize>,
}

/// An immutable, precomputed top list
#[derive(Debug, Clone, Default)]
pub struct TopList {
    movies: Vec<Movie>,
    windows: Vec<WindowSpan>,
    by_year: Vec<usize>,
    by_score: Vec<usize>,
    by_id: Vec<usize>,
}

impl TopList {
    /// Run the selector once and freeze its result
    pub fn compute(selector: &dyn Selector, movies: &[Movie]) -> Result<Self> {
        let selection = selector.select(movies)?;
        let top = Self::from_selection(&selection);
        info!(
            "{} selected {} of {} movies",
            selector.name(),
            top.len(),
            movies.len()
        );
        Ok(top)
    }

    /// Copy a selection and build the display orders
    pub fn from_selection(selection: &Selection<'_>) -> Self {
        let mut movies = Vec::with_capacity(selection.len());
        let mut windows = Vec::with_capacity(selection.windows().len());
        for picks in selection.windows() {
            let start = movies.len();
            movies.extend(picks.movies.iter().map(|&m| m.clone()));
            windows.push(WindowSpan {
                window: picks.window,
                range: start..movies.len(),
            });
        }

        // The three orders are independent; sort them in parallel
        let ((by_year, by_score), by_id) = rayon::join(
            || {
                rayon::join(
                    || sorted_positions(&movies, year_order),
                    || sorted_positions(&movies, rank_order),
                )
            },
            || sorted_positions(&movies, id_order),
        );

        Self {
            movies,
            windows,
            by_year,
            by_score,
            by_id,
        }
    }

    /// Movies in the requested order
    pub fn view(&self, order: ViewOrder) -> Vec<&Movie> {
        let positions = match order {
            ViewOrder::Selection => return self.movies.iter().collect(),
            ViewOrder::Year => &self.by_year,
            ViewOrder::Score => &self.by_score,
            ViewOrder::Id => &self.by_id,
        };
        positions.iter().map(|&pos| &self.movies[pos]).collect()
    }

    /// Movies in selection order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn by_year(&self) -> Vec<&Movie> {
        self.view(ViewOrder::Year)
    }

    pub fn by_score(&self) -> Vec<&Movie> {
        self.view(ViewOrder::Score)
    }

    pub fn by_id(&self) -> Vec<&Movie> {
        self.view(ViewOrder::Id)
    }

    /// Windows with the movies they picked
    pub fn windows(&self) -> impl Iterator<Item = (Window, &[Movie])> + '_ {
        self.windows
            .iter()
            .map(|span| (span.window, &self.movies[span.range.clone()]))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

fn sorted_positions(movies: &[Movie], order: fn(&Movie, &Movie) -> Ordering) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..movies.len()).collect();
    positions.sort_by(|&a, &b| order(&movies[a], &movies[b]));
    positions
}
