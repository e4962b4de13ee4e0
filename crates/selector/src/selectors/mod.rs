//! Selector implementations.
//!
//! - [`ProgressiveSelector`]: fixed quota per window with carry-over of the
//!   movies that lost a cut
//! - [`IterativeSelector`]: the best movie of each year
//! - [`GroupedSelector`]: every movie of each window, ranked

pub mod grouped;
pub mod iterative;
pub mod progressive;

// Re-export for convenience
pub use grouped::GroupedSelector;
pub use iterative::IterativeSelector;
pub use progressive::ProgressiveSelector;

use crate::ranking::Window;
use data_loader::{Movie, Year};
use std::collections::BTreeMap;

/// Eligible movies grouped by release year.
///
/// Built once per run and reused by every window. Documentaries are left out
/// unless `include_documentaries` is set.
pub(crate) struct YearIndex<'a> {
    by_year: BTreeMap<Year, Vec<&'a Movie>>,
}

impl<'a> YearIndex<'a> {
    pub(crate) fn build(movies: &'a [Movie], include_documentaries: bool) -> Self {
        let mut by_year: BTreeMap<Year, Vec<&'a Movie>> = BTreeMap::new();
        for movie in movies
            .iter()
            .filter(|m| include_documentaries || !m.documentary)
        {
            by_year.entry(movie.year).or_default().push(movie);
        }
        Self { by_year }
    }

    /// Movies released inside the window, oldest year first
    pub(crate) fn in_window(&self, window: Window) -> impl Iterator<Item = &'a Movie> + '_ {
        let range = if window.start <= window.end {
            self.by_year.range(window.start..=window.end)
        } else {
            self.by_year.range(window.end..window.end)
        };
        range.flat_map(|(_, movies)| movies.iter().copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.by_year.values().map(Vec::len).sum()
    }
}
