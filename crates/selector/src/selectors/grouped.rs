//! Grouped Selector - every movie of each window, ranked
//!
//! Lists the whole dataset era by era. Windows walk back from the current
//! year like the progressive selector, with two adjustments at the old end:
//! - the last window of the span reaches down to the `oldest` floor
//! - a window that would leave less than a full group above the floor
//!   absorbs the remaining years, and a window that no longer fits a full
//!   group stops the walk

use crate::config::SelectorConfig;
use crate::error::Result;
use crate::ranking::{floored_windows, rank_order, Window};
use crate::selection::Selection;
use crate::selectors::YearIndex;
use crate::traits::Selector;
use data_loader::Movie;
use tracing::{debug, instrument};

/// Lists every eligible movie per window of years
#[derive(Debug, Clone)]
pub struct GroupedSelector {
    config: SelectorConfig,
}

impl GroupedSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Windows after applying the floor adjustments
    pub fn windows(&self) -> Result<Vec<Window>> {
        let group_size = self.config.validated_group_size()?;
        Ok(floored_windows(
            self.config.current_year,
            group_size,
            self.config.total_years,
            self.config.oldest,
        ))
    }
}

impl Selector for GroupedSelector {
    fn name(&self) -> &str {
        "GroupedSelector"
    }

    #[instrument(
        skip(self, movies),
        fields(group_size = self.config.group_size, oldest = self.config.oldest)
    )]
    fn select<'a>(&self, movies: &'a [Movie]) -> Result<Selection<'a>> {
        let windows = self.windows()?;
        let index = YearIndex::build(movies, self.config.include_documentaries);
        let mut selection = Selection::new();

        for window in windows {
            let mut ranked: Vec<&'a Movie> = index.in_window(window).collect();
            ranked.sort_by(|a, b| rank_order(a, b));
            debug!("Window {}: {} movies", window, ranked.len());
            selection.push(window, ranked);
        }

        Ok(selection)
    }
}
