//! Progressive Selector - fixed quota per window with carry-over
//!
//! Builds a bounded top list by walking back in time one window of
//! `group_size` years at a time:
//!
//! ## Algorithm
//! 1. Group the eligible movies by year (once)
//! 2. For each window, most recent first:
//!    - Add the movies of the window's years to the candidate pool
//!    - Rank the whole pool (score desc, year desc, id asc)
//!    - Take the top `group_size` movies out of the pool
//! 3. Whatever is left in the pool at the end is discarded
//!
//! A movie that loses a cut stays in the pool, so it can still win a later
//! (older) window once the quota forces a fresh cut. The result favours the
//! best movies of recent history, re-evaluated as history deepens.

use crate::config::SelectorConfig;
use crate::error::Result;
use crate::pool::CandidatePool;
use crate::ranking::windows;
use crate::selection::Selection;
use crate::selectors::YearIndex;
use crate::traits::Selector;
use data_loader::Movie;
use tracing::{debug, instrument};

/// Selects at most `group_size` movies per window, carrying unpicked
/// candidates over to the following windows.
#[derive(Debug, Clone)]
pub struct ProgressiveSelector {
    config: SelectorConfig,
}

impl ProgressiveSelector {
    /// Create a new ProgressiveSelector.
    ///
    /// Parameters are checked when `select` runs.
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Upper bound on the selection size: one quota per window
    pub fn max_len(&self) -> usize {
        let group = usize::try_from(self.config.group_size).unwrap_or(0);
        let years = usize::try_from(self.config.total_years).unwrap_or(0);
        if group == 0 {
            return 0;
        }
        years.div_ceil(group) * group
    }
}

impl Selector for ProgressiveSelector {
    fn name(&self) -> &str {
        "ProgressiveSelector"
    }

    #[instrument(
        skip(self, movies),
        fields(
            group_size = self.config.group_size,
            total_years = self.config.total_years,
            current_year = self.config.current_year,
        )
    )]
    fn select<'a>(&self, movies: &'a [Movie]) -> Result<Selection<'a>> {
        let group_size = self.config.validated_group_size()?;
        let quota = usize::try_from(group_size).unwrap_or(1);

        let index = YearIndex::build(movies, self.config.include_documentaries);
        debug!("{} eligible movies out of {}", index.len(), movies.len());

        let mut pool = CandidatePool::new();
        let mut selection = Selection::new();

        for window in windows(self.config.current_year, group_size, self.config.total_years) {
            pool.extend(index.in_window(window));
            let picks = pool.take_top(quota);
            debug!(
                "Window {}: picked {} (carried over: {})",
                window,
                picks.len(),
                pool.len()
            );
            selection.push(window, picks);
        }

        debug!(
            "Selected {} movies, discarded {} candidates",
            selection.len(),
            pool.len()
        );
        Ok(selection)
    }
}
