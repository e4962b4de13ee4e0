//! Iterative Selector - the best movie of each year
//!
//! Walks back `total_years` years from the current year and picks the single
//! best ranked movie released that year. There is no carry-over: a year
//! without eligible movies contributes nothing.
//!
//! The walk shares the floor of the grouped selector: the last step covers
//! every year down to `oldest` and picks the best of those, and no year
//! before `oldest` is ever looked at.

use crate::config::SelectorConfig;
use crate::error::Result;
use crate::ranking::{floored_windows, rank_order};
use crate::selection::Selection;
use crate::selectors::YearIndex;
use crate::traits::Selector;
use data_loader::Movie;
use tracing::{debug, instrument};

/// Picks one movie per year
#[derive(Debug, Clone)]
pub struct IterativeSelector {
    config: SelectorConfig,
}

impl IterativeSelector {
    /// Create a new IterativeSelector; `group_size` is ignored
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }
}

impl Selector for IterativeSelector {
    fn name(&self) -> &str {
        "IterativeSelector"
    }

    #[instrument(
        skip(self, movies),
        fields(total_years = self.config.total_years, oldest = self.config.oldest)
    )]
    fn select<'a>(&self, movies: &'a [Movie]) -> Result<Selection<'a>> {
        let index = YearIndex::build(movies, self.config.include_documentaries);
        let mut selection = Selection::new();

        let windows = floored_windows(
            self.config.current_year,
            1,
            self.config.total_years,
            self.config.oldest,
        );
        for window in windows {
            let best = index.in_window(window).min_by(|a, b| rank_order(a, b));
            selection.push(window, best.into_iter().collect());
        }

        debug!("Selected {} movies", selection.len());
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::Window;
    use data_loader::{CriticRatings, Year};

    fn movie(id: &str, year: Year, score: f64) -> Movie {
        let mut movie = Movie::new(id, year, CriticRatings::default());
        movie.score = score;
        movie
    }

    #[test]
    fn test_best_per_year() {
        let movies = vec![
            movie("a", 2020, 9.0),
            movie("b", 2020, 8.0),
            movie("c", 2021, 7.0),
            movie("d", 2019, 9.5),
            movie("e", 2017, 6.0),
        ];
        let selector = IterativeSelector::new(
            SelectorConfig::default()
                .with_total_years(5)
                .with_current_year(2021),
        );

        let selection = selector.select(&movies).unwrap();
        let ids: Vec<&str> = selection.movies().map(|m| m.id.as_str()).collect();
        // 2018 has no movie; "b" never gets a second chance
        assert_eq!(ids, vec!["c", "a", "d", "e"]);
    }

    #[test]
    fn test_last_step_picks_best_oldie() {
        let movies = vec![movie("old", 2010, 7.0), movie("older", 1950, 8.0)];
        let selector = IterativeSelector::new(
            SelectorConfig::default()
                .with_total_years(3)
                .with_current_year(2021)
                .with_oldest(1900),
        );

        let selection = selector.select(&movies).unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.windows()[0].window, Window::new(1900, 2019));
        assert_eq!(selection.windows()[0].movies[0].id, "older");
    }

    #[test]
    fn test_never_looks_before_oldest() {
        let movies: Vec<Movie> = (2015..=2021)
            .map(|year| movie(&format!("m{}", year), year, 5.0))
            .collect();
        let selector = IterativeSelector::new(
            SelectorConfig::default()
                .with_current_year(2021)
                .with_oldest(2019),
        );

        let years: Vec<Year> = selector.select(&movies).unwrap().movies().map(|m| m.year).collect();
        assert_eq!(years, vec![2021, 2020, 2019]);
    }

    #[test]
    fn test_ignores_group_size() {
        let movies = vec![movie("a", 2021, 9.0)];
        let selector = IterativeSelector::new(
            SelectorConfig::default()
                .with_group_size(0)
                .with_current_year(2021),
        );
        assert_eq!(selector.select(&movies).unwrap().len(), 1);
    }
}
