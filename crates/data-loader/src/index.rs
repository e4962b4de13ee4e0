//! Catalog building, validation and ranked listings.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{info, instrument};

/// Dataset file formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// JSON export (`.json`)
    Json,
    /// Text score database (any other extension)
    Text,
}

impl DatasetFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Text,
        }
    }
}

impl Catalog {
    /// Load the dataset from a file
    ///
    /// Steps:
    /// 1. Parse the file (JSON export or text score database)
    /// 2. Insert every movie, rejecting duplicate identifiers
    /// 3. Validate the records
    #[instrument]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let movies = match DatasetFormat::from_path(path) {
            DatasetFormat::Json => parser::parse_json(path)?,
            DatasetFormat::Text => parser::parse_text_database(path)?,
        };
        let catalog = Self::from_movies(movies)?;

        info!(
            "Loaded {} movies ({} documentaries) from {}",
            catalog.len(),
            catalog.documentary_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Build a validated catalog from already parsed movies
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for movie in movies {
            catalog.insert_movie(movie)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every identifier and name is non-empty
    /// - Every score is a finite, non-negative number
    pub fn validate(&self) -> Result<()> {
        for movie in &self.movies {
            if movie.id.is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "movie '{}' ({}) has an empty id",
                    movie.name, movie.year
                )));
            }
            if movie.name.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "movie '{}' has an empty name",
                    movie.id
                )));
            }
            if !movie.score.is_finite() || movie.score < 0.0 {
                return Err(DataLoadError::InvalidValue {
                    field: format!("score of {}", movie.id),
                    value: movie.score.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Movies released in `[year_start, year_end]`, best first
    ///
    /// Ranked by the criteria value descending, then year descending, then
    /// identifier ascending.
    pub fn filter(
        &self,
        year_start: Year,
        year_end: Year,
        criteria: Criteria,
        exclude_documentaries: bool,
    ) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self
            .year_index
            .range(year_start..=year_end.max(year_start))
            .flat_map(|(_, positions)| positions.iter().map(|&pos| &self.movies[pos]))
            .filter(|m| m.year <= year_end)
            .filter(|m| !(exclude_documentaries && m.documentary))
            .collect();
        movies.sort_by(|a, b| compare_by(a, b, criteria));
        movies
    }
}

/// Best-first ordering under the given criteria
fn compare_by(a: &Movie, b: &Movie, criteria: Criteria) -> Ordering {
    b.rank_value(criteria)
        .total_cmp(&a.rank_value(criteria))
        .then_with(|| b.year.cmp(&a.year))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(name: &str, year: Year, imdb: u32, meta: u32) -> Movie {
        Movie::new(
            name,
            year,
            CriticRatings {
                imdb: Some(imdb),
                meta: Some(meta),
                ..Default::default()
            },
        )
    }

    fn create_test_catalog() -> Catalog {
        Catalog::from_movies(vec![
            movie("Old Classic", 1950, 90, 95),
            movie("Nineties Hit", 1995, 80, 70),
            movie("Modern Gem", 2015, 85, 90),
            movie("Modern Flop", 2015, 40, 30),
            movie("Recent", 2023, 75, 80).with_documentary(true),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DatasetFormat::from_path(Path::new("data/movies.json")), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_path(Path::new("data/MOVIES.JSON")), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_path(Path::new("database.txt")), DatasetFormat::Text);
        assert_eq!(DatasetFormat::from_path(Path::new("database")), DatasetFormat::Text);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_movies(vec![
            movie("Alien", 1979, 85, 89),
            movie("ALIEN", 1979, 85, 89),
        ]);
        assert!(matches!(result, Err(DataLoadError::DuplicateId { id }) if id == "alien"));
    }

    #[test]
    fn test_validate_rejects_nan_score() {
        let mut bad = movie("Broken", 2000, 50, 50);
        bad.score = f64::NAN;
        assert!(matches!(
            Catalog::from_movies(vec![bad]),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_filter_year_range() {
        let catalog = create_test_catalog();
        let movies = catalog.filter(1990, 2020, Criteria::All, false);
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["modern-gem", "nineties-hit", "modern-flop"]);
    }

    #[test]
    fn test_filter_by_criteria() {
        let catalog = create_test_catalog();
        let by_imdb = catalog.filter(1900, 2100, Criteria::Imdb, false);
        assert_eq!(by_imdb[0].id, "old-classic");
        // Unrated sources rank as zero, ties fall back to the newer movie
        let by_rotten = catalog.filter(1900, 2100, Criteria::Rotten, false);
        assert_eq!(by_rotten[0].id, "recent");
    }

    #[test]
    fn test_filter_excludes_documentaries() {
        let catalog = create_test_catalog();
        let all = catalog.filter(2020, 2025, Criteria::All, false);
        assert_eq!(all.len(), 1);
        let none = catalog.filter(2020, 2025, Criteria::All, true);
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_inverted_range_is_empty() {
        let catalog = create_test_catalog();
        assert!(catalog.filter(2020, 1990, Criteria::All, false).is_empty());
    }
}
