//! Core domain types for the movie dataset.
//!
//! A [`Movie`] is an immutable record: identifier, release year, critic
//! ratings from several sources and the aggregate score derived from them.
//! The [`Catalog`] owns every record and keeps the lookups the selectors and
//! the CLI need (by identifier, by year).

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (slug of its name, e.g. "the-godfather")
pub type MovieId = String;

/// Calendar year
pub type Year = i32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Ratings collected from the individual review sources.
///
/// Every rating is on a 0-100 scale; IMDb's 0-10 rating is stored multiplied
/// by ten. Sources without a rating for the movie are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticRatings {
    #[serde(default)]
    pub imdb: Option<u32>,
    #[serde(default)]
    pub rotten: Option<u32>,
    #[serde(default)]
    pub meta: Option<u32>,
    #[serde(default)]
    pub rotten_user: Option<u32>,
    #[serde(default)]
    pub meta_user: Option<u32>,
}

impl CriticRatings {
    /// Number of sources contributing to the aggregate score
    pub const SOURCES: u32 = 5;

    /// Aggregate score: mean of the five ratings, missing ones counted as 0
    pub fn aggregate_score(&self) -> f64 {
        let total: u32 = [
            self.imdb,
            self.rotten,
            self.rotten_user,
            self.meta,
            self.meta_user,
        ]
        .iter()
        .map(|r| r.unwrap_or(0))
        .sum();
        f64::from(total) / f64::from(Self::SOURCES)
    }

    /// Rating for a single source, `None` for [`Criteria::All`]
    pub fn get(&self, criteria: Criteria) -> Option<u32> {
        match criteria {
            Criteria::All => None,
            Criteria::Imdb => self.imdb,
            Criteria::Rotten => self.rotten,
            Criteria::RottenUser => self.rotten_user,
            Criteria::Meta => self.meta,
            Criteria::MetaUser => self.meta_user,
        }
    }
}

/// A movie in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Display title
    pub name: String,
    pub year: Year,
    #[serde(flatten)]
    pub ratings: CriticRatings,
    #[serde(default)]
    pub documentary: bool,
    /// Primary ranking key
    pub score: f64,
}

impl Movie {
    /// Build a movie from its name and ratings, deriving id and score
    pub fn new(name: impl Into<String>, year: Year, ratings: CriticRatings) -> Self {
        let name = name.into();
        Self {
            id: crate::slug::slugify(&name),
            score: ratings.aggregate_score(),
            name,
            year,
            ratings,
            documentary: false,
        }
    }

    /// Mark the movie as a documentary (builder style)
    pub fn with_documentary(mut self, documentary: bool) -> Self {
        self.documentary = documentary;
        self
    }

    /// Value used to rank the movie under the given criteria
    ///
    /// A missing rating ranks as 0.
    pub fn rank_value(&self, criteria: Criteria) -> f64 {
        match criteria {
            Criteria::All => self.score,
            other => f64::from(self.ratings.get(other).unwrap_or(0)),
        }
    }
}

impl fmt::Display for Movie {
    /// One line in the layout of the original score listings:
    /// `year  meta|meta_user|rotten|rotten_user|imdb (score)  name`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.ratings;
        let cells: Vec<String> = [r.meta, r.meta_user, r.rotten, r.rotten_user, r.imdb]
            .iter()
            .map(|v| match v {
                Some(v) => format!("{:02}", v % 100),
                None => "--".to_string(),
            })
            .collect();
        write!(
            f,
            "{:4}  {} ({:4.1})  {}",
            self.year,
            cells.join("|"),
            self.score,
            short_name(&self.name, 60)
        )
    }
}

/// Truncate a name to `limit` characters, marking the cut with an ellipsis
fn short_name(name: &str, limit: usize) -> String {
    if name.chars().count() > limit {
        let mut short: String = name.chars().take(limit - 1).collect();
        short.push('…');
        short
    } else {
        name.to_string()
    }
}

/// Ranking criteria for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criteria {
    /// Aggregate score over all sources
    #[default]
    All,
    Imdb,
    Rotten,
    RottenUser,
    Meta,
    MetaUser,
}

impl FromStr for Criteria {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Criteria::All),
            "imdb" => Ok(Criteria::Imdb),
            "rotten" => Ok(Criteria::Rotten),
            "rotten_user" => Ok(Criteria::RottenUser),
            "meta" => Ok(Criteria::Meta),
            "meta_user" => Ok(Criteria::MetaUser),
            _ => Err(DataLoadError::InvalidValue {
                field: "criteria".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Dataset
// =============================================================================

/// Holds every movie plus the identifier and year lookups.
///
/// Movies keep their insertion order; `movies()` returns them in the order
/// they were loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    /// Position of each movie in `movies`, by identifier
    pub(crate) id_index: HashMap<MovieId, usize>,
    /// Positions grouped by release year (sorted by year)
    pub(crate) year_index: BTreeMap<Year, Vec<usize>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// All movies in load order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Get a movie by identifier
    pub fn get_movie(&self, id: &str) -> Option<&Movie> {
        self.id_index.get(id).map(|&pos| &self.movies[pos])
    }

    /// Oldest and most recent release year, `None` when empty
    pub fn year_span(&self) -> Option<(Year, Year)> {
        let first = self.year_index.keys().next()?;
        let last = self.year_index.keys().next_back()?;
        Some((*first, *last))
    }

    /// Insert a movie, rejecting a second record with the same identifier
    pub fn insert_movie(&mut self, movie: Movie) -> Result<()> {
        if self.id_index.contains_key(&movie.id) {
            return Err(DataLoadError::DuplicateId { id: movie.id });
        }
        let pos = self.movies.len();
        self.id_index.insert(movie.id.clone(), pos);
        self.year_index.entry(movie.year).or_default().push(pos);
        self.movies.push(movie);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Number of movies flagged as documentaries
    pub fn documentary_count(&self) -> usize {
        self.movies.iter().filter(|m| m.documentary).count()
    }
}
