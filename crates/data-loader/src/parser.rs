//! Parsers for the two dataset formats.
//!
//! - JSON export: an array of movie objects
//!   (`id`, `name`, `year`, `imdb`, `rotten`, `meta`, `rotten_user`,
//!   `meta_user`, `documentary`, `score`)
//! - Text score database, one movie per line:
//!   `MMM UUU RRR SSS III [D] (YYYY) Name`
//!   with the ratings in the order meta, meta_user, rotten, rotten_user, imdb

use crate::error::{DataLoadError, Result};
use crate::slug::slugify;
use crate::types::*;
use rayon::prelude::*;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Number of rating columns in a text database line
const RATING_COLUMNS: usize = 5;

/// Placeholder written for a missing rating
const MISSING_RATING: &str = "0..";

/// Read a whole file, mapping a missing file to [`DataLoadError::FileNotFound`]
fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// JSON export
// =============================================================================

/// Record as found in the JSON export, where `id` and `score` may be absent
#[derive(Debug, Deserialize)]
struct RawMovie {
    #[serde(default)]
    id: Option<MovieId>,
    name: String,
    year: Year,
    #[serde(flatten)]
    ratings: CriticRatings,
    #[serde(default)]
    documentary: bool,
    #[serde(default)]
    score: Option<f64>,
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Movie {
            id: raw.id.unwrap_or_else(|| slugify(&raw.name)),
            score: raw.score.unwrap_or_else(|| raw.ratings.aggregate_score()),
            name: raw.name,
            year: raw.year,
            ratings: raw.ratings,
            documentary: raw.documentary,
        }
    }
}

/// Parse a JSON string holding an array of movies
pub fn parse_json_str(content: &str) -> Result<Vec<Movie>> {
    let raw: Vec<RawMovie> = serde_json::from_str(content)?;
    Ok(raw.into_iter().map(Movie::from).collect())
}

/// Parse the JSON export file
pub fn parse_json(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    let movies = parse_json_str(&content)?;
    debug!("Parsed {} movies from {}", movies.len(), path.display());
    Ok(movies)
}

// =============================================================================
// Text score database
// =============================================================================

/// Parse the text score database
///
/// Blank lines and group headers (`--- 2020 TO 2024 ---`) are skipped.
/// Lines are parsed in parallel; the output keeps file order.
pub fn parse_text_database(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    let file = file_name(path);
    let movies = parse_text_str(&content, &file)?;
    debug!("Parsed {} movies from {}", movies.len(), path.display());
    Ok(movies)
}

/// Parse text database content; `file` is only used in error messages
pub fn parse_text_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let lines: Vec<&str> = content.lines().collect();
    lines
        .par_iter()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, file, idx + 1).transpose())
        .collect()
}

/// Parse one line, `Ok(None)` for lines that carry no movie
fn parse_line(line: &str, file: &str, line_no: usize) -> Result<Option<Movie>> {
    let line_trimmed = line.trim();
    if line_trimmed.is_empty() || line_trimmed.starts_with("---") {
        return Ok(None);
    }

    let parse_error = |reason: String| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason,
    };

    // Rating columns
    let mut rest = line_trimmed;
    let mut values = [None; RATING_COLUMNS];
    for value in values.iter_mut() {
        let (token, tail) =
            split_token(rest).ok_or_else(|| parse_error("Missing rating column".to_string()))?;
        *value = parse_rating(token).map_err(parse_error)?;
        rest = tail;
    }
    let [meta, meta_user, rotten, rotten_user, imdb] = values;

    // Optional documentary marker, then the year
    let (mut token, mut tail) =
        split_token(rest).ok_or_else(|| parse_error("Missing year".to_string()))?;
    let documentary = token == "D";
    if documentary {
        (token, tail) = split_token(tail).ok_or_else(|| parse_error("Missing year".to_string()))?;
    }
    let year = parse_year(token).map_err(parse_error)?;

    let name = tail.trim();
    if name.is_empty() {
        return Err(parse_error("Missing name".to_string()));
    }

    let ratings = CriticRatings {
        imdb,
        rotten,
        meta,
        rotten_user,
        meta_user,
    };
    Ok(Some(Movie::new(name, year, ratings).with_documentary(documentary)))
}

/// Split off the first whitespace-delimited token
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Parse a three digit rating column
///
/// Example: "085" -> Ok(Some(85))
///          "0.." -> Ok(None)
fn parse_rating(token: &str) -> std::result::Result<Option<u32>, String> {
    if token == MISSING_RATING {
        return Ok(None);
    }
    if token.len() != 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid rating: {}", token));
    }
    token
        .parse()
        .map(Some)
        .map_err(|e| format!("Invalid rating {}: {}", token, e))
}

/// Parse a year written as "(1995)"
fn parse_year(token: &str) -> std::result::Result<Year, String> {
    let digits = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .filter(|t| t.len() == 4)
        .ok_or_else(|| format!("Invalid year: {}", token))?;
    digits
        .parse()
        .map_err(|e| format!("Invalid year {}: {}", token, e))
}
