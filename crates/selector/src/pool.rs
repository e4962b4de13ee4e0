//! The candidate pool of the progressive selector.

use crate::ranking::rank_order;
use data_loader::Movie;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// A movie ordered by [`rank_order`], so the set iterates best first
#[derive(Debug, Clone, Copy)]
struct Ranked<'a>(&'a Movie);

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(self.0, other.0)
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

/// Movies eligible for selection but not yet chosen.
///
/// Membership is keyed on the movie identifier. An identifier is admitted at
/// most once over the lifetime of the pool: once its movie has been taken,
/// another record with the same identifier is ignored.
#[derive(Debug, Default)]
pub struct CandidatePool<'a> {
    ranked: BTreeSet<Ranked<'a>>,
    admitted: HashSet<&'a str>,
}

impl<'a> CandidatePool<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a movie; returns false if its identifier was already admitted
    pub fn insert(&mut self, movie: &'a Movie) -> bool {
        if !self.admitted.insert(movie.id.as_str()) {
            return false;
        }
        self.ranked.insert(Ranked(movie))
    }

    /// Add every movie of the iterator
    pub fn extend(&mut self, movies: impl IntoIterator<Item = &'a Movie>) {
        for movie in movies {
            self.insert(movie);
        }
    }

    /// Remove and return up to `n` best ranked movies, best first
    pub fn take_top(&mut self, n: usize) -> Vec<&'a Movie> {
        let mut top = Vec::with_capacity(n.min(self.ranked.len()));
        while top.len() < n {
            match self.ranked.pop_first() {
                Some(Ranked(movie)) => top.push(movie),
                None => break,
            }
        }
        top
    }

    /// Whether the movie is currently waiting in the pool
    pub fn contains(&self, movie: &'a Movie) -> bool {
        self.ranked.contains(&Ranked(movie))
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CriticRatings, Year};

    fn movie(id: &str, year: Year, score: f64) -> Movie {
        let mut movie = Movie::new(id, year, CriticRatings::default());
        movie.score = score;
        movie
    }

    #[test]
    fn test_insert_dedups_by_id() {
        let a = movie("a", 2000, 5.0);
        let a_again = movie("a", 2001, 9.0);
        let mut pool = CandidatePool::new();

        assert!(pool.insert(&a));
        assert!(!pool.insert(&a));
        assert!(!pool.insert(&a_again));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_take_top_removes_best() {
        let a = movie("a", 2000, 5.0);
        let b = movie("b", 2000, 7.0);
        let c = movie("c", 2001, 6.0);
        let mut pool = CandidatePool::new();
        pool.extend([&a, &b, &c]);

        let top: Vec<&str> = pool.take_top(2).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(top, vec!["b", "c"]);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&a));
        assert!(!pool.contains(&b));
    }

    #[test]
    fn test_taken_movie_never_readmitted() {
        let a = movie("a", 2000, 5.0);
        let mut pool = CandidatePool::new();
        pool.insert(&a);
        assert_eq!(pool.take_top(1).len(), 1);

        assert!(!pool.insert(&a));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_take_top_short_pool() {
        let a = movie("a", 2000, 5.0);
        let mut pool = CandidatePool::new();
        pool.insert(&a);

        assert_eq!(pool.take_top(5).len(), 1);
        assert!(pool.take_top(5).is_empty());
    }
}
