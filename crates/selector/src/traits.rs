//! Core trait shared by the selection strategies.

use crate::error::Result;
use crate::selection::Selection;
use data_loader::Movie;

/// A strategy that picks a curated subset of the dataset.
///
/// ## Design Note
/// - `Send + Sync` lets a selector sit behind an `Arc` next to the catalog
/// - The result borrows from `movies`; nothing is cloned during selection
/// - Implementations are pure: the same movies and parameters always give
///   the same selection
pub trait Selector: Send + Sync {
    /// Returns the name of this selector (for logging/debugging)
    fn name(&self) -> &str;

    /// Run the selection over the whole dataset.
    ///
    /// # Arguments
    /// * `movies` - The full dataset, in any order
    ///
    /// # Returns
    /// * `Ok(Selection)` - The picked movies, most recent window first
    /// * `Err` - If the selector parameters are invalid
    fn select<'a>(&self, movies: &'a [Movie]) -> Result<Selection<'a>>;
}
