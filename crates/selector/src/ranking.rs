//! Orderings over movies and the backward walk of year windows.
//!
//! Every ordering here is total: the final key is the movie identifier, so
//! sorting the same records always yields the same sequence.

use data_loader::{Movie, Year};
use std::cmp::Ordering;
use std::fmt;

/// Selection ranking: score descending, then year descending (the more
/// recent movie wins a tie), then identifier ascending.
pub fn rank_order(a: &Movie, b: &Movie) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.year.cmp(&a.year))
        .then_with(|| a.id.cmp(&b.id))
}

/// Year descending, best first within a year
pub fn year_order(a: &Movie, b: &Movie) -> Ordering {
    b.year.cmp(&a.year).then_with(|| rank_order(a, b))
}

/// Identifier ascending
pub fn id_order(a: &Movie, b: &Movie) -> Ordering {
    a.id.cmp(&b.id).then_with(|| rank_order(a, b))
}

/// A contiguous, inclusive block of years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub start: Year,
    pub end: Year,
}

impl Window {
    pub fn new(start: Year, end: Year) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.end)
        } else {
            write!(f, "{} TO {}", self.start, self.end)
        }
    }
}

/// Windows of `group_size` years walking back from `current_year`
///
/// Window `k` ends at `current_year - k * group_size`; windows are produced
/// while `k * group_size < total_years`, so a span that is not a multiple of
/// the group size still gets a final full window. `group_size` must be at
/// least 1.
pub fn windows(current_year: Year, group_size: i32, total_years: i32) -> impl Iterator<Item = Window> {
    let step = usize::try_from(group_size.max(1)).unwrap_or(1);
    (0..total_years.max(0)).step_by(step).map(move |index| {
        let end = current_year.saturating_sub(index);
        let start = end.saturating_sub(group_size.max(1) - 1);
        Window::new(start, end)
    })
}

/// [`windows`] adjusted at the old end of the catalog
///
/// - the last window of the span reaches down to `oldest`
/// - no window starts before `oldest`; a window that would leave less than
///   a full group above the floor absorbs the remaining years
/// - the walk stops at the first window that no longer spans a full group
pub fn floored_windows(current_year: Year, group_size: i32, total_years: i32, oldest: Year) -> Vec<Window> {
    let stride = i64::from(group_size.max(1));
    let mut adjusted = Vec::new();
    for (k, window) in windows(current_year, group_size, total_years).enumerate() {
        let index = i64::try_from(k).unwrap_or(i64::MAX).saturating_mul(stride);
        let last = index.saturating_add(stride) >= i64::from(total_years);

        let mut start = if last { oldest } else { window.start };
        start = start.max(oldest);
        if i64::from(start) - stride < i64::from(oldest) {
            start = oldest;
        }
        if i64::from(window.end) - i64::from(start) < stride - 1 {
            break;
        }
        adjusted.push(Window::new(start, window.end));
    }
    adjusted
}
