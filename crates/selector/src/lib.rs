//! Top list selection over the movie catalog.
//!
//! This crate provides:
//! - Selector trait and the progressive, iterative and grouped selectors
//! - CandidatePool, the carry-over set of the progressive selector
//! - TopList, the computed-once result with its display orders
//!
//! ## Architecture
//! A selection runs in three stages:
//! 1. Eligible movies (documentaries optional) are grouped by year
//! 2. The selector walks windows of years back from the current year
//! 3. The picks are frozen into a TopList sorted by year, score and id
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::Catalog;
//! use selector::{ProgressiveSelector, SelectorConfig, TopList, ViewOrder};
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.json"))?;
//!
//! let config = SelectorConfig::default().with_group_size(5).with_total_years(100);
//! let top = TopList::compute(&ProgressiveSelector::new(config), catalog.movies())?;
//!
//! for movie in top.view(ViewOrder::Year) {
//!     println!("{}", movie);
//! }
//! ```

pub mod config;
pub mod error;
pub mod pool;
pub mod ranking;
pub mod selection;
pub mod selectors;
pub mod top_list;
pub mod traits;

// Re-export main types
pub use config::SelectorConfig;
pub use error::{Result, SelectionError};
pub use pool::CandidatePool;
pub use ranking::{rank_order, Window};
pub use selection::{Selection, WindowPicks};
pub use selectors::{GroupedSelector, IterativeSelector, ProgressiveSelector};
pub use top_list::{TopList, ViewOrder};
pub use traits::Selector;
