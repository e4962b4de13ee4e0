//! # Data Loader Crate
//!
//! This crate loads the static movie dataset the top lists are computed from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, CriticRatings, Criteria, Catalog)
//! - **parser**: Parse the JSON export and the text score database
//! - **index**: Build and validate the Catalog, ranked listings
//! - **slug**: Derive movie identifiers from names
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, Criteria};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.json"))?;
//!
//! let godfather = catalog.get_movie("the-godfather").unwrap();
//! let nineties = catalog.filter(1990, 1999, Criteria::All, true);
//! println!("{} has {} movies from the nineties", godfather.name, nineties.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod slug;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::DatasetFormat;
pub use slug::slugify;
pub use types::{
    // Type aliases
    MovieId,
    Year,
    // Core types
    Catalog,
    CriticRatings,
    Movie,
    // Enums
    Criteria,
};
