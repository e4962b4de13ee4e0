//! Selector parameters.

use crate::error::{Result, SelectionError};
use chrono::Datelike;
use data_loader::Year;
use serde::{Deserialize, Serialize};

/// Default number of years per window (and movies picked per window)
pub const DEFAULT_GROUP_SIZE: i32 = 5;

/// Default span of years walked back from the current year
pub const DEFAULT_TOTAL_YEARS: i32 = 100;

/// Default floor year for the grouped listing
pub const DEFAULT_OLDEST: Year = 1900;

/// Parameters shared by every selector.
///
/// Fields missing from a deserialized config take their default values, so a
/// config file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Years per window; also the per-window quota of the progressive selector
    pub group_size: i32,
    /// Span of years considered, counted back from `current_year`
    pub total_years: i32,
    /// Let documentaries compete with the other movies
    pub include_documentaries: bool,
    /// Most recent year of the first window
    pub current_year: Year,
    /// Floor year for the grouped listing
    pub oldest: Year,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            total_years: DEFAULT_TOTAL_YEARS,
            include_documentaries: false,
            current_year: present_year(),
            oldest: DEFAULT_OLDEST,
        }
    }
}

impl SelectorConfig {
    /// Configure the window size (default: 5)
    pub fn with_group_size(mut self, group_size: i32) -> Self {
        self.group_size = group_size;
        self
    }

    /// Configure the span of years (default: 100)
    pub fn with_total_years(mut self, total_years: i32) -> Self {
        self.total_years = total_years;
        self
    }

    /// Configure whether documentaries are eligible (default: false)
    pub fn with_documentaries(mut self, include: bool) -> Self {
        self.include_documentaries = include;
        self
    }

    /// Pin the current year (default: the present calendar year)
    pub fn with_current_year(mut self, year: Year) -> Self {
        self.current_year = year;
        self
    }

    /// Configure the grouped listing floor (default: 1900)
    pub fn with_oldest(mut self, oldest: Year) -> Self {
        self.oldest = oldest;
        self
    }

    /// Group size checked to be at least 1
    pub fn validated_group_size(&self) -> Result<i32> {
        if self.group_size < 1 {
            return Err(SelectionError::InvalidParameter {
                name: "group_size",
                value: i64::from(self.group_size),
                min: 1,
            });
        }
        Ok(self.group_size)
    }
}

/// The present calendar year in local time
pub fn present_year() -> Year {
    chrono::Local::now().year()
}
