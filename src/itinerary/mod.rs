//! Itinerary cities and the duration descriptors their day counts come from.

pub mod duration;

use serde::{Deserialize, Serialize};

use crate::budget::BudgetLineItem;

pub use duration::DayTokenLexicon;

/// Per-city itinerary entry: stable id, human-readable duration text, and
/// the default budget lines estimates start from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityBudgetProfile {
    pub city_id: String,
    pub duration_label: String,
    pub line_items: Vec<BudgetLineItem>,
}

impl CityBudgetProfile {
    pub fn new(
        city_id: impl Into<String>,
        duration_label: impl Into<String>,
        line_items: Vec<BudgetLineItem>,
    ) -> Self {
        Self {
            city_id: city_id.into(),
            duration_label: duration_label.into(),
            line_items,
        }
    }
}

/// Source of human-readable duration descriptors for itinerary cities. The
/// phrase format is locale-dependent; it only has to embed day-count tokens
/// a [`DayTokenLexicon`] can read.
pub trait DurationResolver: Send + Sync {
    fn duration_descriptor(&self, city_id: &str) -> Option<String>;
}
