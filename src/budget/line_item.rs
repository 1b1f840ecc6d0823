use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;

/// Accepted value shapes: a single non-negative number, or "min-max".
static VALUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(?:-(\d+(?:\.\d+)?))?$").expect("value pattern"));

/// One estimated budget line: a single amount or a min-max range in the
/// working currency, optionally charged per travel day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetLineItem {
    pub category: BudgetCategory,
    pub value: String,
    #[serde(default)]
    pub per_day: bool,
}

impl BudgetLineItem {
    pub fn new(category: BudgetCategory, value: impl Into<String>, per_day: bool) -> Self {
        Self {
            category,
            value: value.into(),
            per_day,
        }
    }

    pub fn parsed(&self) -> CostRange {
        CostRange::parse(&self.value)
    }
}

/// Parsed lower/upper bounds of a line-item value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub const ZERO: CostRange = CostRange { min: 0.0, max: 0.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds at the same value, as booking actuals produce.
    pub fn uniform(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Total parse of a raw value string. Accepts exactly `"120"` or
    /// `"40-80"`; anything else, including an inverted range or a padded
    /// string, yields (0, 0).
    pub fn parse(value: &str) -> CostRange {
        let Some(caps) = VALUE_PATTERN.captures(value) else {
            return CostRange::ZERO;
        };
        let min: f64 = caps[1].parse().unwrap_or(0.0);
        let max: f64 = match caps.get(2) {
            Some(upper) => upper.as_str().parse().unwrap_or(0.0),
            None => min,
        };
        if max < min {
            return CostRange::ZERO;
        }
        CostRange { min, max }
    }

    pub fn add(&mut self, other: CostRange) {
        self.min += other.min;
        self.max += other.max;
    }

    pub fn scaled(self, factor: f64) -> CostRange {
        CostRange {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}
