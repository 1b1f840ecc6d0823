use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a budget category, decoupled from display labels.
///
/// The built-in categories cover everything the trip catalog and booking
/// ledger produce; `Custom` carries user-added budget lines whose keys are
/// not known ahead of time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetCategory {
    Flights,
    Accommodation,
    Food,
    Transport,
    Activities,
    Custom(String),
}

impl BudgetCategory {
    /// The stable key string, identical across locales.
    pub fn key(&self) -> &str {
        match self {
            BudgetCategory::Flights => "flights",
            BudgetCategory::Accommodation => "accommodation",
            BudgetCategory::Food => "food",
            BudgetCategory::Transport => "transport",
            BudgetCategory::Activities => "activities",
            BudgetCategory::Custom(key) => key,
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "flights" => BudgetCategory::Flights,
            "accommodation" => BudgetCategory::Accommodation,
            "food" => BudgetCategory::Food,
            "transport" => BudgetCategory::Transport,
            "activities" => BudgetCategory::Activities,
            other => BudgetCategory::Custom(other.to_string()),
        }
    }
}

impl From<String> for BudgetCategory {
    fn from(key: String) -> Self {
        BudgetCategory::from_key(&key)
    }
}

impl From<BudgetCategory> for String {
    fn from(category: BudgetCategory) -> Self {
        category.key().to_string()
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
