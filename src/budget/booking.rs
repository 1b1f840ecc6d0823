use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use crate::currency::Currency;

/// The kind of authoritative booking backing a cost record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingKind {
    #[serde(rename = "flight")]
    Flight,
    #[serde(rename = "hotel")]
    Hotel,
    #[serde(rename = "local-transport")]
    LocalTransport,
}

impl BookingKind {
    /// Fixed mapping from booking kind to the budget category it settles.
    pub fn category(&self) -> BudgetCategory {
        match self {
            BookingKind::Flight => BudgetCategory::Flights,
            BookingKind::Hotel => BudgetCategory::Accommodation,
            BookingKind::LocalTransport => BudgetCategory::Transport,
        }
    }
}

/// An authoritative booked cost. When present, the summed amounts for a
/// category replace that category's accumulated estimate outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub kind: BookingKind,
    pub label: String,
    pub amount: f64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl BookingRecord {
    pub fn new(kind: BookingKind, label: impl Into<String>, amount: f64, currency: Currency) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
            currency,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_fixed_categories() {
        assert_eq!(BookingKind::Flight.category(), BudgetCategory::Flights);
        assert_eq!(BookingKind::Hotel.category(), BudgetCategory::Accommodation);
        assert_eq!(BookingKind::LocalTransport.category(), BudgetCategory::Transport);
    }

    #[test]
    fn record_serializes_without_empty_date() {
        let record = BookingRecord::new(BookingKind::Hotel, "Cabin", 980000.0, Currency::Ars);
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("date"), "{json}");
    }
}
