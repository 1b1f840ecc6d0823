//! Budget domain: categories, estimate line items, booked actuals and the
//! aggregator that folds them into display-ready totals.

pub mod aggregate;
pub mod booking;
pub mod category;
pub mod line_item;

pub use aggregate::{
    AggregationRequest, AggregationResult, AggregationStatus, BudgetAggregator, CategoryTotals,
    UNAVAILABLE_DISPLAY,
};
pub use booking::{BookingKind, BookingRecord};
pub use category::BudgetCategory;
pub use line_item::{BudgetLineItem, CostRange};
