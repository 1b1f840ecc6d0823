#![doc(test(attr(deny(warnings))))]

//! Valija Core provides the budget aggregation primitives behind a bilingual
//! trip-planning app: per-city estimates, booked actuals, currency
//! conversion and locale-aware display formatting.

pub mod budget;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod errors;
pub mod itinerary;
pub mod overrides;
pub mod rates;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Valija Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
