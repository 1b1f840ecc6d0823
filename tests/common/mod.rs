use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use valija_core::currency::Currency;
use valija_core::rates::RateProvider;

/// Provider answering from a fixed quote table, optionally after a delay.
/// Pairs outside the table resolve to `None`.
pub struct ScriptedRates {
    quotes: HashMap<(Currency, Currency), f64>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedRates {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn quote(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.quotes.insert((from, to), rate);
        self
    }

    #[allow(dead_code)]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedRates {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for ScriptedRates {
    async fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.quotes.get(&(from, to)).copied()
    }
}
