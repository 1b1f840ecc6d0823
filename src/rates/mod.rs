//! Exchange-rate providers: a live quote client, a static fallback table,
//! and a time-bounded cache decorator.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::currency::Currency;

/// Source of multiplicative exchange rates. `None` means no usable quote
/// could be produced; callers decide how to surface that. Implementations
/// need not special-case identity pairs; the aggregator short-circuits
/// those before calling.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn rate(&self, from: Currency, to: Currency) -> Option<f64>;
}

/// Fixed quotes used when no live source is reachable. Derived from
/// units-per-USD constants, so every pair resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRates;

impl StaticRates {
    fn units_per_usd(currency: Currency) -> f64 {
        match currency {
            Currency::Usd => 1.0,
            Currency::Ars => 1250.0,
            Currency::Eur => 0.92,
            Currency::Ils => 3.6,
        }
    }

    pub fn lookup(&self, from: Currency, to: Currency) -> f64 {
        Self::units_per_usd(to) / Self::units_per_usd(from)
    }
}

#[async_trait]
impl RateProvider for StaticRates {
    async fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        Some(self.lookup(from, to))
    }
}

/// Response document of the quote service (open.er-api.com shape, which the
/// app's serverless proxy forwards unchanged).
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    result: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Live quote client. With a fallback configured, any fetch failure or
/// missing code degrades to the static table instead of `None`.
pub struct HttpRates {
    client: reqwest::Client,
    base_url: String,
    fallback: Option<StaticRates>,
}

impl HttpRates {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            fallback: None,
        }
    }

    /// Answers from the static table whenever the live service fails.
    pub fn with_fallback(mut self) -> Self {
        self.fallback = Some(StaticRates);
        self
    }

    async fn fetch(&self, from: Currency, to: Currency) -> Result<Option<f64>, reqwest::Error> {
        let url = format!("{}/v6/latest/{}", self.base_url, from.code());
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let quote: QuoteResponse = response.json().await?;
        if quote.result != "success" {
            return Ok(None);
        }
        Ok(quote.rates.get(to.code()).copied())
    }
}

#[async_trait]
impl RateProvider for HttpRates {
    async fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        match self.fetch(from, to).await {
            Ok(Some(rate)) => Some(rate),
            Ok(None) => {
                tracing::warn!(
                    from = from.code(),
                    to = to.code(),
                    "quote service had no usable rate"
                );
                self.fallback.as_ref().map(|table| table.lookup(from, to))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    from = from.code(),
                    to = to.code(),
                    "quote fetch failed"
                );
                self.fallback.as_ref().map(|table| table.lookup(from, to))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: f64,
    fetched_at: DateTime<Utc>,
}

/// Time-bounded cache in front of another provider. Entries expire after
/// the TTL and are refetched lazily on the next lookup; unavailable results
/// are not cached, so an outage heals on the next call.
pub struct CachedRates<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<(Currency, Currency), CachedRate>>,
}

impl<P> CachedRates<P> {
    /// Caches quotes for one hour.
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, Duration::hours(1))
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<P: RateProvider> RateProvider for CachedRates<P> {
    async fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        let now = Utc::now();
        {
            let entries = self.entries.lock().expect("rate cache mutex poisoned");
            if let Some(entry) = entries.get(&(from, to)) {
                if now - entry.fetched_at < self.ttl {
                    return Some(entry.rate);
                }
            }
        }
        let rate = self.inner.rate(from, to).await?;
        let mut entries = self.entries.lock().expect("rate cache mutex poisoned");
        entries.insert((from, to), CachedRate { rate, fetched_at: now });
        Some(rate)
    }
}
