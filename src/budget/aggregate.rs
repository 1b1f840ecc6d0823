//! Trip-budget aggregation: folds per-city estimates, trip-wide costs and
//! booked actuals into display-ready totals in a chosen currency.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::budget::booking::BookingRecord;
use crate::budget::category::BudgetCategory;
use crate::budget::line_item::{BudgetLineItem, CostRange};
use crate::currency::{format_range, Currency, Locale};
use crate::itinerary::{CityBudgetProfile, DayTokenLexicon};
use crate::rates::RateProvider;

/// Marker shown in place of every amount when the target rate is missing.
pub const UNAVAILABLE_DISPLAY: &str = "--";

/// Everything one aggregation run needs. Overrides are wholesale: a city
/// listed here contributes its override items and none of its defaults.
#[derive(Debug, Clone)]
pub struct AggregationRequest {
    pub cities: Vec<CityBudgetProfile>,
    pub trip_wide: Vec<BudgetLineItem>,
    pub overrides: HashMap<String, Vec<BudgetLineItem>>,
    pub bookings: Vec<BookingRecord>,
    pub target_currency: Currency,
    pub locale: Locale,
}

impl AggregationRequest {
    pub fn new(
        cities: Vec<CityBudgetProfile>,
        trip_wide: Vec<BudgetLineItem>,
        overrides: HashMap<String, Vec<BudgetLineItem>>,
        bookings: Vec<BookingRecord>,
        target_currency: Currency,
        locale: Locale,
    ) -> Self {
        Self {
            cities,
            trip_wide,
            overrides,
            bookings,
            target_currency,
            locale,
        }
    }
}

/// Per-category cost ranges in the working currency. Keys iterate in
/// category order, so identical inputs always render identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: BTreeMap<BudgetCategory, CostRange>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: BudgetCategory, range: CostRange) {
        self.entries
            .entry(category)
            .or_insert(CostRange::ZERO)
            .add(range);
    }

    pub fn replace(&mut self, category: BudgetCategory, range: CostRange) {
        self.entries.insert(category, range);
    }

    pub fn get(&self, category: &BudgetCategory) -> Option<&CostRange> {
        self.entries.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BudgetCategory, &CostRange)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn grand_total(&self) -> CostRange {
        let mut total = CostRange::ZERO;
        for range in self.entries.values() {
            total.add(*range);
        }
        total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationStatus {
    Complete,
    RateUnavailable,
}

/// Display-ready outcome of one aggregation run. Amounts are formatted
/// strings; numeric totals never leave the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub status: AggregationStatus,
    pub currency: Currency,
    pub total_display: String,
    pub per_category: BTreeMap<BudgetCategory, String>,
}

impl AggregationResult {
    pub fn is_complete(&self) -> bool {
        self.status == AggregationStatus::Complete
    }

    fn unavailable(
        currency: Currency,
        categories: impl IntoIterator<Item = BudgetCategory>,
    ) -> Self {
        let per_category = categories
            .into_iter()
            .map(|category| (category, UNAVAILABLE_DISPLAY.to_string()))
            .collect();
        Self {
            status: AggregationStatus::RateUnavailable,
            currency,
            total_display: UNAVAILABLE_DISPLAY.to_string(),
            per_category,
        }
    }
}

/// Folds a request into an [`AggregationResult`]. Estimates are summed in
/// the working currency; booked actuals replace the estimate of their
/// category; a single working-to-target rate converts the lot at the end.
pub struct BudgetAggregator {
    rates: Arc<dyn RateProvider>,
    lexicon: DayTokenLexicon,
    working_currency: Currency,
}

impl BudgetAggregator {
    pub fn new(rates: Arc<dyn RateProvider>) -> Self {
        Self {
            rates,
            lexicon: DayTokenLexicon::builtin().clone(),
            working_currency: Currency::Usd,
        }
    }

    pub fn with_lexicon(mut self, lexicon: DayTokenLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn working_currency(&self) -> Currency {
        self.working_currency
    }

    /// Sums estimate ranges only: trip-wide items first, then each city's
    /// effective items scaled by its stay length. Trip-wide entries always
    /// add and claim their category; a city-level one-time item contributes
    /// only while its category is unclaimed, so the first occurrence wins
    /// and later ones are dropped.
    pub fn estimate_totals(&self, request: &AggregationRequest) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        let mut contributed_once: HashSet<BudgetCategory> = HashSet::new();

        for item in &request.trip_wide {
            totals.add(item.category.clone(), item.parsed());
            contributed_once.insert(item.category.clone());
        }

        for city in &request.cities {
            let days = self.lexicon.day_count(&city.duration_label);
            let items = request
                .overrides
                .get(&city.city_id)
                .unwrap_or(&city.line_items);
            for item in items {
                let range = item.parsed();
                if item.per_day {
                    totals.add(item.category.clone(), range.scaled(days as f64));
                } else if contributed_once.insert(item.category.clone()) {
                    totals.add(item.category.clone(), range);
                }
            }
        }

        totals
    }

    /// Converts every booking into the working currency and sums per
    /// category. `None` when any needed rate is missing; rates are looked
    /// up once per distinct currency within the run.
    async fn booking_totals(
        &self,
        bookings: &[BookingRecord],
    ) -> Option<BTreeMap<BudgetCategory, f64>> {
        let mut run_rates: HashMap<Currency, f64> = HashMap::new();
        let mut totals: BTreeMap<BudgetCategory, f64> = BTreeMap::new();

        for booking in bookings {
            let amount = if booking.currency == self.working_currency {
                booking.amount
            } else {
                let rate = match run_rates.get(&booking.currency) {
                    Some(rate) => *rate,
                    None => {
                        let rate = self
                            .rates
                            .rate(booking.currency, self.working_currency)
                            .await?;
                        run_rates.insert(booking.currency, rate);
                        rate
                    }
                };
                booking.amount * rate
            };
            *totals.entry(booking.kind.category()).or_insert(0.0) += amount;
        }

        Some(totals)
    }

    /// Rate from the working currency into the requested one. Identity
    /// pairs resolve to 1.0 without touching the provider.
    async fn display_rate(&self, target: Currency) -> Option<f64> {
        if target == self.working_currency {
            return Some(1.0);
        }
        self.rates.rate(self.working_currency, target).await
    }

    pub async fn aggregate(&self, request: &AggregationRequest) -> AggregationResult {
        let mut totals = self.estimate_totals(request);

        let booked = match self.booking_totals(&request.bookings).await {
            Some(booked) => booked,
            None => {
                tracing::warn!("booking conversion rate unavailable, aborting aggregation");
                let mut categories: HashSet<BudgetCategory> =
                    totals.iter().map(|(category, _)| category.clone()).collect();
                for booking in &request.bookings {
                    categories.insert(booking.kind.category());
                }
                return AggregationResult::unavailable(request.target_currency, categories);
            }
        };
        for (category, actual) in booked {
            totals.replace(category, CostRange::uniform(actual));
        }

        let rate = match self.display_rate(request.target_currency).await {
            Some(rate) => rate,
            None => {
                tracing::warn!(
                    target = request.target_currency.code(),
                    "display rate unavailable"
                );
                let categories: Vec<BudgetCategory> =
                    totals.iter().map(|(category, _)| category.clone()).collect();
                return AggregationResult::unavailable(request.target_currency, categories);
            }
        };

        let per_category = totals
            .iter()
            .map(|(category, range)| {
                let scaled = range.scaled(rate);
                (
                    category.clone(),
                    format_range(request.locale, scaled.min, scaled.max),
                )
            })
            .collect();
        let total = totals.grand_total().scaled(rate);
        let total_display = format!(
            "{} {}",
            request.target_currency.code(),
            format_range(request.locale, total.min, total.max)
        );

        AggregationResult {
            status: AggregationStatus::Complete,
            currency: request.target_currency,
            total_display,
            per_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::StaticRates;

    fn aggregator() -> BudgetAggregator {
        BudgetAggregator::new(Arc::new(StaticRates))
    }

    fn city(id: &str, duration: &str, items: Vec<BudgetLineItem>) -> CityBudgetProfile {
        CityBudgetProfile::new(id, duration, items)
    }

    #[test]
    fn grand_total_sums_every_category() {
        let mut totals = CategoryTotals::default();
        totals.add(BudgetCategory::Food, CostRange::new(10.0, 20.0));
        totals.add(BudgetCategory::Transport, CostRange::new(5.5, 7.5));
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.grand_total(), CostRange::new(15.5, 27.5));
    }

    #[test]
    fn empty_request_accumulates_nothing() {
        let request = AggregationRequest::new(
            Vec::new(),
            Vec::new(),
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert!(totals.is_empty());
        assert_eq!(totals.grand_total(), CostRange::ZERO);
    }

    #[test]
    fn per_day_items_scale_with_stay_length() {
        let request = AggregationRequest::new(
            vec![city(
                "bariloche",
                "4 días",
                vec![BudgetLineItem::new(BudgetCategory::Food, "40-80", true)],
            )],
            Vec::new(),
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Food),
            Some(&CostRange::new(160.0, 320.0))
        );
    }

    #[test]
    fn one_time_items_ignore_stay_length() {
        let request = AggregationRequest::new(
            vec![city(
                "bariloche",
                "4 días",
                vec![BudgetLineItem::new(BudgetCategory::Activities, "120-200", false)],
            )],
            Vec::new(),
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Activities),
            Some(&CostRange::new(120.0, 200.0))
        );
    }

    #[test]
    fn unknown_duration_zeroes_per_day_items() {
        let request = AggregationRequest::new(
            vec![city(
                "misterio",
                "una temporada",
                vec![BudgetLineItem::new(BudgetCategory::Food, "40-80", true)],
            )],
            Vec::new(),
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(totals.get(&BudgetCategory::Food), Some(&CostRange::ZERO));
    }

    #[test]
    fn overrides_replace_city_defaults_wholesale() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "bariloche".to_string(),
            vec![BudgetLineItem::new(BudgetCategory::Food, "100", true)],
        );
        let request = AggregationRequest::new(
            vec![city(
                "bariloche",
                "2 días",
                vec![
                    BudgetLineItem::new(BudgetCategory::Food, "40-80", true),
                    BudgetLineItem::new(BudgetCategory::Transport, "10-25", true),
                ],
            )],
            Vec::new(),
            overrides,
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Food),
            Some(&CostRange::new(200.0, 200.0))
        );
        assert_eq!(totals.get(&BudgetCategory::Transport), None);
    }

    #[test]
    fn one_time_guard_keeps_first_city_value() {
        let request = AggregationRequest::new(
            vec![
                city(
                    "buenos-aires",
                    "2 días",
                    vec![BudgetLineItem::new(BudgetCategory::Activities, "50", false)],
                ),
                city(
                    "ushuaia",
                    "2 días",
                    vec![BudgetLineItem::new(BudgetCategory::Activities, "90", false)],
                ),
            ],
            Vec::new(),
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Activities),
            Some(&CostRange::new(50.0, 50.0))
        );
    }

    #[test]
    fn trip_wide_entries_always_add() {
        let request = AggregationRequest::new(
            Vec::new(),
            vec![
                BudgetLineItem::new(BudgetCategory::Flights, "3400-4600", false),
                BudgetLineItem::new(BudgetCategory::Flights, "120", false),
            ],
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Flights),
            Some(&CostRange::new(3520.0, 4720.0))
        );
    }

    #[test]
    fn trip_wide_items_claim_their_category_before_cities() {
        let request = AggregationRequest::new(
            vec![city(
                "buenos-aires",
                "2 días",
                vec![BudgetLineItem::new(BudgetCategory::Flights, "400", false)],
            )],
            vec![BudgetLineItem::new(BudgetCategory::Flights, "3400-4600", false)],
            HashMap::new(),
            Vec::new(),
            Currency::Usd,
            Locale::Spanish,
        );
        let totals = aggregator().estimate_totals(&request);
        assert_eq!(
            totals.get(&BudgetCategory::Flights),
            Some(&CostRange::new(3400.0, 4600.0))
        );
    }
}
