//! Compiled-in data for the Argentina itinerary: per-city default budget
//! profiles, locale-specific duration labels, the trip-wide flight budget
//! and the confirmed booking ledger.

use chrono::NaiveDate;

use crate::budget::{BookingKind, BookingRecord, BudgetCategory, BudgetLineItem};
use crate::currency::{Currency, Locale};
use crate::itinerary::{CityBudgetProfile, DurationResolver};

pub const BUENOS_AIRES: &str = "buenos-aires";
pub const PUERTO_IGUAZU: &str = "puerto-iguazu";
pub const BARILOCHE: &str = "bariloche";
pub const EL_CALAFATE: &str = "el-calafate";
pub const USHUAIA: &str = "ushuaia";

/// Itinerary order, north to south.
pub const CITY_IDS: [&str; 5] = [BUENOS_AIRES, PUERTO_IGUAZU, BARILOCHE, EL_CALAFATE, USHUAIA];

/// Stay length of `city_id` phrased in the locale's language. Two-day stays
/// use the dual form under the Hebrew locale.
pub fn duration_label(city_id: &str, locale: Locale) -> Option<&'static str> {
    let label = match (locale, city_id) {
        (Locale::Spanish, BUENOS_AIRES) => "4 días",
        (Locale::Spanish, PUERTO_IGUAZU) => "2 días",
        (Locale::Spanish, BARILOCHE) => "4 días",
        (Locale::Spanish, EL_CALAFATE) => "3 días",
        (Locale::Spanish, USHUAIA) => "2 días",
        (Locale::Hebrew, BUENOS_AIRES) => "4 ימים",
        (Locale::Hebrew, PUERTO_IGUAZU) => "יומיים",
        (Locale::Hebrew, BARILOCHE) => "4 ימים",
        (Locale::Hebrew, EL_CALAFATE) => "3 ימים",
        (Locale::Hebrew, USHUAIA) => "יומיים",
        _ => return None,
    };
    Some(label)
}

/// Default per-day estimate ranges in USD. Unknown cities have no defaults.
pub fn default_line_items(city_id: &str) -> Vec<BudgetLineItem> {
    let (accommodation, food, transport, activities) = match city_id {
        BUENOS_AIRES => ("70-150", "40-80", "10-25", "15-40"),
        PUERTO_IGUAZU => ("60-120", "35-70", "15-30", "45-90"),
        BARILOCHE => ("80-160", "40-85", "15-35", "30-80"),
        EL_CALAFATE => ("90-180", "45-90", "20-40", "60-120"),
        USHUAIA => ("85-170", "45-90", "15-30", "50-110"),
        _ => return Vec::new(),
    };
    vec![
        BudgetLineItem::new(BudgetCategory::Accommodation, accommodation, true),
        BudgetLineItem::new(BudgetCategory::Food, food, true),
        BudgetLineItem::new(BudgetCategory::Transport, transport, true),
        BudgetLineItem::new(BudgetCategory::Activities, activities, true),
    ]
}

/// The full itinerary with duration labels in the requested locale.
pub fn city_profiles(locale: Locale) -> Vec<CityBudgetProfile> {
    CITY_IDS
        .iter()
        .map(|city_id| {
            let label = duration_label(city_id, locale).unwrap_or_default();
            CityBudgetProfile::new(*city_id, label, default_line_items(city_id))
        })
        .collect()
}

/// Costs charged once for the whole trip, independent of stay lengths.
pub fn trip_wide_items() -> Vec<BudgetLineItem> {
    vec![BudgetLineItem::new(BudgetCategory::Flights, "3400-4600", false)]
}

/// Confirmed bookings. Dates are departure or check-in days.
pub fn booking_ledger() -> Vec<BookingRecord> {
    vec![
        BookingRecord::new(
            BookingKind::Flight,
            "TLV-EZE ida y vuelta, familia",
            3850.0,
            Currency::Usd,
        )
        .with_date(NaiveDate::from_ymd_opt(2026, 11, 10).unwrap()),
        BookingRecord::new(
            BookingKind::Flight,
            "AEP-BRC Aerolíneas Argentinas",
            420.0,
            Currency::Usd,
        )
        .with_date(NaiveDate::from_ymd_opt(2026, 11, 16).unwrap()),
        BookingRecord::new(
            BookingKind::Hotel,
            "Cabaña en Bariloche, 4 noches",
            980000.0,
            Currency::Ars,
        )
        .with_date(NaiveDate::from_ymd_opt(2026, 11, 16).unwrap()),
    ]
}

/// Resolver backed by the static itinerary, in one locale.
#[derive(Debug, Clone, Copy)]
pub struct CatalogDurations {
    locale: Locale,
}

impl CatalogDurations {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl DurationResolver for CatalogDurations {
    fn duration_descriptor(&self, city_id: &str) -> Option<String> {
        duration_label(city_id, self.locale).map(str::to_string)
    }
}
