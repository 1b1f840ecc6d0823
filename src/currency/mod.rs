use std::fmt;

use serde::{Deserialize, Serialize};

/// Currencies the trip planner can quote and display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ARS")]
    Ars,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "ILS")]
    Ils,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Ars, Currency::Eur, Currency::Ils];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
            Currency::Eur => "EUR",
            Currency::Ils => "ILS",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Display locales supported by the bilingual UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Locale {
    #[serde(rename = "es-AR")]
    Spanish,
    #[serde(rename = "he-IL")]
    Hebrew,
}

impl Locale {
    pub fn language_tag(&self) -> &'static str {
        match self {
            Locale::Spanish => "es-AR",
            Locale::Hebrew => "he-IL",
        }
    }

    /// Thousands separator used by the locale's numeral grouping.
    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::Spanish => '.',
            Locale::Hebrew => ',',
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Spanish
    }
}

/// Formats a value rounded to whole units with the locale's digit grouping.
pub fn format_grouped(locale: Locale, value: f64) -> String {
    group_digits(&format!("{:.0}", value), locale.grouping_separator())
}

/// Formats a min/max pair for display: a single number when both bounds
/// round to the same figure, otherwise `"min - max"`.
pub fn format_range(locale: Locale, min: f64, max: f64) -> String {
    let low = format_grouped(locale, min);
    let high = format_grouped(locale, max);
    if low == high {
        low
    } else {
        format!("{} - {}", low, high)
    }
}

fn group_digits(raw: &str, separator: char) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    format!("{}{}", sign, grouped)
}
