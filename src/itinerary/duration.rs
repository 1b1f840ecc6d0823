use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TripError;

/// Day-unit words for the built-in locales. An integer immediately followed
/// by one of these counts as that many days.
const BUILTIN_UNITS: [&str; 6] = ["días", "día", "dias", "dia", "ימים", "יום"];

/// Tokens that carry a fixed day count on their own, like the Hebrew dual
/// form for "two days".
const BUILTIN_FIXED: [(&str, u32); 1] = [("יומיים", 2)];

static BUILTIN: Lazy<DayTokenLexicon> = Lazy::new(|| {
    DayTokenLexicon::with_units(&BUILTIN_UNITS, &BUILTIN_FIXED).expect("builtin day-unit lexicon")
});

/// Locale-pluggable table of day-unit tokens used to read day counts out of
/// free-text duration descriptors. Adding a language means adding words
/// here, not touching the extraction algorithm.
#[derive(Debug, Clone)]
pub struct DayTokenLexicon {
    pattern: Regex,
    fixed: Vec<(String, u32)>,
}

impl DayTokenLexicon {
    /// Builds a lexicon from unit words and fixed-count tokens. Unit words
    /// match case-insensitively right after an integer; longer words take
    /// precedence over their own prefixes.
    pub fn with_units(units: &[&str], fixed: &[(&str, u32)]) -> Result<Self, TripError> {
        if units.is_empty() {
            return Err(TripError::Lexicon(
                "at least one day-unit word is required".to_string(),
            ));
        }
        let mut words: Vec<String> = units.iter().map(|word| regex::escape(word)).collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()));
        let pattern = Regex::new(&format!(r"(?i)(\d+)\s*(?:{})\b", words.join("|")))
            .map_err(|err| TripError::Lexicon(err.to_string()))?;
        Ok(Self {
            pattern,
            fixed: fixed
                .iter()
                .map(|(token, days)| ((*token).to_string(), *days))
                .collect(),
        })
    }

    /// Shared lexicon covering the app's two locales.
    pub fn builtin() -> &'static DayTokenLexicon {
        &BUILTIN
    }

    /// Sums every day-count token found in the descriptor. Fixed tokens add
    /// their count per occurrence, on top of any digit matches. A descriptor
    /// with no recognized tokens yields 0.
    pub fn day_count(&self, descriptor: &str) -> u32 {
        let mut days: u32 = 0;
        for caps in self.pattern.captures_iter(descriptor) {
            days = days.saturating_add(caps[1].parse::<u32>().unwrap_or(0));
        }
        for (token, count) in &self.fixed {
            let occurrences =
                u32::try_from(descriptor.matches(token.as_str()).count()).unwrap_or(u32::MAX);
            days = days.saturating_add(count.saturating_mul(occurrences));
        }
        days
    }
}
