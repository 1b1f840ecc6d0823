use thiserror::Error;

/// Error type covering persistence, configuration, and lexicon failures.
///
/// Line-item parse failures and unavailable exchange rates are deliberately
/// not represented here: the former degrade to a zero range, the latter is
/// an explicit aggregation status.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid day-unit lexicon: {0}")]
    Lexicon(String),
}
