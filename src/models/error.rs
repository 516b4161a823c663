use thiserror::Error;

/// Errors raised when a closed enumeration receives a value outside its set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown mode '{0}' (expected do, decide or drift)")]
    Mode(String),

    #[error("unknown duration bucket '{0}' (expected 2m, 10m or 25m)")]
    DurationBucket(String),

    #[error("unknown ordering '{0}' (expected duration or recent)")]
    Ordering(String),

    #[error("unknown session outcome '{0}' (expected done, partial or aborted)")]
    Outcome(String),
}
