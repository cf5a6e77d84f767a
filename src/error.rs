use crate::aware::Moment;
use thiserror::Error;

/// Result type for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at construction time. Pure value computation has no other
/// failure modes; nothing here is retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An interval was constructed with its endpoints out of order.
    #[error("start cannot be later than end ({start} > {end})")]
    StartAfterEnd { start: Moment, end: Moment },

    /// A constructor was given a conflicting or insufficient combination of
    /// parameters.
    #[error("invalid constructor arguments: {reason}")]
    InvalidArguments { reason: &'static str },
}
