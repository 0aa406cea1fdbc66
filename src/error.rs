use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The two-line element set could not be parsed or converted into
    /// propagation constants. Fatal at startup, before any scheduling.
    #[error("malformed two-line element set: {0}")]
    MalformedElements(String),

    /// The propagator rejected an (elements, time) pair. Callers skip the
    /// affected sample and continue.
    #[error("propagation failed at {time}: {reason}")]
    Propagation { time: DateTime<Utc>, reason: String },
}
