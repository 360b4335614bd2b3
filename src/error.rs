use thiserror::Error;

/// Failure classes for upstream data acquisition.
///
/// Transport failures are surfaced to the caller and never retried.
/// Parse failures propagate only for the primary record of a
/// single-entity fetch; optional fields degrade to empty defaults
/// inside the normalizer instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Parse(String),
}
