use thiserror::Error;

/// Errors from decoding GPS metadata.
#[derive(Error, Debug)]
pub enum GpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zero denominator in GPS rational")]
    ZeroDenominator,
    #[error("Invalid hemisphere reference: {0:?}")]
    InvalidReference(String),
    #[error("Expected degrees, minutes and seconds, got {0} component(s)")]
    MalformedTriple(usize),
}
