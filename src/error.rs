use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a loan or extra specification could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid date for {field}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot have both end date and count")]
pub struct ConflictError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}
