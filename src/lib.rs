//! Amortization schedules for fixed-payment installment loans, adjusted by
//! one-time and recurring extra principal payments.
//!
//! The schedule itself is produced by [`schedule::calculate`]; everything else
//! in the crate builds its inputs from text or renders its output.

pub mod error;
pub mod extra;
#[cfg(feature = "serde")]
pub mod host;
pub mod loan;
pub mod parse;
pub mod report;
pub mod schedule;

pub use error::{ConflictError, Error, ParseError, Result};
pub use extra::{Extra, Frequency};
pub use loan::{Loan, Payment};
pub use parse::{parse_extra, parse_loan, DATE_FORMAT};
pub use schedule::calculate;
