//! Textual loan and extra-payment specifications.
//!
//! Loan:
//!
//! ```text
//! amount <amount> rate <rate> months <months> payment <payment> [starting <date>]
//! ```
//!
//! Extra:
//!
//! ```text
//! <amount> monthly [starting <date>] [ending <date>|count <count>]
//! <amount> once on <date>
//! ```
//!
//! Numbers may carry thousands separators (`39,125.00`); dates are `YYYY-MM-DD`.
//! Amounts, rates and payments must be finite and not negative.

use chrono::NaiveDate;
use log::debug;
use std::str::FromStr;

use crate::error::{ConflictError, ParseError, Result};
use crate::extra::{Extra, Frequency};
use crate::loan::Loan;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a loan specification. A loan without `starting` begins on
/// `default_start`.
pub fn parse_loan(input: &str, default_start: NaiveDate) -> Result<Loan> {
    let mut amount: Option<f64> = None;
    let mut rate: f64 = 0.;
    let mut months: Option<u32> = None;
    let mut payment: f64 = 0.;
    let mut start_date: Option<NaiveDate> = None;

    let mut tokens = input.split_whitespace();
    while let Some(token) = tokens.next() {
        match token {
            "amount" => amount = Some(non_negative("amount", tokens.next())?),
            "rate" => rate = non_negative("rate", tokens.next())?,
            "months" => months = Some(number("months", tokens.next())?),
            "payment" => payment = non_negative("payment", tokens.next())?,
            "starting" => start_date = Some(date("starting", tokens.next())?),
            other => debug!("ignoring unexpected loan token {:?}", other),
        }
    }

    let amount = amount.ok_or(ParseError::MissingField("amount"))?;
    if amount == 0. {
        return Err(ParseError::OutOfRange {
            field: "amount",
            reason: "the loan amount must be greater than zero".to_string(),
        }
        .into());
    }
    let months = months.ok_or(ParseError::MissingField("months"))?;
    if months == 0 {
        return Err(ParseError::OutOfRange {
            field: "months",
            reason: "the term must be at least one month".to_string(),
        }
        .into());
    }

    Ok(Loan::new(
        amount,
        rate,
        months,
        payment,
        start_date.unwrap_or(default_start),
    ))
}

/// Parses an extra-payment specification.
///
/// The result is unresolved: a missing start date and any `count` are left as
/// given, see [`Extra::resolve`].
pub fn parse_extra(input: &str) -> Result<Extra> {
    let mut tokens = input.split_whitespace();

    let amount = non_negative("amount", tokens.next())?;
    let frequency: Frequency = tokens
        .next()
        .ok_or(ParseError::MissingField("frequency"))?
        .parse()?;

    let mut extra = Extra {
        frequency,
        amount,
        start_date: None,
        end_date: None,
        count: None,
    };

    while let Some(token) = tokens.next() {
        match token {
            "count" => {
                let count: i64 = number("count", tokens.next())?;
                if count < 0 {
                    return Err(ParseError::OutOfRange {
                        field: "count",
                        reason: "count is less than zero".to_string(),
                    }
                    .into());
                }
                let count = u32::try_from(count).map_err(|_| ParseError::InvalidNumber {
                    field: "count",
                    value: count.to_string(),
                })?;
                extra.count = Some(count);
            }
            "on" => extra.start_date = Some(date("on", tokens.next())?),
            "starting" => extra.start_date = Some(date("starting", tokens.next())?),
            "ending" => extra.end_date = Some(date("ending", tokens.next())?),
            other => debug!("ignoring unexpected extra token {:?}", other),
        }
    }

    if extra.end_date.is_some() && extra.count.is_some_and(|c| c > 0) {
        return Err(ConflictError.into());
    }
    if extra.frequency == Frequency::Once && extra.start_date.is_none() {
        return Err(ParseError::MissingField("start date").into());
    }

    Ok(extra)
}

fn number<T: FromStr>(field: &'static str, value: Option<&str>) -> std::result::Result<T, ParseError> {
    let value = value.ok_or(ParseError::MissingField(field))?;
    value
        .replace(',', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// A finite, non-negative amount or rate.
fn non_negative(field: &'static str, value: Option<&str>) -> std::result::Result<f64, ParseError> {
    let parsed: f64 = number(field, value)?;
    if !parsed.is_finite() {
        return Err(ParseError::InvalidNumber {
            field,
            value: value.unwrap_or_default().to_string(),
        });
    }
    if parsed < 0. {
        return Err(ParseError::OutOfRange {
            field,
            reason: format!("{} is less than zero", parsed),
        });
    }
    Ok(parsed)
}

fn date(field: &'static str, value: Option<&str>) -> std::result::Result<NaiveDate, ParseError> {
    let value = value.ok_or(ParseError::MissingField(field))?;
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
