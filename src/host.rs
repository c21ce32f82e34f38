//! Entry points for embedding hosts (a browser page, a scripting bridge).
//!
//! Every call returns a [`Response`] that serializes to
//! `{"success": bool, "message"?: string, "data"?: [...]}`, so the host only
//! ever has to deal with JSON.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::extra::Extra;
use crate::loan::Payment;
use crate::parse::{parse_extra, parse_loan, DATE_FORMAT};
use crate::schedule;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PaymentRecord>>,
}

impl Response {
    fn ok(data: Option<Vec<PaymentRecord>>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    fn failure(err: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            data: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub date: String,
    pub principal: f64,
    pub interest: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining: f64,
}

impl From<&Payment> for PaymentRecord {
    fn from(pmt: &Payment) -> Self {
        Self {
            date: pmt.date.format(DATE_FORMAT).to_string(),
            principal: pmt.principal,
            interest: pmt.interest,
            principal_paid: pmt.principal_paid,
            interest_paid: pmt.interest_paid,
            remaining: pmt.remaining,
        }
    }
}

/// Checks a loan specification without scheduling it.
pub fn validate_loan(input: &str) -> Response {
    match parse_loan(input, NaiveDate::MIN) {
        Ok(_) => Response::ok(None),
        Err(err) => Response::failure(err),
    }
}

/// Checks an extra-payment specification without scheduling it.
pub fn validate_extra(input: &str) -> Response {
    match parse_extra(input) {
        Ok(_) => Response::ok(None),
        Err(err) => Response::failure(err),
    }
}

/// Parses the loan and extras, resolves the extras against the loan's start
/// date, and returns the schedule as `data`.
pub fn calculate<S: AsRef<str>>(loan: &str, extras: &[S], today: NaiveDate) -> Response {
    match build_schedule(loan, extras, today) {
        Ok(schedule) => Response::ok(Some(schedule.iter().map(PaymentRecord::from).collect())),
        Err(err) => Response::failure(err),
    }
}

fn build_schedule<S: AsRef<str>>(loan: &str, extras: &[S], today: NaiveDate) -> Result<Vec<Payment>> {
    debug!("parsing loan {:?}", loan);
    let loan = parse_loan(loan, today)?;

    let extras = extras
        .iter()
        .map(|input| {
            debug!("parsing extra {:?}", input.as_ref());
            parse_extra(input.as_ref())?.resolve(loan.start_date)
        })
        .collect::<Result<Vec<Extra>>>()?;

    debug!("calculating schedule for {} with {} extras", loan, extras.len());
    Ok(schedule::calculate(&loan, &extras))
}
