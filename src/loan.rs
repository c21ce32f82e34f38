use chrono::{Months, NaiveDate};
use std::fmt;

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loan {
    pub amount: f64,
    pub rate: f64,   // annual rate as a percentage (i.e., 4.99)
    pub months: u32, // term of the loan in months
    pub payment: f64,
    pub start_date: NaiveDate,
}

impl Loan {
    pub fn new(amount: f64, rate: f64, months: u32, payment: f64, start_date: NaiveDate) -> Self {
        Self {
            amount,
            rate,
            months,
            payment,
            start_date,
        }
    }

    /// Monthly interest rate as a decimal.
    pub fn monthly_rate(&self) -> f64 {
        self.rate / 100. / 12.
    }

    /// Date of the regular payment `month` months after the start.
    ///
    /// Always measured from the start date, so a loan starting on the 31st
    /// pays on the last day of shorter months and returns to the 31st after.
    pub fn payment_date(&self, month: u32) -> Option<NaiveDate> {
        self.start_date.checked_add_months(Months::new(month))
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "amount {:.2} rate {} months {} payment {:.2} starting {}",
            self.amount, self.rate, self.months, self.payment, self.start_date
        )
    }
}

/// One row of an amortization schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payment {
    pub date: NaiveDate,
    pub principal: f64,
    pub interest: f64,
    pub remaining: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
}

impl Payment {
    pub fn new(
        date: NaiveDate,
        principal: f64,
        interest: f64,
        remaining: f64,
        principal_paid: f64,
        interest_paid: f64,
    ) -> Self {
        Self {
            date,
            principal,
            interest,
            remaining,
            principal_paid,
            interest_paid,
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date {}, principal ${:.4}, interest ${:.4}, remaining ${:.4}",
            self.date, self.principal, self.interest, self.remaining
        )
    }
}
