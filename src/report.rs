//! Console rendering of loans, extras, and schedules.

use std::fmt;

use crate::extra::Extra;
use crate::loan::{Loan, Payment};

/// Formats a value with two decimals and thousands separators, i.e. `39,125.00`.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let formatted = format!("{:.2}", amount.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    // no sign on values that round to zero
    let sign = if amount < 0. && formatted.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, group_digits(whole), frac)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Total interest over the schedule, read from the last row's running total.
pub fn total_interest(schedule: &[Payment]) -> f64 {
    schedule.last().map_or(0., |pmt| pmt.interest_paid)
}

pub struct LoanSummary<'a>(pub &'a Loan);

impl fmt::Display for LoanSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loan = self.0;
        writeln!(f, "Loan:")?;
        writeln!(f, "   Amount:   {:>12} $", format_money(loan.amount))?;
        writeln!(f, "   Rate:     {:>12} %", format_money(loan.rate))?;
        writeln!(f, "   Months:   {:>12}", group_digits(&loan.months.to_string()))?;
        writeln!(f, "   Payment:  {:>12} $", format_money(loan.payment))?;
        writeln!(f, "   Starting: {:>12}", loan.start_date.to_string())
    }
}

pub struct ExtraSummary<'a>(pub &'a Extra);

impl fmt::Display for ExtraSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extra = self.0;
        writeln!(f, "Extra payment:")?;
        writeln!(
            f,
            "   Amount:   {:>12} $ {}",
            format_money(extra.amount),
            extra.frequency
        )?;
        if let Some(start) = extra.start_date {
            writeln!(f, "   Starting: {:>12}", start.to_string())?;
        }
        if let Some(end) = extra.end_date {
            writeln!(f, "   Ending:   {:>12}", end.to_string())?;
        }
        Ok(())
    }
}

pub struct ScheduleTable<'a>(pub &'a [Payment]);

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule:")?;
        writeln!(
            f,
            "{:>3}   {:>10}   {:>10}   {:>10}   {:>12}",
            "", "date", "principal", "interest", "remaining"
        )?;
        for (i, pmt) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>3}   {:>10}   {:>10}   {:>10}   {:>12}",
                i,
                pmt.date.to_string(),
                format_money(pmt.principal),
                format_money(pmt.interest),
                format_money(pmt.remaining)
            )?;
        }
        if !self.0.is_empty() {
            writeln!(f, "----")?;
            writeln!(
                f,
                "Total interest paid: {:>12}",
                format_money(total_interest(self.0))
            )?;
        }
        Ok(())
    }
}
