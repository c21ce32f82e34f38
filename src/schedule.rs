use log::{debug, info, trace, warn};

use crate::extra::Extra;
use crate::loan::{Loan, Payment};

/// Builds the amortization schedule for `loan` with the given extra payments.
///
/// Each month at most one one-time extra fires: the first in list order whose
/// date has arrived. It is written as its own row, dated on the extra's date,
/// ahead of that month's regular payment, and then dropped. If it retires the
/// loan the schedule stops there.
///
/// The regular payment's principal is `payment - interest` (never below zero)
/// plus the amount of the last recurring extra in list order whose window
/// covers the month. Overlapping recurring extras are not summed. Principal is
/// capped at the remaining balance, and the final month of the term always
/// pays off whatever is left.
///
/// `extras` is not modified; fired one-time extras are tracked internally.
pub fn calculate(loan: &Loan, extras: &[Extra]) -> Vec<Payment> {
    let mut payments: Vec<Payment> = Vec::new();
    let mut pending: Vec<&Extra> = extras.iter().collect();

    let monthly_rate = loan.monthly_rate();
    let mut remaining = loan.amount;
    let mut principal_paid = 0.;
    let mut interest_paid = 0.;

    for m in 0..loan.months {
        let Some(current_date) = loan.payment_date(m) else {
            warn!("payment {} falls outside the supported date range", m + 1);
            break;
        };

        if let Some(idx) = pending.iter().position(|extra| extra.is_due(current_date)) {
            let extra = pending.remove(idx);
            // is_due guarantees a start date
            let extra_date = extra.start_date.unwrap_or(current_date);

            remaining -= extra.amount;
            principal_paid += extra.amount;
            debug!(
                "one-time extra of {} on {} applied in month {}, remaining {}",
                extra.amount,
                extra_date,
                m + 1,
                remaining
            );
            payments.push(Payment::new(
                extra_date,
                extra.amount,
                0.,
                remaining,
                principal_paid,
                interest_paid,
            ));
        }

        if remaining <= 0. {
            info!(
                "loan paid off early in month {} of {}",
                m + 1,
                loan.months
            );
            break;
        }

        let extra_principal = pending
            .iter()
            .rev()
            .find(|extra| extra.is_active(current_date))
            .map_or(0., |extra| extra.amount);

        let interest = remaining * monthly_rate;
        let mut principal = (loan.payment - interest).max(0.) + extra_principal;
        if principal > remaining || m + 1 == loan.months {
            principal = remaining;
        }

        remaining -= principal;
        interest_paid += interest;
        principal_paid += principal;
        trace!(
            "month {}, date {}, interest {}, principal {}, remaining {}",
            m + 1,
            current_date,
            interest,
            principal,
            remaining
        );

        payments.push(Payment::new(
            current_date,
            principal,
            interest,
            remaining,
            principal_paid,
            interest_paid,
        ));
    }
    payments
}
