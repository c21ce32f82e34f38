use chrono::{Local, NaiveDate};
use clap::{ArgAction, CommandFactory, Parser};
use loancalc::report::{ExtraSummary, LoanSummary, ScheduleTable};
use loancalc::{calculate, parse_extra, parse_loan};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use std::process::ExitCode;

const FORMATS: &str = "\
<loan> is of the form:
   amount <amount> rate <rate> months <months> payment <payment> [starting <date>]

<extra> is of the form:
   <amount> monthly [starting <date>] [ending <date>|count <count>]
   <amount> once on <date>

Example:
   loan-calculator 'amount 39,125.00 rate 4.99 months 240 payment 187.48 starting 2020-10-01' '52.52 monthly' '12,000 once on 2020-11-10' '5,000 once on 2020-12-20'";

/// Amortization schedule for a fixed-payment loan with extra payments
#[derive(Parser)]
#[command(name = "loan-calculator", version, after_help = FORMATS)]
struct Cli {
    /// The loan to schedule
    loan: String,

    /// Extra payments, one argument each
    extras: Vec<String>,

    /// Print the schedule as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("could not start logging: {}", err);
    }

    let today = Local::now().date_naive();

    if cli.json {
        return print_json(&cli, today);
    }

    match render_report(&cli, today) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", usage(&message));
            ExitCode::FAILURE
        }
    }
}

/// Renders the loan, its extras, and the schedule, or says which argument
/// could not be read.
fn render_report(cli: &Cli, today: NaiveDate) -> Result<String, String> {
    let loan = parse_loan(&cli.loan, today)
        .map_err(|err| format!("Could not parse loan: {}", err))?;
    debug!("loan: {}", loan);

    let extras = cli
        .extras
        .iter()
        .map(|input| {
            parse_extra(input)
                .and_then(|extra| extra.resolve(loan.start_date))
                .map_err(|err| format!("Could not parse extra: {}", err))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let schedule = calculate(&loan, &extras);

    let mut report = format!("{}\n", LoanSummary(&loan));
    for extra in &extras {
        report.push_str(&format!("{}\n", ExtraSummary(extra)));
    }
    report.push_str(&ScheduleTable(&schedule).to_string());
    Ok(report)
}

#[cfg(feature = "serde")]
fn print_json(cli: &Cli, today: NaiveDate) -> ExitCode {
    let response = loancalc::host::calculate(&cli.loan, cli.extras.as_slice(), today);
    match response.to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("could not serialize schedule: {}", err);
            return ExitCode::FAILURE;
        }
    }
    if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(not(feature = "serde"))]
fn print_json(_cli: &Cli, _today: NaiveDate) -> ExitCode {
    eprintln!("{}", usage("--json requires the `serde` feature"));
    ExitCode::FAILURE
}

fn usage(message: &str) -> String {
    format!("{}\n\n{}", message, Cli::command().render_help())
}

#[cfg(test)]
mod tests {
    use super::{render_report, usage, Cli};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};
    use loancalc::{Extra, Loan, Payment};
    use test_log::test;

    // verifies that types can implement the gated traits below
    fn is_normal<T: Sized + Send + Sync + Unpin>() {}

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("loan-calculator").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn normal_types() {
        is_normal::<Loan>();
        is_normal::<Extra>();
        is_normal::<Payment>();
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_report() {
        let report = render_report(
            &cli(&[
                "amount 1,200 rate 0 months 12 payment 100 starting 2021-01-01",
                "300 once on 2020-12-01",
            ]),
            today(),
        )
        .unwrap();

        assert!(report.starts_with("Loan:\n"));
        assert!(report.contains("   Amount:       1,200.00 $\n"));
        assert!(report.contains("Extra payment:\n   Amount:         300.00 $ once\n"));
        assert!(report.contains("  0   2020-12-01       300.00         0.00         900.00\n"));
        assert!(report.contains("  9   2021-09-01       100.00         0.00           0.00\n"));
        assert_eq!(report.lines().last(), Some("Total interest paid:         0.00"));
    }

    #[test]
    fn test_render_report_errors() {
        assert_eq!(
            render_report(&cli(&["amount NaN months 12"]), today()),
            Err("Could not parse loan: invalid number for amount: NaN".to_string())
        );
        assert_eq!(
            render_report(&cli(&["amount 1000 months 12", "100 weekly"]), today()),
            Err("Could not parse extra: invalid frequency: weekly".to_string())
        );
        assert_eq!(
            render_report(&cli(&["amount 1000 months 12", "--", "-5 monthly"]), today()),
            Err("Could not parse extra: amount is out of range: -5 is less than zero".to_string())
        );
    }

    #[test]
    fn test_usage_lists_formats() {
        let text = usage("Could not parse loan: missing months");
        assert!(text.starts_with("Could not parse loan: missing months\n\n"));
        assert!(text.contains("<loan> is of the form:"));
        assert!(text.contains("<amount> once on <date>"));
    }
}
