use chrono::{Datelike, NaiveDate};
use tally_core::period::Period;

use crate::cli::root_commands::PeriodArgs;

/// Today's date on the local clock.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The period named by `--month`/`--year`, if any.
///
/// A month without a year means the current year. A year alone is rejected.
pub fn optional_period(args: &PeriodArgs, today: NaiveDate) -> anyhow::Result<Option<Period>> {
    match (args.month, args.year) {
        (None, None) => Ok(None),
        (Some(month), year) => Ok(Some(Period::new(month, year.unwrap_or_else(|| today.year()))?)),
        (None, Some(year)) => anyhow::bail!("--year {year} needs --month"),
    }
}

/// The named period, or the one `today` falls in.
pub fn period_or_current(args: &PeriodArgs, today: NaiveDate) -> anyhow::Result<Period> {
    Ok(optional_period(args, today)?.unwrap_or_else(|| Period::of(today)))
}
