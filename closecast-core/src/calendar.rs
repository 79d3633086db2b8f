//! Trading calendar: next-business-day resolution.

use chrono::{Datelike, NaiveDate, Weekday};

/// Resolve the forecast target date following the latest observed bar.
///
/// Friday and Saturday displace to the following Monday; every other day
/// advances one calendar day. A Sunday input therefore resolves to Monday,
/// though a daily-bar feed should never end on a Sunday in the first place —
/// the orchestrator re-validates the target with [`is_weekday`] rather than
/// trusting this rule blindly.
pub fn next_trading_date(latest: NaiveDate) -> NaiveDate {
    match latest.weekday() {
        Weekday::Fri => latest + chrono::Duration::days(3),
        Weekday::Sat => latest + chrono::Duration::days(2),
        _ => latest + chrono::Duration::days(1),
    }
}

/// True for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
