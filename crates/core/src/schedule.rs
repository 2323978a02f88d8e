//! Mapping of (weekday, week, period) onto calendar dates and clock times.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate, NaiveTime};
use regex::Regex;

/// Number of periods in a teaching day.
pub const PERIODS: u8 = 12;

/// Used when no term start was given at all.
pub const DEFAULT_TERM_START: &str = "2026-03-01";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\d{4}\s*[-/.年]\s*\d{1,2}\s*[-/.月]\s*\d{1,2}\s*日?$").unwrap()
});

// (hour, minute) of each period, 45 minute classes with 10 or 15 minute breaks
const STARTS: [(u32, u32); PERIODS as usize] = [
	(8, 30),
	(9, 25),
	(10, 30),
	(11, 25),
	(14, 0),
	(14, 55),
	(16, 0),
	(16, 55),
	(18, 30),
	(19, 25),
	(20, 30),
	(21, 25),
];

const ENDS: [(u32, u32); PERIODS as usize] = [
	(9, 15),
	(10, 10),
	(11, 15),
	(12, 10),
	(14, 45),
	(15, 40),
	(16, 45),
	(17, 40),
	(19, 15),
	(20, 10),
	(21, 15),
	(22, 10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
	Start,
	End,
}

/// Date a bad term start degrades to.
#[must_use]
pub fn sentinel_date() -> NaiveDate {
	NaiveDate::default()
}

/// Parse a `YYYY-MM-DD` term start, falling back to [`sentinel_date`].
#[must_use]
pub fn parse_term_start(s: &str) -> NaiveDate {
	NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").unwrap_or_else(|err| {
		tracing::warn!(input = s, %err, "unparsable term start, using {}", sentinel_date());
		sentinel_date()
	})
}

/// Calendar date of `weekday` (0 = Sunday) in the 1-based `week` of a term
/// whose week 1 begins on `term_start`.
#[must_use]
pub fn meeting_date(term_start: NaiveDate, weekday: u8, week: u32) -> NaiveDate {
	let offset = u64::from(weekday) + u64::from(week.saturating_sub(1)) * 7;

	term_start
		.checked_add_days(Days::new(offset))
		.unwrap_or(NaiveDate::MAX)
}

/// Clock time at which `period` starts or ends. Periods outside `1..=12` map to
/// midnight.
#[must_use]
pub fn period_time(period: u8, boundary: Boundary) -> NaiveTime {
	let table = match boundary {
		Boundary::Start => &STARTS,
		Boundary::End => &ENDS,
	};

	usize::from(period)
		.checked_sub(1)
		.and_then(|i| table.get(i))
		.and_then(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
		.unwrap_or(NaiveTime::MIN)
}

/// Whether `s` is nothing but a date, e.g. `2026-03-01` or `2026年3月1日`.
#[must_use]
pub fn looks_like_date(s: &str) -> bool {
	DATE_RE.is_match(s.trim())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn first_sunday_maps_to_term_start() {
		let start = date(2026, 3, 1);

		assert_eq!(meeting_date(start, 0, 1), start);
	}

	#[test]
	fn rolls_over_months_and_years() {
		assert_eq!(meeting_date(date(2026, 3, 1), 3, 5), date(2026, 4, 1));
		assert_eq!(meeting_date(date(2025, 12, 21), 6, 2), date(2026, 1, 3));
		assert_eq!(meeting_date(date(2028, 2, 27), 2, 1), date(2028, 2, 29));
	}

	#[test]
	fn bad_term_start_falls_back() {
		assert_eq!(parse_term_start("next monday"), date(1970, 1, 1));
		assert_eq!(parse_term_start(" 2026-09-06 "), date(2026, 9, 6));
	}

	#[test]
	fn period_table() {
		let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

		assert_eq!(period_time(1, Boundary::Start), t(8, 30));
		assert_eq!(period_time(4, Boundary::End), t(12, 10));
		assert_eq!(period_time(12, Boundary::End), t(22, 10));
		assert_eq!(period_time(0, Boundary::Start), NaiveTime::MIN);
		assert_eq!(period_time(13, Boundary::End), NaiveTime::MIN);
	}

	#[test]
	fn date_detection() {
		assert!(looks_like_date("2026/3/1"));
		assert!(!looks_like_date("2026年春季学期"));
	}
}
