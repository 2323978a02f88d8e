use std::{collections::BTreeSet, fs, path::Path};

use crate::{
	extract,
	schedule::PERIODS,
	segment::{scan_slots, split_days},
	Config, Error,
};

/// One meeting pattern of a course: a weekday, a period range and the weeks
/// it repeats on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
	pub title: String,
	/// 0 = Sunday, as on the page.
	pub weekday: u8,
	pub start_period: u8,
	pub end_period: u8,
	pub weeks: BTreeSet<u32>,
	/// Week phrase as written on the page, empty if there was none.
	pub week_expression: String,
	pub location: String,
	pub instructor: String,
	/// Detail lines after the first, space separated.
	pub description: String,
}

impl CourseRecord {
	/// Number of periods the course occupies.
	#[must_use]
	pub fn span(&self) -> u8 {
		self.end_period.saturating_sub(self.start_period) + 1
	}

	/// Instructor, week phrase and extra details in one line.
	#[must_use]
	pub fn details(&self) -> String {
		[&self.instructor, &self.week_expression, &self.description]
			.into_iter()
			.filter(|s| !s.is_empty())
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// Clamp a slot to valid periods: at least one period long and ending by
/// period 12. Slots starting after the last period are rejected.
#[must_use]
pub fn clamp_periods(start: u32, span: u32) -> Option<(u8, u8)> {
	let start = u8::try_from(start).ok().filter(|s| (1..=PERIODS).contains(s))?;
	let span = u8::try_from(span.max(1)).unwrap_or(PERIODS);
	let end = start.saturating_add(span - 1).min(PERIODS);

	Some((start, end))
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run the whole extraction over a timetable page.
#[must_use]
pub fn parse_from_buf(html: &str, config: &Config) -> Vec<CourseRecord> {
	let mut courses = Vec::new();
	let days = split_days(html, &config.column_marker);

	if days.len() < crate::segment::DAYS {
		tracing::warn!(found = days.len(), "fewer weekday columns than expected");
	}

	for day in days {
		for slot in scan_slots(day.html, &config.conflict_marker) {
			let found = extract::extract_courses(&slot, day.weekday, config);

			tracing::debug!(
				weekday = day.weekday,
				period = slot.start_period,
				span = ?slot.span,
				courses = found.len(),
				"scanned slot"
			);

			courses.extend(found);
		}
	}

	courses
}

/// Read a saved timetable page and extract its courses.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read as UTF-8 text.
pub fn parse_from_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Vec<CourseRecord>, Error> {
	let path = path.as_ref();
	let html = fs::read_to_string(path).map_err(|source| Error::Read {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(parse_from_buf(&html, config))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamps_periods() {
		assert_eq!(clamp_periods(3, 2), Some((3, 4)));
		assert_eq!(clamp_periods(5, 0), Some((5, 5)));
		assert_eq!(clamp_periods(11, 4), Some((11, 12)));
		assert_eq!(clamp_periods(1, u32::MAX), Some((1, 12)));
		assert_eq!(clamp_periods(13, 1), None);
		assert_eq!(clamp_periods(0, 1), None);
	}

	#[test]
	fn normalizes_whitespace() {
		assert_eq!(normalize("  高等\n\t数学 \u{a0}A "), "高等 数学 A");
		assert_eq!(normalize(" \n "), "");
	}
}
