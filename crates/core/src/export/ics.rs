use chrono::NaiveDate;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::{
	course::CourseRecord,
	schedule::{meeting_date, period_time, Boundary},
	TZ,
};

pub const PRODUCT_ID: &str = "-//NEU Course Table//CN";

/// One event per course and meeting week, in floating local time.
#[must_use]
pub fn create_calendar(courses: &[CourseRecord], term_start: NaiveDate) -> Calendar {
	let mut calendar = Calendar::new();

	calendar.name("东北大学课表");
	calendar.timezone(TZ.name());

	for course in courses {
		let description = course.details();

		for &week in &course.weeks {
			let date = meeting_date(term_start, course.weekday, week);
			let start = date.and_time(period_time(course.start_period, Boundary::Start));
			let end = date.and_time(period_time(course.end_period, Boundary::End));

			let mut event = Event::new();

			event
				.summary(&course.title)
				.location(&course.location)
				.description(&description)
				.starts(CalendarDateTime::Floating(start))
				.ends(CalendarDateTime::Floating(end))
				.uid(&format!(
					"{}-{}-{}-{}@neu-course-table",
					start.format("%Y%m%dT%H%M%S"),
					course.weekday,
					course.start_period,
					course
						.title
						.chars()
						.filter(|c| c.is_alphanumeric())
						.collect::<String>()
				));

			calendar.push(event);
		}
	}

	calendar
}

/// The calendar as iCalendar text, carrying this tool's `PRODID`.
#[must_use]
pub fn render_ics(courses: &[CourseRecord], term_start: NaiveDate) -> String {
	let calendar = format!("{}", create_calendar(courses, term_start));
	let mut out = String::with_capacity(calendar.len());

	for line in calendar.split_inclusive('\n') {
		if line.starts_with("PRODID:") {
			continue;
		}

		out.push_str(line);

		if line.trim_end() == "VERSION:2.0" {
			out.push_str("PRODID:");
			out.push_str(PRODUCT_ID);
			out.push_str("\r\n");
		}
	}

	out
}
