#![warn(clippy::pedantic)]

use neu2ics_core::{export::render_ics, schedule::parse_term_start, Config};
use wasm_bindgen::prelude::wasm_bindgen;

/// iCalendar feed for a timetable page, `term_start` being the Sunday of week 1.
#[wasm_bindgen]
#[must_use]
pub fn from_html(html: &str, term_start: &str) -> String {
	let courses = neu2ics_core::parse_from_buf(html, &Config::default());

	render_ics(&courses, parse_term_start(term_start))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn page_without_courses_is_an_empty_calendar() {
		let ics = from_html("<html></html>", "2026-03-01");

		assert!(ics.starts_with("BEGIN:VCALENDAR"));
		assert!(!ics.contains("VEVENT"));
	}
}
