//! Splitting the page into weekday columns and columns into time slots.

use std::sync::LazyLock;

use regex::Regex;

/// Columns on the page, Sunday first.
pub const DAYS: usize = 7;

static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"<div([^>]+style="[^"]*flex:\s*([0-9]+)[^"]*"[^>]*)>"#).unwrap()
});

/// One weekday column of the page.
#[derive(Debug, Clone, Copy)]
pub struct DayFragment<'a> {
	/// 0 = Sunday.
	pub weekday: u8,
	pub html: &'a str,
}

/// A layout cell of a day column covering `span` periods from `start_period`.
#[derive(Debug, Clone, Copy)]
pub struct SlotBlock<'a> {
	pub start_period: u32,
	/// `None` when the layout weight could not be read.
	pub span: Option<u32>,
	pub inner_html: &'a str,
}

/// Split `html` into at most [`DAYS`] columns, each starting at the `<div`
/// that carries `marker`.
///
/// The last column ends at the first line-terminated `</div>` after its
/// marker, or at the end of the document.
#[must_use]
pub fn split_days<'a>(html: &'a str, marker: &str) -> Vec<DayFragment<'a>> {
	let mut days = Vec::new();

	if marker.is_empty() {
		return days;
	}

	let mut from = 0;

	while let Some(found) = html[from..].find(marker) {
		let pos = from + found;
		let start = html[..pos].rfind("<div").unwrap_or(0);
		let after = pos + marker.len();

		let end = match html[after..].find(marker) {
			Some(next) => html[..after + next].rfind("<div").unwrap_or(after + next),
			None => html[pos..].find("</div>\n").map_or(html.len(), |end| pos + end),
		};

		let Ok(weekday) = u8::try_from(days.len()) else {
			break;
		};

		days.push(DayFragment {
			weekday,
			html: &html[start..end.max(start)],
		});

		if days.len() == DAYS {
			break;
		}

		from = after;
	}

	days
}

fn is_top_level(attributes: &str, conflict_marker: &str) -> bool {
	!attributes.contains("class=") || attributes.contains(conflict_marker)
}

/// The top-level slots of a day column in document order.
///
/// The first `flex` element is the column itself and is skipped. Only elements
/// without a class, or with the conflict class, are slots; anything nested is
/// part of the preceding slot's inner HTML. Periods are numbered from 1 and
/// advance by every slot's span, so empty cells still move the clock.
#[must_use]
pub fn scan_slots<'a>(day: &'a str, conflict_marker: &str) -> Vec<SlotBlock<'a>> {
	let tops: Vec<_> = SLOT_RE
		.captures_iter(day)
		.skip(1)
		.filter(|caps| is_top_level(&caps[1], conflict_marker))
		.collect();

	let mut period = 1;
	let mut slots = Vec::with_capacity(tops.len());

	for (i, caps) in tops.iter().enumerate() {
		let (Some(whole), Some(weight)) = (caps.get(0), caps.get(2)) else {
			continue;
		};
		let end = tops
			.get(i + 1)
			.and_then(|next| next.get(0))
			.map_or(day.len(), |next| next.start());

		let span = match weight.as_str().parse::<u32>() {
			Ok(span) => Some(span),
			Err(err) => {
				tracing::warn!(weight = weight.as_str(), %err, period, "unreadable slot weight");
				None
			}
		};

		slots.push(SlotBlock {
			start_period: period,
			span,
			inner_html: &day[whole.end()..end],
		});

		period = period.saturating_add(span.unwrap_or(1));
	}

	slots
}

#[cfg(test)]
mod tests {
	use super::*;

	const MARKER: &str = "kbappTimetableDayColumnRoot";
	const CONFLICT: &str = "kbappTimetableDayColumnConflictContainer";

	fn column(body: &str) -> String {
		format!(r#"<div class="{MARKER}" style="flex: 1;">{body}</div>"#)
	}

	#[test]
	fn splits_columns_in_order() {
		let html = format!(
			"<html><body><div class=\"grid\">{}{}</div>\n</body></html>",
			column("sun"),
			column("mon")
		);
		let days = split_days(&html, MARKER);

		assert_eq!(days.len(), 2);
		assert_eq!(days[0].weekday, 0);
		assert_eq!(days[0].html, column("sun"));
		assert_eq!(days[1].weekday, 1);
		assert_eq!(days[1].html, column("mon"));
	}

	#[test]
	fn stops_after_seven_columns() {
		let html: String = (0..9).map(|i| column(&i.to_string())).collect();

		assert_eq!(split_days(&html, MARKER).len(), 7);
	}

	#[test]
	fn missing_marker_yields_nothing() {
		assert!(split_days("<div>nothing here</div>", MARKER).is_empty());
	}

	#[test]
	fn slots_advance_period_counter() {
		let day = column(&format!(
			r#"<div style="flex: 2;"></div><div class="{CONFLICT}" style="flex: 2;"><div class="item" style="flex: 1;">A</div></div><div style="flex: 8;"></div>"#
		));
		let slots = scan_slots(&day, CONFLICT);

		let periods: Vec<_> = slots.iter().map(|s| (s.start_period, s.span)).collect();
		assert_eq!(periods, vec![(1, Some(2)), (3, Some(2)), (5, Some(8))]);
		assert!(slots[1].inner_html.contains("class=\"item\""));
		assert!(!slots[0].inner_html.contains('A'));
	}

	#[test]
	fn oversized_weight_is_contained_to_its_slot() {
		let day = column(
			r#"<div style="flex: 99999999999;"></div><div style="flex: 3;"></div>"#,
		);
		let slots = scan_slots(&day, CONFLICT);

		assert_eq!(slots.len(), 2);
		assert_eq!(slots[0].span, None);
		assert_eq!(slots[1].start_period, 2);
		assert_eq!(slots[1].span, Some(3));
	}
}
