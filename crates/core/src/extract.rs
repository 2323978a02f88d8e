//! Course entries inside a slot, and the fields of their first detail line.

use select::{document::Document, node::Node};

use crate::{
	course::{clamp_periods, normalize, CourseRecord},
	segment::SlotBlock,
	weeks, Config,
};

/// Location and instructor recovered from a detail line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
	pub location: String,
	pub instructor: String,
}

/// Every course in `slot`, in document order.
///
/// Each title starts a course; the info lines up to the next title belong to
/// it. A slot whose weight could not be read yields nothing.
#[must_use]
pub fn extract_courses(slot: &SlotBlock<'_>, weekday: u8, config: &Config) -> Vec<CourseRecord> {
	let Some(span) = slot.span else {
		return Vec::new();
	};
	let Some((start_period, end_period)) = clamp_periods(slot.start_period, span) else {
		tracing::warn!(weekday, period = slot.start_period, "slot starts after the last period");
		return Vec::new();
	};

	let document = Document::from(slot.inner_html);
	let is_title = class_prefix(&config.title_class);
	let is_info = class_prefix(&config.info_class);
	let mut blocks: Vec<(String, Vec<String>)> = Vec::new();

	for node in document.find(|n: &Node| is_title(n) || is_info(n)) {
		let text = normalize(&node.text());

		if is_title(&node) {
			blocks.push((text, Vec::new()));
		} else if let Some((_, lines)) = blocks.last_mut() {
			if !text.is_empty() {
				lines.push(text);
			}
		}
	}

	blocks
		.into_iter()
		.filter(|(title, _)| {
			let keep = !title.is_empty() && !config.is_ignored_title(title);
			if !keep {
				tracing::debug!(title = title.as_str(), "skipping non-course title");
			}
			keep
		})
		.map(|(title, lines)| {
			let mut lines = lines.into_iter();
			let first = lines.next().unwrap_or_default();
			let week_expression = weeks::find_expression(&first).unwrap_or_default().to_owned();
			let Fields { location, instructor } = classify(&first, &week_expression, &config.campus_anchors);

			CourseRecord {
				title,
				weekday,
				start_period,
				end_period,
				weeks: weeks::parse_weeks(&first),
				week_expression,
				location,
				instructor,
				description: lines.collect::<Vec<_>>().join(" "),
			}
		})
		.collect()
}

/// Matches elements whose class attribute starts with `prefix`, so suffixed
/// variants like `titleText` count too.
fn class_prefix(prefix: &str) -> impl Fn(&Node) -> bool + '_ {
	move |node: &Node| {
		!prefix.is_empty()
			&& node
				.attr("class")
				.is_some_and(|class| class.trim_start().starts_with(prefix))
	}
}

/// Split a detail line into location and instructor.
///
/// The location runs from the first campus anchor to the end of the line, or
/// is the whole line without one. The instructor is what remains after
/// removing the week expression and the location. This is substring
/// subtraction, so a name that also occurs in the location can be cut short.
#[must_use]
pub fn classify(line: &str, week_expression: &str, anchors: &[String]) -> Fields {
	let anchor = anchors
		.iter()
		.filter(|a| !a.is_empty())
		.find_map(|a| line.find(a.as_str()).map(|pos| (a.as_str(), pos)));

	let location = match anchor {
		Some((_, pos)) => line[pos..].trim(),
		None => line.trim(),
	};

	let mut rest = if week_expression.is_empty() {
		line.to_owned()
	} else {
		line.replacen(week_expression, "", 1)
	};

	match anchor {
		Some((anchor, _)) => {
			if let Some(pos) = rest.find(anchor) {
				rest.truncate(pos);
			}
		}
		None if !location.is_empty() => rest = rest.replacen(location, "", 1),
		None => {}
	}

	let mut instructor = normalize(&rest);

	// nothing before the campus: the name may trail the room instead
	if instructor.is_empty() {
		if let Some((anchor, _)) = anchor {
			instructor = trailing_name(location, anchor).unwrap_or_default().to_owned();
		}
	}

	Fields {
		location: normalize(location),
		instructor,
	}
}

/// Last word after the campus if it cannot be a room number.
fn trailing_name<'a>(location: &'a str, anchor: &str) -> Option<&'a str> {
	location
		.strip_prefix(anchor)?
		.split_whitespace()
		.last()
		.filter(|word| !word.chars().any(|c| c.is_ascii_alphanumeric()))
}
