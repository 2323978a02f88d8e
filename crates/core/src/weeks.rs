//! Parsing of week expressions such as `1-8周,10-16周(双)`.

use std::{collections::BTreeSet, ops::RangeInclusive, sync::LazyLock};

use regex::Regex;

/// Weeks assumed when a course carries no recognizable week expression.
pub const DEFAULT_WEEKS: RangeInclusive<u32> = 1..=16;

/// Highest week a term can reach; tokens past it are dropped.
pub const MAX_WEEK: u32 = 30;

static GROUP_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"([0-9,，\-]+)周(?:[(（]([单双])[)）])?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
	Any,
	Odd,
	Even,
}

impl Parity {
	fn admits(self, week: u32) -> bool {
		match self {
			Self::Any => true,
			Self::Odd => week % 2 == 1,
			Self::Even => week % 2 == 0,
		}
	}
}

/// Weeks named by every `list周(parity)` group in `text`, or [`DEFAULT_WEEKS`]
/// if there is none.
#[must_use]
pub fn parse_weeks(text: &str) -> BTreeSet<u32> {
	let mut weeks = BTreeSet::new();

	for caps in GROUP_RE.captures_iter(text) {
		let parity = match caps.get(2).map(|m| m.as_str()) {
			Some("单") => Parity::Odd,
			Some("双") => Parity::Even,
			_ => Parity::Any,
		};

		for token in caps[1].split([',', '，']).map(str::trim) {
			let Some((start, end)) = parse_token(token) else {
				continue;
			};

			if end > MAX_WEEK {
				tracing::warn!(token, "week beyond {MAX_WEEK}, ignoring");
				continue;
			}

			weeks.extend((start.max(1)..=end).filter(|&w| parity.admits(w)));
		}
	}

	if weeks.is_empty() {
		weeks.extend(DEFAULT_WEEKS);
	}

	weeks
}

fn parse_token(token: &str) -> Option<(u32, u32)> {
	if token.is_empty() {
		return None;
	}

	match token.split_once('-') {
		Some((start, end)) => Some((start.trim().parse().ok()?, end.trim().parse().ok()?)),
		None => {
			let week = token.parse().ok()?;
			Some((week, week))
		}
	}
}

/// The slice of `text` holding its week expression: from the first group to
/// the end of the last one.
#[must_use]
pub fn find_expression(text: &str) -> Option<&str> {
	let mut groups = GROUP_RE.find_iter(text);
	let first = groups.next()?;
	let end = groups.last().map_or(first.end(), |m| m.end());

	Some(text[first.start()..end].trim_start_matches([',', '，', '-']))
}

/// Sorted weeks merged into runs of consecutive numbers.
#[must_use]
pub fn runs(weeks: &BTreeSet<u32>) -> Vec<RangeInclusive<u32>> {
	let mut runs: Vec<RangeInclusive<u32>> = Vec::new();

	for &week in weeks {
		match runs.last_mut() {
			Some(run) if run.end() + 1 == week => *run = *run.start()..=week,
			_ => runs.push(week..=week),
		}
	}

	runs
}

/// `1-3周` for a run, `5周` for a single week.
#[must_use]
pub fn format_run(run: &RangeInclusive<u32>) -> String {
	if run.start() == run.end() {
		format!("{}周", run.start())
	} else {
		format!("{}-{}周", run.start(), run.end())
	}
}
