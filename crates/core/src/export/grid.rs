//! Static HTML replica of the 12-period by 7-day timetable.

use std::collections::BTreeMap;

use crate::{
	course::CourseRecord,
	schedule::{period_time, Boundary, PERIODS},
	segment::DAYS,
	weeks,
};

const WEEKDAY_NAMES: [&str; DAYS] = ["星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六"];

const CONFLICT_SEPARATOR: &str = "<hr>";

const STYLE: &str = "table{border-collapse:collapse;width:100%;table-layout:fixed;font-size:13px}\
th,td{border:1px solid #ccc;padding:4px;vertical-align:top;text-align:center}\
th.period small{color:#888}\
td.course{background:#eef5ff}\
td.course .title{font-weight:bold}\
td.course hr{border:0;border-top:1px dashed #99b}";

fn escape(s: &str) -> String {
	let mut out = String::with_capacity(s.len());

	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			c => out.push(c),
		}
	}

	out
}

fn course_html(course: &CourseRecord) -> String {
	let weeks = if course.week_expression.is_empty() {
		weeks::runs(&course.weeks)
			.iter()
			.map(weeks::format_run)
			.collect::<Vec<_>>()
			.join(",")
	} else {
		course.week_expression.clone()
	};

	let mut html = format!(r#"<div class="title">{}</div>"#, escape(&course.title));

	for line in [&course.location, &weeks, &course.instructor, &course.description] {
		if !line.is_empty() {
			html.push_str(&format!(r#"<div class="info">{}</div>"#, escape(line)));
		}
	}

	html
}

/// Render the grid. Courses are keyed by their first period and weekday; a
/// course spanning several periods becomes one merged cell, and courses that
/// share a starting cell are stacked inside it.
#[must_use]
pub fn render_table(courses: &[CourseRecord]) -> String {
	let mut cells: BTreeMap<(u8, u8), Vec<&CourseRecord>> = BTreeMap::new();

	for course in courses {
		if usize::from(course.weekday) < DAYS && (1..=PERIODS).contains(&course.start_period) {
			cells
				.entry((course.start_period, course.weekday))
				.or_default()
				.push(course);
		}
	}

	let mut occupied = [[false; DAYS]; PERIODS as usize];
	let mut html = String::from(
		"<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n<title>课表</title>\n",
	);

	html.push_str(&format!(
		"<style>{STYLE}</style>\n</head>\n<body>\n<table class=\"course-table\">\n<tr><th></th>"
	));
	for name in WEEKDAY_NAMES {
		html.push_str(&format!("<th>{name}</th>"));
	}
	html.push_str("</tr>\n");

	for period in 1..=PERIODS {
		let row = usize::from(period - 1);

		html.push_str(&format!(
			"<tr><th class=\"period\">第{period}节<br><small>{}-{}</small></th>",
			period_time(period, Boundary::Start).format("%H:%M"),
			period_time(period, Boundary::End).format("%H:%M"),
		));

		for (day, weekday) in (0u8..).zip(0..DAYS) {
			let group = cells.get(&(period, day));

			if occupied[row][weekday] {
				if let Some(group) = group {
					tracing::debug!(
						period,
						weekday = day,
						hidden = group.len(),
						"cell covered by an earlier course"
					);
				}
				continue;
			}

			let Some(group) = group else {
				html.push_str("<td></td>");
				continue;
			};

			let rows = group
				.iter()
				.map(|c| c.span())
				.max()
				.unwrap_or(1)
				.min(PERIODS - period + 1);

			for covered in &mut occupied[row..row + usize::from(rows)] {
				covered[weekday] = true;
			}

			let body = group
				.iter()
				.map(|c| course_html(c))
				.collect::<Vec<_>>()
				.join(CONFLICT_SEPARATOR);

			if rows > 1 {
				html.push_str(&format!("<td class=\"course\" rowspan=\"{rows}\">{body}</td>"));
			} else {
				html.push_str(&format!("<td class=\"course\">{body}</td>"));
			}
		}

		html.push_str("</tr>\n");
	}

	html.push_str("</table>\n</body>\n</html>\n");
	html
}

#[cfg(test)]
mod tests {
	use super::*;

	fn course(title: &str, weekday: u8, start_period: u8, end_period: u8) -> CourseRecord {
		CourseRecord {
			title: title.into(),
			weekday,
			start_period,
			end_period,
			weeks: (1..=16).collect(),
			week_expression: "1-16周".into(),
			location: "浑南校区 信息A101".into(),
			instructor: String::new(),
			description: String::new(),
		}
	}

	fn rows(html: &str) -> Vec<&str> {
		html.lines().filter(|l| l.starts_with("<tr><th class=\"period\"")).collect()
	}

	#[test]
	fn twelve_rows_of_seven_cells() {
		let html = render_table(&[]);
		let rows = rows(&html);

		assert_eq!(rows.len(), 12);
		assert!(rows.iter().all(|r| r.matches("<td").count() == 7));
		assert!(html.contains("<th>星期日</th>"));
		assert!(rows[0].contains("08:30-09:15"));
	}

	#[test]
	fn multi_period_course_is_merged() {
		let html = render_table(&[course("高等数学", 1, 3, 4)]);
		let rows = rows(&html);

		assert!(rows[2].contains(r#"<td class="course" rowspan="2">"#));
		assert_eq!(rows[2].matches("<td").count(), 7);
		assert_eq!(rows[3].matches("<td").count(), 6);
		assert!(html.contains("1-16周"));
	}

	#[test]
	fn covered_cell_is_not_overwritten() {
		let html = render_table(&[course("高等数学", 2, 1, 4), course("大学英语", 2, 3, 3)]);

		assert!(html.contains("rowspan=\"4\""));
		assert!(!html.contains("大学英语"));
	}

	#[test]
	fn conflicts_share_one_cell() {
		let html = render_table(&[course("大学物理", 5, 5, 6), course("线性代数", 5, 5, 7)]);
		let row = rows(&html)[4];

		assert!(row.contains("大学物理</div><div class=\"info\">浑南校区 信息A101</div><div class=\"info\">1-16周</div><hr>"));
		assert!(row.contains("线性代数"));
		assert!(row.contains("rowspan=\"3\""));
	}

	#[test]
	fn text_is_escaped() {
		let html = render_table(&[course("C++ <基础>", 0, 1, 1)]);

		assert!(html.contains("C++ &lt;基础&gt;"));
	}
}
