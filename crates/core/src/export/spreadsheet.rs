use csv::{QuoteStyle, WriterBuilder};

use crate::{course::CourseRecord, weeks, Error};

pub const HEADER: [&str; 7] = ["课程名称", "星期", "开始节数", "结束节数", "老师", "地点", "周数"];

/// Weekday as shown in the sheet: Monday = 1 … Sunday = 7.
#[must_use]
pub fn display_weekday(weekday: u8) -> u8 {
	if weekday == 0 {
		7
	} else {
		weekday
	}
}

/// One row per course and run of consecutive weeks. Text fields are always
/// quoted.
///
/// # Errors
///
/// Fails only if the in-memory writer does.
pub fn render_csv(courses: &[CourseRecord]) -> Result<String, Error> {
	let mut buf = Vec::new();

	{
		let mut header = WriterBuilder::new()
			.quote_style(QuoteStyle::Never)
			.from_writer(&mut buf);
		header.write_record(HEADER)?;
		header.flush().map_err(csv::Error::from)?;
	}

	let mut rows = WriterBuilder::new()
		.quote_style(QuoteStyle::NonNumeric)
		.from_writer(buf);

	for course in courses {
		let lecturer = if course.instructor.is_empty() {
			&course.description
		} else {
			&course.instructor
		};

		let weekday = display_weekday(course.weekday).to_string();
		let start = course.start_period.to_string();
		let end = course.end_period.to_string();

		for run in weeks::runs(&course.weeks) {
			let label = weeks::format_run(&run);

			rows.write_record([
				course.title.as_str(),
				weekday.as_str(),
				start.as_str(),
				end.as_str(),
				lecturer.as_str(),
				course.location.as_str(),
				label.as_str(),
			])?;
		}
	}

	let buf = rows
		.into_inner()
		.map_err(|err| Error::Csv(err.into_error().into()))?;

	Ok(String::from_utf8(buf)?)
}
