use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// Page-version-specific markers and word lists used while extracting.
///
/// Every field has a default matching the current portal markup, so a config
/// file only needs the keys that changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
	/// Token found in the class attribute of every weekday column.
	pub column_marker: String,
	/// Class of a top-level slot hosting one or more courses.
	pub conflict_marker: String,
	pub title_class: String,
	pub info_class: String,
	/// Campus names that start the location part of a detail line, checked in order.
	pub campus_anchors: Vec<String>,
	/// Titles that are page chrome rather than courses.
	pub ignored_titles: Vec<String>,
	pub ignore_date_titles: bool,
	/// Extra file names the HTML table is also written to.
	pub table_aliases: Vec<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			column_marker: "kbappTimetableDayColumnRoot".into(),
			conflict_marker: "kbappTimetableDayColumnConflictContainer".into(),
			title_class: "title".into(),
			info_class: "kbappTimetableCourseRenderCourseItemInfoText".into(),
			campus_anchors: vec!["浑南校区".into(), "南湖校区".into()],
			ignored_titles: ["个人中心", "我的课表", "修改密码", "退出登录", "课表", "全部课程"]
				.into_iter()
				.map(String::from)
				.collect(),
			ignore_date_titles: true,
			table_aliases: vec![
				"courseTableForStd.action".into(),
				"courseTableForStd!courseTable.action".into(),
			],
		}
	}
}

impl Config {
	/// Load a TOML config file; missing keys keep their defaults.
	///
	/// # Errors
	///
	/// Returns [`Error::Read`] if the file cannot be read and [`Error::Config`]
	/// if it is not valid TOML.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| Error::Read {
			path: path.to_path_buf(),
			source,
		})?;

		toml::from_str(&text).map_err(|source| Error::Config {
			path: path.to_path_buf(),
			source,
		})
	}

	#[must_use]
	pub fn is_ignored_title(&self, title: &str) -> bool {
		self.ignored_titles.iter().any(|t| t == title)
			|| (self.ignore_date_titles && crate::schedule::looks_like_date(title))
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn partial_file_keeps_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "campus-anchors = [\"长春校区\"]").unwrap();
		writeln!(file, "ignored-titles = [\"通知\"]").unwrap();

		let config = Config::from_file(file.path()).unwrap();

		assert_eq!(config.campus_anchors, vec!["长春校区"]);
		assert_eq!(config.column_marker, "kbappTimetableDayColumnRoot");
		assert!(config.is_ignored_title("通知"));
		assert!(!config.is_ignored_title("个人中心"));
	}

	#[test]
	fn bad_toml_is_a_config_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "campus-anchors = 3").unwrap();

		assert!(matches!(
			Config::from_file(file.path()),
			Err(Error::Config { .. })
		));
	}

	#[test]
	fn missing_file_is_a_read_error() {
		let dir = tempfile::tempdir().unwrap();

		assert!(matches!(
			Config::from_file(dir.path().join("nope.toml")),
			Err(Error::Read { .. })
		));
	}

	#[test]
	fn date_titles_are_ignored() {
		let config = Config::default();

		assert!(config.is_ignored_title("2026-03-01"));
		assert!(config.is_ignored_title("2026年3月1日"));
		assert!(config.is_ignored_title("我的课表"));
		assert!(!config.is_ignored_title("高等数学"));
	}
}
