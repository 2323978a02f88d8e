#![warn(clippy::pedantic)]

use std::{
	fs,
	io::{self, BufRead, Write},
	path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Parser;
use neu2ics_core::{
	export::{render_csv, render_ics, render_table},
	schedule::{parse_term_start, DEFAULT_TERM_START},
	Config, CourseRecord,
};

/// Export a saved NEU timetable page as iCalendar, CSV and HTML.
#[derive(Parser)]
#[command(name = "neu2ics", version)]
struct Args {
	/// Sunday of the first teaching week (YYYY-MM-DD); asked for when omitted
	#[clap(value_name = "DATE")]
	term_start: Option<String>,
	/// Saved timetable page
	#[clap(short, long, default_value = "exp.html", value_hint = clap::ValueHint::FilePath)]
	input: PathBuf,
	/// Directory the artifacts are written to
	#[clap(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
	output_dir: PathBuf,
	/// TOML file overriding page markers and word lists
	#[clap(short, long, value_hint = clap::ValueHint::FilePath)]
	config: Option<PathBuf>,
}

fn prompt_term_start() -> String {
	print!("请输入学期第一周周日的日期 (格式 YYYY-MM-DD): ");
	if let Err(err) = io::stdout().flush() {
		tracing::debug!(%err, "failed to flush prompt");
	}

	let mut line = String::new();
	match io::stdin().lock().read_line(&mut line) {
		Ok(n) if n > 0 && !line.trim().is_empty() => line.trim().to_owned(),
		_ => DEFAULT_TERM_START.to_owned(),
	}
}

fn write_artifact(dir: &Path, name: &str, contents: &str) -> anyhow::Result<()> {
	let path = dir.join(name);
	fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
	tracing::info!(path = %path.display(), "wrote artifact");

	Ok(())
}

/// Render and write every artifact, each on its own; returns how many failed.
fn write_all(dir: &Path, config: &Config, courses: &[CourseRecord], term_start: NaiveDate) -> usize {
	let table = render_table(courses);
	let mut artifacts = vec![
		("schedule.ics".to_owned(), Ok(render_ics(courses, term_start))),
		("schedule.csv".to_owned(), render_csv(courses).map_err(anyhow::Error::from)),
		("schedule.html".to_owned(), Ok(table.clone())),
	];

	artifacts.extend(
		config
			.table_aliases
			.iter()
			.map(|alias| (alias.clone(), Ok(table.clone()))),
	);

	let mut failures = 0;

	for (name, rendered) in artifacts {
		let result = rendered.and_then(|contents| write_artifact(dir, &name, &contents));

		if let Err(err) = result {
			tracing::error!("{name}: {err:#}");
			failures += 1;
		}
	}

	failures
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
		)
		.init();

	let args = Args::parse();
	let config = match &args.config {
		Some(path) => Config::from_file(path)?,
		None => Config::default(),
	};

	let courses = neu2ics_core::parse_from_file(&args.input, &config)?;

	tracing::info!(count = courses.len(), "extracted courses");
	for c in &courses {
		tracing::info!(
			"[{}] {} @ {} ({}-{}节)",
			c.weekday,
			c.title,
			c.location,
			c.start_period,
			c.end_period
		);
	}

	let term_start = parse_term_start(&args.term_start.unwrap_or_else(prompt_term_start));
	tracing::info!(%term_start, "term start");

	let events: usize = courses.iter().map(|c| c.weeks.len()).sum();
	let failures = write_all(&args.output_dir, &config, &courses, term_start);

	tracing::info!(courses = courses.len(), events, "generated calendar events");

	if failures > 0 {
		bail!("{failures} artifact(s) could not be written");
	}

	Ok(())
}
