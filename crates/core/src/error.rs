use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the extraction pipeline and the renderers.
///
/// Missing markers, tags or fields are never errors; those degrade to fewer
/// recognized courses instead.
#[derive(Debug, Error)]
pub enum Error {
	/// The timetable document could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	/// The configuration file is not valid TOML for [`crate::Config`].
	#[error("invalid config {}: {source}", path.display())]
	Config {
		path: PathBuf,
		source: toml::de::Error,
	},

	#[error("csv error: {0}")]
	Csv(#[from] csv::Error),

	#[error("rendered output is not valid UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
}
