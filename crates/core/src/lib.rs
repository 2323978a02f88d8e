#![warn(clippy::pedantic)]

//! Course schedules from a saved NEU timetable page, rendered as iCalendar,
//! CSV and a static HTML table.

pub mod config;
pub mod course;
pub mod error;
pub mod export;
pub mod extract;
pub mod schedule;
pub mod segment;
pub mod weeks;

pub use config::Config;
pub use course::{parse_from_buf, parse_from_file, CourseRecord};
pub use error::Error;

/// Campus timezone. Event times stay floating; this only names the zone for
/// calendar clients.
pub const TZ: chrono_tz::Tz = chrono_tz::Asia::Shanghai;
