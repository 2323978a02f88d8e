//! Writers turning extracted courses into output artifacts.

pub mod grid;
pub mod ics;
pub mod spreadsheet;

pub use grid::render_table;
pub use ics::{create_calendar, render_ics};
pub use spreadsheet::render_csv;
