//! Export presentation for company lists.
//!
//! Callers sanitize first; [`ExportTable::build`] sorts and numbers a copy
//! for presentation and [`write_csv`] renders it.

pub mod csv_sink;
pub mod error;
pub mod table;

pub use csv_sink::{write_csv, write_csv_file};
pub use error::ExportError;
pub use table::{ExportRow, ExportTable};
