//! Row Source Adapter boundary for the catalog feed compiler.
//!
//! A [`RowSource`] supplies the primary-language and secondary-language
//! rows of the catalog for one compile cycle. Sheet exports on disk are
//! read by [`CsvRowSource`]; [`StaticRowSource`] serves rows already held
//! in memory.

pub mod csv_sheet;
pub mod error;
pub mod source;

pub use csv_sheet::{CsvRowSource, read_sheet, read_sheet_from_reader};
pub use error::SourceError;
pub use source::{RowSource, SourceRows, StaticRowSource};
