#![warn(missing_docs)]
//! Splitlens LSS Reader
//!
//! Reads LiveSplit `.lss` save files into the raw series consumed by
//! `splitlens-core`. The reader only extracts text; parsing the durations is
//! left to the summary builder.

mod document;
mod error;
mod reader;

pub use document::LssDocument;
pub use error::LssError;
pub use reader::{DATE_FORMAT, PERSONAL_BEST, parse_lss, read_lss_file};
