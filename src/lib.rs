//! # durconv
//!
//! Converts between human-readable durations and integer seconds.
//!
//! ## Architecture
//!
//! - **models**: Unit table, unit keys and calendar intervals
//! - **parse**: Duration strings to seconds (`02:30:45`, `150`, `2h 30m`)
//! - **format**: Seconds to short or long unit strings
//! - **calendar**: Seconds to and from calendar intervals, `HH:MM` clocks
//! - **field**: Form field binding over the parser and formatter
//! - **config**: Configuration loading and validation
//!
//! ```
//! use durconv::{format, parse, UnitKey};
//!
//! assert_eq!(parse("2.5 hours").unwrap(), 9000);
//! assert_eq!(format(Some(9000), true, &UnitKey::ALL), "2h 30m");
//! assert_eq!(format(Some(90), true, &[UnitKey::Minute]), "1.5m");
//! ```

pub mod calendar;
pub mod config;
pub mod field;
pub mod format;
pub mod models;
pub mod parse;

pub use calendar::{to_hh_mm, to_interval, to_seconds, CalendarError};
pub use format::{format, parse_unit_selection, FormatError, FormatOptions, Formatter, Style};
pub use models::*;
pub use parse::{parse, ParseError, ParseMode, ParseOptions, Parser};
