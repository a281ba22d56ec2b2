//! Form field binding for stored durations.
//!
//! A stored value is an optional number of seconds. It is shown to the user
//! through the formatter and read back through the parser.

use tracing::debug;

use crate::format::Formatter;
use crate::models::Seconds;
use crate::parse::{ParseError, Parser};

/// Converts a stored duration to display text and submitted text back.
#[derive(Debug, Clone)]
pub struct DurationField<'a> {
    formatter: Formatter<'a>,
    parser: Parser<'a>,
}

impl Default for DurationField<'static> {
    fn default() -> Self {
        Self::new(Formatter::default(), Parser::default())
    }
}

impl<'a> DurationField<'a> {
    pub fn new(formatter: Formatter<'a>, parser: Parser<'a>) -> Self {
        Self { formatter, parser }
    }

    /// Text for the input widget. An absent stored value shows as empty.
    pub fn display(&self, stored: Option<Seconds>) -> String {
        self.formatter.format(stored)
    }

    /// Seconds to persist. Absent or blank submissions are zero.
    pub fn submit(&self, submitted: Option<&str>) -> Result<Seconds, ParseError> {
        match submitted.map(str::trim) {
            None | Some("") => Ok(0),
            Some(text) => {
                let seconds = self.parser.parse(text)?;
                debug!(text, seconds, "accepted duration submission");
                Ok(seconds)
            }
        }
    }
}
