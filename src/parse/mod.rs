//! Duration string parsing.
//!
//! Recognizers are tried in priority order, first match wins:
//! 1. `HH:MM:SS`
//! 2. `HH:MM`
//! 3. bare integer seconds
//! 4. a scan for `<number><unit>` pairs ("2h 30m", "2.5 hours", "1,5d")
//!
//! Only ASCII digits count as numbers; other digit scripts are noise.
//!
//! The default mode is lenient: unknown unit tokens contribute nothing and
//! input that matches nothing parses to zero. Strict mode turns both into
//! errors.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, trace};

use crate::models::{Seconds, UnitTable, UNIT_TABLE};

static COLON_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+):([0-9]+):([0-9]+)$").expect("valid colon-triple regex")
});

static COLON_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+):([0-9]+)$").expect("valid colon-pair regex"));

static BARE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)$").expect("valid integer regex"));

static UNIT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:[.,][0-9]+)?)\s*([a-z]+)").expect("valid unit-pair regex")
});

/// Errors that can occur while parsing a duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Duration out of range: {input}")]
    Overflow { input: String },

    #[error("Unknown unit '{token}'")]
    UnknownUnit { token: String },

    #[error("Unrecognized duration: {input}")]
    Unrecognized { input: String },
}

/// How forgiving the parser is about noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip unknown units, treat unmatched input as zero
    #[default]
    Lenient,
    /// Reject unknown units and unmatched input
    Strict,
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::Lenient => write!(f, "lenient"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

/// Parser options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
        }
    }
}

/// Parses duration strings against a unit table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    table: &'a UnitTable,
    options: ParseOptions,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(&UNIT_TABLE)
    }
}

impl<'a> Parser<'a> {
    /// Create a lenient parser over `table`.
    pub fn new(table: &'a UnitTable) -> Self {
        Self {
            table,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse `input` into a number of seconds.
    pub fn parse(&self, input: &str) -> Result<Seconds, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(0);
        }

        if let Some(caps) = COLON_TRIPLE.captures(input) {
            trace!(input, "matched HH:MM:SS");
            let hours = parse_int(&caps[1], input)?;
            let minutes = parse_int(&caps[2], input)?;
            let seconds = parse_int(&caps[3], input)?;
            return positional(&[(hours, 3600), (minutes, 60), (seconds, 1)], input);
        }

        if let Some(caps) = COLON_PAIR.captures(input) {
            trace!(input, "matched HH:MM");
            let hours = parse_int(&caps[1], input)?;
            let minutes = parse_int(&caps[2], input)?;
            return positional(&[(hours, 3600), (minutes, 60)], input);
        }

        if BARE_INTEGER.is_match(input) {
            trace!(input, "matched bare seconds");
            return parse_int(input, input);
        }

        self.parse_unit_pairs(input)
    }

    fn parse_unit_pairs(&self, input: &str) -> Result<Seconds, ParseError> {
        let mut total: Seconds = 0;
        let mut matched = false;

        for caps in UNIT_PAIR.captures_iter(input) {
            let token = &caps[2];
            let Some(unit) = self.table.unit_for_suffix(token) else {
                if self.options.mode == ParseMode::Strict {
                    return Err(ParseError::UnknownUnit {
                        token: token.to_string(),
                    });
                }
                debug!(input, token, "skipping unknown unit");
                continue;
            };

            // "1,5" and "1.5" are the same number; the regex guarantees a valid float
            let value: f64 = caps[1].replace(',', ".").parse().map_err(|_| {
                ParseError::Unrecognized {
                    input: input.to_string(),
                }
            })?;

            let product = value * unit.seconds as f64;
            if !product.is_finite() || product >= u64::MAX as f64 {
                return Err(overflow(input));
            }

            total = total
                .checked_add(product as u64)
                .ok_or_else(|| overflow(input))?;
            matched = true;
        }

        if !matched && self.options.mode == ParseMode::Strict {
            return Err(ParseError::Unrecognized {
                input: input.to_string(),
            });
        }

        trace!(input, total, "parsed unit pairs");
        Ok(total)
    }
}

/// Parse with the standard unit table in lenient mode.
pub fn parse(input: &str) -> Result<Seconds, ParseError> {
    Parser::default().parse(input)
}

fn overflow(input: &str) -> ParseError {
    ParseError::Overflow {
        input: input.to_string(),
    }
}

fn parse_int(digits: &str, input: &str) -> Result<u64, ParseError> {
    digits.parse().map_err(|_| overflow(input))
}

fn positional(parts: &[(u64, u64)], input: &str) -> Result<Seconds, ParseError> {
    parts.iter().try_fold(0u64, |acc, &(value, scale)| {
        value
            .checked_mul(scale)
            .and_then(|v| acc.checked_add(v))
            .ok_or_else(|| overflow(input))
    })
}
