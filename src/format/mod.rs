//! Duration formatting.
//!
//! Seconds are decomposed greedily over the selected units, largest first.
//! Every unit but the last is a whole count; the last (terminal) unit takes
//! the exact remainder and may be fractional:
//!
//! - `9000` over all units → `2h 30m`
//! - `90` over `{minute}` → `1.5m`
//! - `93784` over `{hour, minute}` → `26h 3.0666666666667m`

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::models::{Seconds, UnitDefinition, UnitKey, UnitTable, UNIT_TABLE};

/// Significant digits used for fractional terminal values.
pub const FRACTION_PRECISION: usize = 14;

/// Errors that can occur while configuring a formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid unit selection: '{name}' is not a duration unit")]
    InvalidUnitSelection { name: String },
}

/// Output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// `2h 30m`
    #[default]
    Short,
    /// `2 hours 30 minutes`
    Long,
}

impl Style {
    pub fn from_short(short: bool) -> Self {
        if short {
            Style::Short
        } else {
            Style::Long
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Short => write!(f, "short"),
            Style::Long => write!(f, "long"),
        }
    }
}

/// Formatter options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub style: Style,
    /// Units to decompose into. Order is ignored; empty means all units.
    pub units: Vec<UnitKey>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            style: Style::Short,
            units: UnitKey::ALL.to_vec(),
        }
    }
}

/// Formats seconds against a unit table.
#[derive(Debug, Clone)]
pub struct Formatter<'a> {
    table: &'a UnitTable,
    options: FormatOptions,
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Self::new(&UNIT_TABLE)
    }
}

impl<'a> Formatter<'a> {
    pub fn new(table: &'a UnitTable) -> Self {
        Self {
            table,
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.options.style = style;
        self
    }

    pub fn units(mut self, units: &[UnitKey]) -> Self {
        self.options.units = units.to_vec();
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format `value`. `None` and zero give an empty string.
    pub fn format(&self, value: Option<Seconds>) -> String {
        let Some(mut remaining) = value.filter(|v| *v > 0) else {
            return String::new();
        };

        let keys: &[UnitKey] = if self.options.units.is_empty() {
            &UnitKey::ALL
        } else {
            &self.options.units
        };
        let selected = self.table.select(keys);

        let mut parts = Vec::with_capacity(selected.len());
        for (i, unit) in selected.iter().enumerate() {
            let terminal = i + 1 == selected.len();
            if terminal {
                if remaining > 0 {
                    parts.push(self.render(unit, &quotient(remaining, unit.seconds)));
                }
            } else {
                let count = remaining / unit.seconds;
                if count > 0 {
                    parts.push(self.render(unit, &Quantity::Whole(count)));
                    remaining %= unit.seconds;
                }
            }
        }

        let rendered = parts.join(" ");
        trace!(value, rendered = %rendered, "formatted duration");
        rendered.trim().to_string()
    }

    fn render(&self, unit: &UnitDefinition, quantity: &Quantity) -> String {
        let number = quantity.to_string();
        match self.options.style {
            Style::Short => format!("{number}{}", unit.short),
            Style::Long if quantity.is_plural() => format!("{number} {}", unit.plural),
            Style::Long => format!("{number} {}", unit.singular),
        }
    }
}

/// A rendered unit count.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Quantity {
    Whole(u64),
    Fraction(f64),
}

impl Quantity {
    fn is_plural(&self) -> bool {
        match *self {
            Quantity::Whole(n) => n > 1,
            Quantity::Fraction(x) => x > 1.0,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Quantity::Whole(n) => write!(f, "{n}"),
            Quantity::Fraction(x) => f.write_str(&significant(x, FRACTION_PRECISION)),
        }
    }
}

fn quotient(remaining: u64, unit_seconds: u64) -> Quantity {
    if remaining % unit_seconds == 0 {
        Quantity::Whole(remaining / unit_seconds)
    } else {
        Quantity::Fraction(remaining as f64 / unit_seconds as f64)
    }
}

/// Render a positive float with at most `digits` significant digits,
/// trailing zeros trimmed. Digits left of the point are never dropped.
fn significant(value: f64, digits: usize) -> String {
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Format with the standard unit table.
///
/// An empty `units` slice selects all units.
pub fn format(value: Option<Seconds>, short: bool, units: &[UnitKey]) -> String {
    Formatter::default()
        .style(Style::from_short(short))
        .units(units)
        .format(value)
}

/// Parse a comma or space separated list of unit names ("hour,minute", "h m").
///
/// An empty list selects all units. Unknown names are rejected.
pub fn parse_unit_selection(list: &str) -> Result<Vec<UnitKey>, FormatError> {
    let mut keys = Vec::new();
    for name in list
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
    {
        let key = name
            .parse::<UnitKey>()
            .map_err(|_| FormatError::InvalidUnitSelection {
                name: name.to_string(),
            })?;
        keys.push(key);
    }
    if keys.is_empty() {
        keys = UnitKey::ALL.to_vec();
    }
    Ok(keys)
}
