//! Duration units and the fixed unit table.
//!
//! Magnitudes use calendar approximations (365-day year, 30-day month). They
//! are not leap-year or month-length aware; use [`crate::calendar`] when
//! calendar accuracy matters.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a unit name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown duration unit: {0}")]
pub struct UnknownUnit(pub String);

/// A duration granularity, declared largest to smallest.
///
/// The derived `Ord` follows declaration order, so sorting keys yields the
/// canonical largest-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKey {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl UnitKey {
    /// All keys in canonical order.
    pub const ALL: [UnitKey; 7] = [
        UnitKey::Year,
        UnitKey::Month,
        UnitKey::Week,
        UnitKey::Day,
        UnitKey::Hour,
        UnitKey::Minute,
        UnitKey::Second,
    ];

    /// Position of this key in the unit table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for UnitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(UNIT_TABLE.get(*self).singular)
    }
}

impl FromStr for UnitKey {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNIT_TABLE
            .unit_for_suffix(s.trim())
            .map(|unit| unit.key)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// One row of the unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDefinition {
    pub key: UnitKey,
    /// Seconds per unit, always > 0
    pub seconds: u64,
    /// Abbreviation used in short form ("h")
    pub short: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

impl UnitDefinition {
    const fn new(
        key: UnitKey,
        seconds: u64,
        short: &'static str,
        singular: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            key,
            seconds,
            short,
            singular,
            plural,
        }
    }

    /// True if `token` is exactly one of this unit's names.
    pub fn matches(&self, token: &str) -> bool {
        token == self.short || token == self.singular || token == self.plural
    }
}

/// The ordered, immutable unit table.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: [UnitDefinition; 7],
}

/// The standard table shared by the free functions.
pub static UNIT_TABLE: UnitTable = UnitTable::standard();

impl UnitTable {
    /// Build the standard seven-unit table.
    pub const fn standard() -> Self {
        Self {
            units: [
                UnitDefinition::new(UnitKey::Year, 31_536_000, "y", "year", "years"),
                UnitDefinition::new(UnitKey::Month, 2_592_000, "mo", "month", "months"),
                UnitDefinition::new(UnitKey::Week, 604_800, "w", "week", "weeks"),
                UnitDefinition::new(UnitKey::Day, 86_400, "d", "day", "days"),
                UnitDefinition::new(UnitKey::Hour, 3_600, "h", "hour", "hours"),
                UnitDefinition::new(UnitKey::Minute, 60, "m", "minute", "minutes"),
                UnitDefinition::new(UnitKey::Second, 1, "s", "second", "seconds"),
            ],
        }
    }

    /// All units, largest first.
    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    /// Get the definition for a key.
    pub fn get(&self, key: UnitKey) -> &UnitDefinition {
        &self.units[key.index()]
    }

    /// Find the unit whose short, singular or plural name equals `token`.
    ///
    /// Exact match only: "mo" is a month, "m" is a minute, "min" is nothing.
    pub fn unit_for_suffix(&self, token: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|unit| unit.matches(token))
    }

    /// Intersect a key selection with the table.
    ///
    /// Only membership matters: the result is always in table order with
    /// duplicates removed.
    pub fn select(&self, keys: &[UnitKey]) -> Vec<&UnitDefinition> {
        self.units
            .iter()
            .filter(|unit| keys.contains(&unit.key))
            .collect()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_is_descending() {
        let units = UNIT_TABLE.units();
        assert_eq!(units.len(), 7);
        for pair in units.windows(2) {
            assert!(pair[0].seconds > pair[1].seconds);
            assert!(pair[0].key < pair[1].key);
        }
    }

    #[test]
    fn test_table_magnitudes() {
        assert_eq!(UNIT_TABLE.get(UnitKey::Year).seconds, 365 * 86_400);
        assert_eq!(UNIT_TABLE.get(UnitKey::Month).seconds, 30 * 86_400);
        assert_eq!(UNIT_TABLE.get(UnitKey::Week).seconds, 7 * 86_400);
        assert_eq!(UNIT_TABLE.get(UnitKey::Second).seconds, 1);
    }

    #[test]
    fn test_get_matches_key() {
        for key in UnitKey::ALL {
            assert_eq!(UNIT_TABLE.get(key).key, key);
        }
    }

    #[test]
    fn test_unit_for_suffix_all_forms() {
        let short = UNIT_TABLE.unit_for_suffix("h").unwrap();
        let singular = UNIT_TABLE.unit_for_suffix("hour").unwrap();
        let plural = UNIT_TABLE.unit_for_suffix("hours").unwrap();
        assert_eq!(short, singular);
        assert_eq!(singular, plural);
        assert_eq!(short.key, UnitKey::Hour);
    }

    #[test]
    fn test_unit_for_suffix_m_vs_mo() {
        assert_eq!(UNIT_TABLE.unit_for_suffix("m").unwrap().key, UnitKey::Minute);
        assert_eq!(UNIT_TABLE.unit_for_suffix("mo").unwrap().key, UnitKey::Month);
    }

    #[test]
    fn test_unit_for_suffix_no_prefix_matching() {
        assert!(UNIT_TABLE.unit_for_suffix("xyz").is_none());
        assert!(UNIT_TABLE.unit_for_suffix("min").is_none());
        assert!(UNIT_TABLE.unit_for_suffix("hou").is_none());
        assert!(UNIT_TABLE.unit_for_suffix("").is_none());
        assert!(UNIT_TABLE.unit_for_suffix("H").is_none());
    }

    #[test]
    fn test_suffixes_are_distinct() {
        let mut names: Vec<&str> = UNIT_TABLE
            .units()
            .iter()
            .flat_map(|u| [u.short, u.singular, u.plural])
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_select_ignores_caller_order() {
        let selected = UNIT_TABLE.select(&[UnitKey::Second, UnitKey::Hour, UnitKey::Hour]);
        let keys: Vec<UnitKey> = selected.iter().map(|u| u.key).collect();
        assert_eq!(keys, vec![UnitKey::Hour, UnitKey::Second]);
    }

    #[test]
    fn test_unit_key_from_str() {
        assert_eq!("minutes".parse::<UnitKey>().unwrap(), UnitKey::Minute);
        assert_eq!(" d ".parse::<UnitKey>().unwrap(), UnitKey::Day);
        assert_eq!(
            "fortnight".parse::<UnitKey>(),
            Err(UnknownUnit("fortnight".to_string()))
        );
    }

    #[test]
    fn test_unit_key_display() {
        assert_eq!(format!("{}", UnitKey::Week), "week");
        assert_eq!(UnitKey::Month.to_string(), "month");
    }

    #[test]
    fn test_unit_key_serialization() {
        let json = serde_json::to_string(&UnitKey::Hour).unwrap();
        assert_eq!(json, "\"hour\"");

        let deserialized: UnitKey = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, UnitKey::Hour);
    }
}
