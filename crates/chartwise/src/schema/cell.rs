//! Scalar cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single dataset value.
///
/// Serialized untagged, so JSON `1`, `"a"`, `true` and `null` map directly
/// onto the matching variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// Text value, as read from the source.
    Text(String),
}

impl Cell {
    /// Check if this cell counts as missing (null or empty text).
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interpret the cell as a finite number.
    ///
    /// Text goes through [`parse_number`]. Booleans are never numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Get the text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse text as a finite number, ignoring `,` thousands separators.
///
/// The text is trimmed and parsed as a whole, so `"1,234.5"` is a number
/// and `"12kg"` is not.
pub fn parse_number(text: &str) -> Option<f64> {
    let stripped: String = text.trim().chars().filter(|&c| c != ',').collect();
    stripped.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}
