use std::fmt;

use crate::error::ScrapeError;

/// A numeric table cell: a vote count, a percentage, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Count(i64),
    Percent(f64),
    Absent,
}

impl NumericValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, NumericValue::Absent)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Count(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on whole percentages
            NumericValue::Percent(p) => write!(f, "{:?}", p),
            NumericValue::Absent => Ok(()),
        }
    }
}

/// Parse a Czech-formatted cell ("1 234", "12,34", "-").
///
/// Non-breaking and plain spaces are thousands separators and get dropped.
/// A comma means a fractional value. Blank cells and a lone dash are
/// `Absent`, never zero. Anything else that fails to parse is an error.
pub fn parse_number(text: &str) -> Result<NumericValue, ScrapeError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|&c| c != '\u{a0}' && c != ' ')
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return Ok(NumericValue::Absent);
    }

    let invalid = || ScrapeError::InvalidNumber {
        text: text.to_string(),
    };

    if cleaned.contains(',') {
        cleaned
            .replace(',', ".")
            .parse::<f64>()
            .map(NumericValue::Percent)
            .map_err(|_| invalid())
    } else {
        cleaned
            .parse::<i64>()
            .map(NumericValue::Count)
            .map_err(|_| invalid())
    }
}
