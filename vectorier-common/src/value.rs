use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can be stored in a document attribute.
///
/// Every variant is rendered with the invariant formatter: `.` as the decimal
/// separator, no grouping separators and no exponent notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f32),
}

impl AttributeValue {
    pub fn to_invariant_string(&self) -> String {
        match self {
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::Integer(i) => i.to_string(),
            AttributeValue::Float(f) => format_f32(*f),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_invariant_string())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::Text(value.clone())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<usize> for AttributeValue {
    fn from(value: usize) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(value)
    }
}

/// Shortest decimal representation that parses back to the same `f32`.
///
/// Negative zero is written as `0`.
pub fn format_f32(value: f32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Fixed number of decimals, e.g. `format_fixed(2.0, 1) == "2.0"`.
pub fn format_fixed(value: f32, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Parses an invariant decimal string. Surrounding whitespace is ignored.
pub fn parse_f32(text: &str) -> Option<f32> {
    let text = text.trim();
    if text.is_empty() || text.contains(',') {
        return None;
    }
    text.parse::<f32>().ok()
}

pub fn parse_i32(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, "100")]
    #[case(-100.0, "-100")]
    #[case(0.5, "0.5")]
    #[case(-0.0, "0")]
    #[case(1234567.0, "1234567")]
    #[case(0.1, "0.1")]
    fn test_format_f32(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(format_f32(value), expected);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(2.0, 1), "2.0");
        assert_eq!(format_fixed(0.25, 2), "0.25");
        assert_eq!(format_fixed(-0.0, 1), "0.0");
        assert_eq!(format_fixed(-1.5, 1), "-1.5");
    }

    #[test]
    fn test_parse_f32() {
        assert_eq!(parse_f32("0.5"), Some(0.5));
        assert_eq!(parse_f32(" -100 "), Some(-100.0));
        assert_eq!(parse_f32("1,5"), None);
        assert_eq!(parse_f32(""), None);
        assert_eq!(parse_f32("Default"), None);
    }

    #[test]
    fn test_attribute_value_formatting() {
        assert_eq!(AttributeValue::from("Crate").to_string(), "Crate");
        assert_eq!(AttributeValue::from(12).to_string(), "12");
        assert_eq!(AttributeValue::from(2.5f32).to_string(), "2.5");
        assert_eq!(AttributeValue::from(-0.0f32).to_string(), "0");
    }
}
