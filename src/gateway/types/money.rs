//! Money types for API boundary enforcement
//!
//! - `StrictDecimal`: Format-validated input type

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// StrictDecimal: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format Decimal - validates format during deserialization
///
/// Accepts a JSON string or a JSON number. Both keep their exact digits and
/// are format-checked:
/// - Rejects `.5` (must be `0.5`)
/// - Rejects `5.` (must be `5.0` or `5`)
/// - Rejects empty strings
/// - Rejects scientific notation
/// - Rejects `+` prefix
///
/// Range and scale (minimum, 2 decimals, 13 integer digits) are business
/// rules and are checked by request validation, so they can be reported per
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictDecimal(Decimal);

impl StrictDecimal {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }

    /// Create from Decimal (for testing)
    #[cfg(test)]
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }
}

impl std::ops::Deref for StrictDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Largest scale `Decimal` holds exactly
const MAX_LITERAL_SCALE: usize = 28;

fn parse_strict(s: &str) -> Result<Decimal, String> {
    if s.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    // Reject .5 format (must be 0.5)
    if s.starts_with('.') || s.starts_with("-.") {
        return Err("Invalid format: use 0.5 not .5".to_string());
    }

    // Reject 5. format (must be 5.0 or 5)
    if s.ends_with('.') {
        return Err("Invalid format: use 5.0 not 5.".to_string());
    }

    if s.contains('e') || s.contains('E') {
        return Err("Invalid format: scientific notation not allowed".to_string());
    }

    if s.starts_with('+') {
        return Err("Invalid format: + prefix not allowed".to_string());
    }

    // Decimal::from_str rounds digits past its scale limit instead of failing
    if s
        .split_once('.')
        .is_some_and(|(_, fraction)| fraction.len() > MAX_LITERAL_SCALE)
    {
        return Err(format!(
            "Invalid decimal: more than {} decimal places",
            MAX_LITERAL_SCALE
        ));
    }

    Decimal::from_str(s).map_err(|e| format!("Invalid decimal: {}", e))
}

impl<'de> Deserialize<'de> for StrictDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Support both JSON number and JSON string
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(serde_json::Number),
        }

        match DecimalOrString::deserialize(deserializer)? {
            DecimalOrString::String(s) => parse_strict(&s).map(StrictDecimal).map_err(D::Error::custom),
            // arbitrary_precision keeps the literal digits, so a number gets the
            // same checks as its string form
            DecimalOrString::Number(n) => parse_strict(&n.to_string())
                .map(StrictDecimal)
                .map_err(D::Error::custom),
        }
    }
}

impl Serialize for StrictDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_decimal_valid_string() {
        let json = r#""1.5""#;
        let d: StrictDecimal = serde_json::from_str(json).unwrap();
        assert_eq!(*d, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_strict_decimal_accepts_json_number() {
        let d: StrictDecimal = serde_json::from_str("1000.5").unwrap();
        assert_eq!(*d, Decimal::from_str("1000.5").unwrap());

        let d: StrictDecimal = serde_json::from_str("0.1").unwrap();
        assert_eq!(d.inner().to_string(), "0.1");

        let d: StrictDecimal = serde_json::from_str("250").unwrap();
        assert_eq!(*d, Decimal::from(250));
    }

    #[test]
    fn test_strict_decimal_number_keeps_literal_digits() {
        let d: StrictDecimal = serde_json::from_str("0.00999999999999999999").unwrap();
        assert_eq!(d.inner().to_string(), "0.00999999999999999999");

        let d: StrictDecimal = serde_json::from_str("100.0000000000000001").unwrap();
        assert_eq!(d.inner().scale(), 16);
    }

    #[test]
    fn test_strict_decimal_number_matches_string_form() {
        for literal in ["0.00999999999999999999", "100.0000000000000001", "1500.75"] {
            let number: StrictDecimal = serde_json::from_str(literal).unwrap();
            let string: StrictDecimal =
                serde_json::from_str(&format!("\"{}\"", literal)).unwrap();
            assert_eq!(number, string, "{}", literal);
        }
    }

    #[test]
    fn test_strict_decimal_rejects_scientific_number() {
        let result: Result<StrictDecimal, _> = serde_json::from_str("1e3");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("scientific notation")
        );
    }

    #[test]
    fn test_strict_decimal_rejects_unrepresentable_scale() {
        let literal = format!("0.{}1", "0".repeat(28));
        let result: Result<StrictDecimal, _> = serde_json::from_str(&literal);
        assert!(result.unwrap_err().to_string().contains("decimal places"));

        let result: Result<StrictDecimal, _> = serde_json::from_str(&format!("\"{}\"", literal));
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_keeps_extra_scale_for_validation() {
        let d: StrictDecimal = serde_json::from_str(r#""10.123""#).unwrap();
        assert_eq!(d.inner().scale(), 3);
    }

    #[test]
    fn test_strict_decimal_passes_negative_to_validation() {
        let d: StrictDecimal = serde_json::from_str(r#""-1.5""#).unwrap();
        assert!(d.is_sign_negative());
    }

    #[test]
    fn test_strict_decimal_rejects_dot_prefix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#"".5""#);
        assert!(result.unwrap_err().to_string().contains("use 0.5 not .5"));
    }

    #[test]
    fn test_strict_decimal_rejects_dot_suffix() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""5.""#);
        assert!(result.unwrap_err().to_string().contains("use 5.0 not 5."));
    }

    #[test]
    fn test_strict_decimal_rejects_scientific_notation() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""1.5e8""#);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("scientific notation")
        );
    }

    #[test]
    fn test_strict_decimal_rejects_empty() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""""#);
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_strict_decimal_rejects_garbage() {
        let result: Result<StrictDecimal, _> = serde_json::from_str(r#""ten""#);
        assert!(result.unwrap_err().to_string().contains("Invalid decimal"));

        let result: Result<StrictDecimal, _> = serde_json::from_str("true");
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_decimal_serializes_as_string() {
        let d = StrictDecimal::from_decimal(Decimal::new(12345, 2));
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""123.45""#);
    }
}
