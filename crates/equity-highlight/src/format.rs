//! Display formatting for quote figures.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Direction of a signed change, rendered as a CSS class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

impl ChangeDirection {
    pub fn from_value(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Classifies a textual value; anything non-numeric is neutral.
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<f64>()
            .map(Self::from_value)
            .unwrap_or(Self::Neutral)
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for ChangeDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Formats `value` with exactly two decimals.
///
/// Rounding is applied to the shortest decimal form of the float with ties
/// going away from zero, so `150.005` renders as `150.01`. Values that round
/// to zero render without a sign.
///
/// Magnitudes beyond what [`Decimal`] holds (about `7.9e28`) are always
/// integral; they are printed from their shortest form with `.00` appended.
pub fn format_two_decimals(field: &'static str, value: f64) -> Result<String, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }

    let Ok(decimal) = Decimal::from_str(&value.to_string()) else {
        return Ok(format!("{value}.00"));
    };

    let mut rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    Ok(rounded.to_string())
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    #[test]
    fn classifies_sign_of_numbers() {
        assert_eq!(ChangeDirection::from_value(0.01), ChangeDirection::Positive);
        assert_eq!(ChangeDirection::from_value(-3.5), ChangeDirection::Negative);
        assert_eq!(ChangeDirection::from_value(0.0), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::from_value(-0.0), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::from_value(f64::NAN), ChangeDirection::Neutral);
    }

    #[test]
    fn classifies_textual_values() {
        assert_eq!(ChangeDirection::parse("2.35"), ChangeDirection::Positive);
        assert_eq!(ChangeDirection::parse("-1.20"), ChangeDirection::Negative);
        assert_eq!(ChangeDirection::parse("0.00"), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::parse("-0.00"), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::parse("n/a"), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::parse(""), ChangeDirection::Neutral);
    }

    #[test]
    fn direction_matches_comparison_with_zero() {
        let values = [
            0.0,
            -0.0,
            5e-324,
            -5e-324,
            f64::MIN_POSITIVE,
            -f64::MIN_POSITIVE,
            1e-12,
            -0.004,
            0.5,
            -1.2,
            150.005,
            -2.345e10,
            1e29,
            f64::MAX,
            f64::MIN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ];

        for value in values {
            let expected = match value.partial_cmp(&0.0) {
                Some(Ordering::Greater) => ChangeDirection::Positive,
                Some(Ordering::Less) => ChangeDirection::Negative,
                Some(Ordering::Equal) | None => ChangeDirection::Neutral,
            };
            assert_eq!(ChangeDirection::from_value(value), expected, "value {value:e}");
        }
    }

    #[test]
    fn class_names_are_stable() {
        assert_eq!(ChangeDirection::Positive.class_name(), "positive");
        assert_eq!(ChangeDirection::Negative.to_string(), "negative");
        assert_eq!(ChangeDirection::Neutral.class_name(), "neutral");
    }

    #[test]
    fn rounds_ties_away_from_zero() {
        assert_eq!(format_two_decimals("price", 150.005).as_deref(), Ok("150.01"));
        assert_eq!(format_two_decimals("change", 2.345).as_deref(), Ok("2.35"));
        assert_eq!(format_two_decimals("change", -2.345).as_deref(), Ok("-2.35"));
    }

    #[test]
    fn pads_to_two_decimals() {
        assert_eq!(format_two_decimals("change", -1.2).as_deref(), Ok("-1.20"));
        assert_eq!(format_two_decimals("price", 42.0).as_deref(), Ok("42.00"));
        assert_eq!(format_two_decimals("price", 0.1).as_deref(), Ok("0.10"));
    }

    #[test]
    fn values_rounding_to_zero_are_unsigned() {
        assert_eq!(format_two_decimals("change", -0.001).as_deref(), Ok("0.00"));
        assert_eq!(format_two_decimals("change", -0.0).as_deref(), Ok("0.00"));
    }

    #[test]
    fn magnitudes_beyond_decimal_range_still_format() {
        assert_eq!(
            format_two_decimals("change", 1e29).as_deref(),
            Ok("100000000000000000000000000000.00")
        );
        assert_eq!(
            format_two_decimals("change", -1e29).as_deref(),
            Ok("-100000000000000000000000000000.00")
        );
        assert_eq!(format_two_decimals("change", 5e-324).as_deref(), Ok("0.00"));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            format_two_decimals("price", f64::INFINITY),
            Err(ValidationError::NonFiniteValue { field: "price" })
        );
        assert!(format_two_decimals("price", f64::NAN).is_err());
    }
}
