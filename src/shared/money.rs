//! Monetary amounts
//!
//! Amounts are `rust_decimal::Decimal` values with two decimal places, the
//! equivalent of a `DECIMAL(10, 2)` column. They are stored as canonical text
//! and serialized to JSON as strings (`"2000.00"`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::shared::error::SharedError;
use crate::shared::validation::Validator;

/// Digits kept after the decimal point
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive upper bound for an amount (ten digits, two of them decimals)
pub fn max_amount() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Round to two decimal places and fix the scale so `2000` renders as `2000.00`
pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

/// Text form written to the database
pub fn to_storage(amount: Decimal) -> String {
    normalize(amount).to_string()
}

/// Parse an amount read back from the database
pub fn from_storage(raw: &str) -> Result<Decimal, SharedError> {
    Decimal::from_str(raw)
        .map(normalize)
        .map_err(|e| SharedError::amount(format!("{raw:?}: {e}")))
}

/// Interpret a JSON value as a number
///
/// Accepts JSON numbers and numeric strings (`"150"`, `"12.5"`).
pub fn numeric_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(Decimal::from(int))
            } else if let Some(uint) = number.as_u64() {
                Some(Decimal::from(uint))
            } else {
                number.as_f64().and_then(|float| Decimal::try_from(float).ok())
            }
        }
        Value::String(text) => Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok(),
        _ => None,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        _ => false,
    }
}

/// Validate an `amount` field, recording every violation
///
/// A missing amount fails all three rules (required, numeric, positive), a
/// non-numeric one fails the last two, a non-positive one only the last.
/// Positivity is judged after rounding to cents, so `0.004` is zero.
/// Returns the normalized amount when every rule passes.
pub fn validate_amount(validator: &mut Validator, path: &str, value: Option<&Value>) -> Option<Decimal> {
    if is_blank(value) {
        validator.push(path, "Amount is required");
    }

    let parsed = value.and_then(numeric_value);
    match parsed {
        None => {
            validator.push(path, "Amount must be a number");
            validator.push(path, "Amount must be greater than zero");
            None
        }
        Some(amount) if normalize(amount) <= Decimal::ZERO => {
            validator.push(path, "Amount must be greater than zero");
            None
        }
        Some(amount) if normalize(amount) >= max_amount() => {
            validator.push(path, "Amount must be less than 100000000");
            None
        }
        Some(amount) => Some(normalize(amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::FieldLocation;
    use serde_json::json;

    fn messages(value: Option<Value>) -> (Option<Decimal>, Vec<String>) {
        let mut validator = Validator::new(FieldLocation::Body);
        let amount = validate_amount(&mut validator, "amount", value.as_ref());
        let msgs = match validator.finish() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.into_iter().map(|e| e.msg).collect(),
        };
        (amount, msgs)
    }

    #[test]
    fn test_missing_amount_fails_three_rules() {
        let (amount, msgs) = messages(None);
        assert!(amount.is_none());
        assert_eq!(
            msgs,
            vec![
                "Amount is required",
                "Amount must be a number",
                "Amount must be greater than zero",
            ]
        );
    }

    #[test]
    fn test_non_numeric_amount() {
        let (_, msgs) = messages(Some(json!("lots")));
        assert_eq!(msgs, vec!["Amount must be a number", "Amount must be greater than zero"]);
    }

    #[test]
    fn test_non_positive_amount() {
        let (_, msgs) = messages(Some(json!(0)));
        assert_eq!(msgs, vec!["Amount must be greater than zero"]);

        let (_, msgs) = messages(Some(json!("-12.50")));
        assert_eq!(msgs, vec!["Amount must be greater than zero"]);
    }

    #[test]
    fn test_sub_cent_amounts_round_to_zero() {
        for raw in ["0.001", "0.004"] {
            let (amount, msgs) = messages(Some(json!(raw)));
            assert!(amount.is_none(), "{raw}");
            assert_eq!(msgs, vec!["Amount must be greater than zero"]);
        }

        let (amount, msgs) = messages(Some(json!("0.005")));
        assert!(msgs.is_empty());
        assert_eq!(amount.unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_amount_too_large() {
        let (_, msgs) = messages(Some(json!(100_000_000)));
        assert_eq!(msgs, vec!["Amount must be less than 100000000"]);
    }

    #[test]
    fn test_valid_amounts_are_normalized() {
        let (amount, msgs) = messages(Some(json!(2000)));
        assert!(msgs.is_empty());
        assert_eq!(amount.unwrap().to_string(), "2000.00");

        let (amount, _) = messages(Some(json!("12.345")));
        assert_eq!(amount.unwrap().to_string(), "12.35");

        let (amount, _) = messages(Some(json!(99.9)));
        assert_eq!(amount.unwrap().to_string(), "99.90");
    }

    #[test]
    fn test_storage_format() {
        let amount = Decimal::new(150, 0);
        assert_eq!(to_storage(amount), "150.00");
        assert_eq!(from_storage("150.00").unwrap(), Decimal::new(15000, 2));
        assert!(from_storage("not a number").is_err());
    }
}
