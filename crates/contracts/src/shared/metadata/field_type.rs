//! Field kind enumeration and raw-input coercion

use chrono::NaiveDate;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::shared::form::parse_number;

/// Semantic type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Required free text, sent trimmed
    #[default]
    Text,
    /// Free text; blank input is left out of the payload
    OptionalText,
    /// Whole number (ids, durations, sort orders)
    Integer,
    /// Fractional number (weights, percentages)
    Decimal,
    /// "true" / "false"
    Bool,
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
    /// Calendar date in `YYYY-MM-DD` form
    Date,
}

/// Raw input that could not be turned into a payload value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("{field}: '{value}' is not a number")]
    NotNumber { field: &'static str, value: String },
    #[error("{field}: '{value}' is not a whole number")]
    NotInteger { field: &'static str, value: String },
    #[error("{field}: expected true or false, got '{value}'")]
    NotBool { field: &'static str, value: String },
    #[error("{field}: '{value}' is not one of the allowed options")]
    NotAnOption { field: &'static str, value: String },
    #[error("{field}: '{value}' is not a date (expected YYYY-MM-DD)")]
    NotDate { field: &'static str, value: String },
}

impl FieldKind {
    /// Coerce a raw form value into its payload representation.
    ///
    /// `Ok(None)` means the field is blank and is left out of the payload.
    pub fn coerce(&self, field: &'static str, raw: &str) -> Result<Option<Value>, CoercionError> {
        let trimmed = raw.trim();
        match self {
            Self::Text => Ok(Some(Value::String(trimmed.to_string()))),
            Self::OptionalText | Self::Date | Self::Choice(_) | Self::Bool
                if trimmed.is_empty() =>
            {
                Ok(None)
            }
            Self::Integer | Self::Decimal if trimmed.is_empty() => Ok(None),
            Self::OptionalText => Ok(Some(Value::String(trimmed.to_string()))),
            Self::Integer => {
                let number = parse_number(trimmed).ok_or_else(|| CoercionError::NotNumber {
                    field,
                    value: raw.to_string(),
                })?;
                if number.fract() != 0.0 || number.abs() >= i64::MAX as f64 {
                    return Err(CoercionError::NotInteger {
                        field,
                        value: raw.to_string(),
                    });
                }
                Ok(Some(Value::Number(Number::from(number as i64))))
            }
            Self::Decimal => parse_number(trimmed)
                .and_then(Number::from_f64)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| CoercionError::NotNumber {
                    field,
                    value: raw.to_string(),
                }),
            Self::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Some(Value::Bool(true))),
                "false" => Ok(Some(Value::Bool(false))),
                _ => Err(CoercionError::NotBool {
                    field,
                    value: raw.to_string(),
                }),
            },
            Self::Choice(options) => {
                if options.contains(&trimmed) {
                    Ok(Some(Value::String(trimmed.to_string())))
                } else {
                    Err(CoercionError::NotAnOption {
                        field,
                        value: raw.to_string(),
                    })
                }
            }
            Self::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|d| Some(Value::String(d.format("%Y-%m-%d").to_string())))
                .map_err(|_| CoercionError::NotDate {
                    field,
                    value: raw.to_string(),
                }),
        }
    }
}
