//! Validation rules for form fields
//!
//! Rules run against the raw string values of a draft. For every field only
//! the first failing rule is reported, so a value that does not parse as a
//! number never reaches its range check.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::form::{parse_number, FieldErrors, FormValues};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

/// Lower or upper limit of a numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn admits_above(&self, value: f64) -> bool {
        match *self {
            Self::Inclusive(min) => value >= min,
            Self::Exclusive(min) => value > min,
        }
    }

    fn admits_below(&self, value: f64) -> bool {
        match *self {
            Self::Inclusive(max) => value <= max,
            Self::Exclusive(max) => value < max,
        }
    }
}

/// Numeric field: must parse, optionally be whole, and sit inside its bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRule {
    pub field: &'static str,
    /// Message for blank input; `None` lets a blank value through
    pub required: Option<&'static str>,
    pub integer: bool,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    /// Message for input that does not parse
    pub invalid: &'static str,
    pub out_of_range: &'static str,
}

impl NumberRule {
    /// `message` is reported both for unparseable and out-of-range input
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            required: None,
            integer: false,
            min: None,
            max: None,
            invalid: message,
            out_of_range: message,
        }
    }

    pub const fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub const fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub const fn invalid(mut self, message: &'static str) -> Self {
        self.invalid = message;
        self
    }

    pub const fn at_least(mut self, min: f64) -> Self {
        self.min = Some(Bound::Inclusive(min));
        self
    }

    pub const fn greater_than(mut self, min: f64) -> Self {
        self.min = Some(Bound::Exclusive(min));
        self
    }

    pub const fn at_most(mut self, max: f64) -> Self {
        self.max = Some(Bound::Inclusive(max));
        self
    }

    pub const fn rule(self) -> Rule {
        Rule::Number(self)
    }

    fn check(&self, values: &FormValues) -> Option<&'static str> {
        let raw = values.get(self.field);
        if raw.trim().is_empty() {
            return self.required;
        }
        let Some(value) = parse_number(raw) else {
            return Some(self.invalid);
        };
        if self.integer && value.fract() != 0.0 {
            return Some(self.invalid);
        }
        let above = self.min.map_or(true, |b| b.admits_above(value));
        let below = self.max.map_or(true, |b| b.admits_below(value));
        if above && below {
            None
        } else {
            Some(self.out_of_range)
        }
    }
}

/// A single validation rule of a collection's rule set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Non-blank after trimming
    Required {
        field: &'static str,
        message: &'static str,
    },
    Number(NumberRule),
    /// Character count ceiling
    MaxLength {
        field: &'static str,
        max: usize,
        message: &'static str,
    },
    /// Loose `\S+@\S+\.\S+` shape check, blank passes
    Email {
        field: &'static str,
        message: &'static str,
    },
    /// Value must be one of the options, blank passes
    OneOf {
        field: &'static str,
        options: &'static [&'static str],
        message: &'static str,
    },
    /// `YYYY-MM-DD` calendar date, blank passes
    Date {
        field: &'static str,
        message: &'static str,
    },
    /// Cross-field `lower <= upper`, reported on `upper`
    Ordered {
        lower: &'static str,
        upper: &'static str,
        message: &'static str,
    },
}

impl Rule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self::Required { field, message }
    }

    pub const fn max_length(field: &'static str, max: usize, message: &'static str) -> Self {
        Self::MaxLength { field, max, message }
    }

    pub const fn email(field: &'static str, message: &'static str) -> Self {
        Self::Email { field, message }
    }

    pub const fn one_of(
        field: &'static str,
        options: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self::OneOf {
            field,
            options,
            message,
        }
    }

    pub const fn date(field: &'static str, message: &'static str) -> Self {
        Self::Date { field, message }
    }

    pub const fn ordered(lower: &'static str, upper: &'static str, message: &'static str) -> Self {
        Self::Ordered {
            lower,
            upper,
            message,
        }
    }

    /// Field an error of this rule is reported on
    pub fn field(&self) -> &'static str {
        match *self {
            Self::Required { field, .. }
            | Self::MaxLength { field, .. }
            | Self::Email { field, .. }
            | Self::OneOf { field, .. }
            | Self::Date { field, .. } => field,
            Self::Number(rule) => rule.field,
            Self::Ordered { upper, .. } => upper,
        }
    }

    fn check(&self, values: &FormValues, errors: &FieldErrors) -> Option<&'static str> {
        match *self {
            Self::Required { field, message } => values.is_blank(field).then_some(message),
            Self::Number(rule) => rule.check(values),
            Self::MaxLength {
                field,
                max,
                message,
            } => (values.get(field).chars().count() > max).then_some(message),
            Self::Email { field, message } => {
                let raw = values.get(field);
                (!raw.trim().is_empty() && !EMAIL_RE.is_match(raw)).then_some(message)
            }
            Self::OneOf {
                field,
                options,
                message,
            } => {
                let raw = values.get(field).trim();
                (!raw.is_empty() && !options.contains(&raw)).then_some(message)
            }
            Self::Date { field, message } => {
                let raw = values.get(field).trim();
                (!raw.is_empty() && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err())
                    .then_some(message)
            }
            Self::Ordered {
                lower,
                upper,
                message,
            } => {
                if errors.contains_key(lower) {
                    return None;
                }
                match (values.number(lower), values.number(upper)) {
                    (Some(lo), Some(hi)) if lo > hi => Some(message),
                    _ => None,
                }
            }
        }
    }
}

/// Run a rule set against a draft.
///
/// Pure and total: the result only contains fields that fail, with the message
/// of the first failing rule for each field.
pub fn validate(rules: &[Rule], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules {
        let field = rule.field();
        if errors.contains_key(field) {
            continue;
        }
        if let Some(message) = rule.check(values, &errors) {
            errors.insert(field, message.to_string());
        }
    }
    errors
}
