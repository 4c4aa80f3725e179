//! Draft form state: raw string input per field plus field-scoped errors

use std::collections::BTreeMap;

/// Field name → validation message, only for fields that fail
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Parse a raw input the way a numeric form field reads it.
///
/// Blank, non-numeric and non-finite input all yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Raw user input keyed by field name, before any coercion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<&'static str, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value; an unset field reads as blank
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: &'static str, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).trim().is_empty()
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        parse_number(self.get(field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(&'static str, String)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A draft being created or edited: values plus the errors of the last validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// Store a new raw value and drop the error of that field only
    pub fn set_field(&mut self, field: &'static str, value: impl Into<String>) {
        self.values.set(field, value);
        self.errors.remove(field);
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// One page of a multi-step form
#[derive(Debug, Clone, Copy)]
pub struct FormStep {
    pub title: &'static str,
    /// Fields edited on this step
    pub fields: &'static [&'static str],
    /// Relaxed check gating navigation to the next step
    pub is_satisfied: fn(&FormValues) -> bool,
}

impl FormStep {
    pub fn owns(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }
}
