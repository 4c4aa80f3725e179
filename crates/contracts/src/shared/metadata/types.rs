//! Field descriptors and typed field values
//!
//! Every collection declares its form fields once as a static slice of
//! [`FieldDescriptor`]. The same table drives form seeding, payload coercion,
//! free-text search and list columns.

use chrono::NaiveDate;

use super::field_type::FieldKind;

/// Metadata for a single form field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Wire name of the field (camelCase, as the backend expects it)
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Raw value a blank create form starts with
    pub default: &'static str,
    /// Included in the free-text search
    pub searchable: bool,
    pub visible_in_list: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            default: "",
            searchable: false,
            visible_in_list: true,
        }
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = value;
        self
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn hidden_in_list(mut self) -> Self {
        self.visible_in_list = false;
        self
    }
}

/// A typed scalar read from an entity
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Missing,
}

impl FieldValue {
    /// Raw string form used to seed an edit form
    pub fn to_form_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Missing => String::new(),
        }
    }

    /// Lowercased text for case-insensitive search; numbers and flags are not searched
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.to_lowercase()),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
