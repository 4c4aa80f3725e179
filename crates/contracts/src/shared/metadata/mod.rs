//! Field metadata for collection forms
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::{FieldDescriptor, FieldKind};
//!
//! const FIELDS: &[FieldDescriptor] = &[
//!     FieldDescriptor::new("vendorName", "Vendor Name", FieldKind::Text).searchable(),
//!     FieldDescriptor::new("vendorCapacityTonnes", "Capacity (t)", FieldKind::Decimal),
//! ];
//! ```

mod field_type;
mod types;
pub mod validation;

pub use field_type::{CoercionError, FieldKind};
pub use types::{FieldDescriptor, FieldValue};
pub use validation::{validate, Bound, NumberRule, Rule};
