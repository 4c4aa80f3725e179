use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use super::ResourceId;
use crate::shared::form::{FieldErrors, FormValues};
use crate::shared::metadata::{validate, CoercionError, FieldDescriptor, FieldValue, Rule};

/// Body of a create/update request: wire field name → JSON value
pub type Payload = Map<String, Value>;

/// Wire name of the soft-delete flag
pub const ACTIVE_FLAG: &str = "isActive";

/// Serde default for the soft-delete flag: records arrive active unless told otherwise
pub fn default_active() -> bool {
    true
}

/// What `delete` means for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// The record is removed by the backend
    Hard,
    /// The backend clears `isActive`; the record stays listable and can be restored
    Deactivate,
}

impl DeletePolicy {
    pub fn allows_restore(&self) -> bool {
        matches!(self, Self::Deactivate)
    }
}

/// A record of a remote collection managed by a list screen
///
/// Defines the per-collection metadata (endpoint, labels, field table, rules)
/// together with typed access to the values of one record.
pub trait Resource: Clone + Serialize + DeserializeOwned + Debug + 'static {
    /// Identifier type of the collection
    type Id: ResourceId;

    // ============================================================================
    // Instance data
    // ============================================================================

    /// `None` for a record the backend has not stored yet
    fn id(&self) -> Option<Self::Id>;

    /// Typed value of a field by wire name; unknown names read as missing
    fn field_value(&self, field: &str) -> FieldValue;

    /// Soft-delete flag, `None` for collections without one
    fn is_active(&self) -> Option<bool> {
        None
    }

    /// Short human label used in notices and confirmations
    fn display_name(&self) -> String {
        Self::fields()
            .iter()
            .find(|f| f.searchable)
            .and_then(|f| match self.field_value(f.name) {
                FieldValue::Text(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .or_else(|| self.id().map(|id| id.as_string()))
            .unwrap_or_default()
    }

    // ============================================================================
    // Collection metadata
    // ============================================================================

    /// Module index (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Endpoint segment under `/api` (e.g. "product-groups")
    fn collection_name() -> &'static str;

    /// Wire name of the identifier field (e.g. "productId")
    fn id_field() -> &'static str;

    /// Singular UI name, used in notices ("Product created successfully")
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;

    /// Editable fields, in form order
    fn fields() -> &'static [FieldDescriptor];

    /// Rule set checked on submit
    fn rules() -> &'static [Rule];

    fn default_sort_field() -> &'static str;

    fn delete_policy() -> DeletePolicy {
        DeletePolicy::Deactivate
    }

    /// Server-side search endpoint below the collection, if the backend has one
    fn search_path() -> Option<&'static str> {
        None
    }

    /// Query-string key the search endpoint reads the text from
    fn search_param() -> &'static str {
        "query"
    }

    /// Checks that need the loaded collection (totals, duplicates).
    ///
    /// `editing` is the id of the record being edited, `None` while creating.
    fn validate_in_collection(
        _values: &FormValues,
        _editing: Option<&Self::Id>,
        _snapshot: &[Self],
    ) -> FieldErrors {
        FieldErrors::new()
    }

    // ============================================================================
    // Provided helpers
    // ============================================================================

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Form a new draft starts with
    fn blank_form() -> FormValues {
        Self::fields()
            .iter()
            .map(|f| (f.name, f.default.to_string()))
            .collect()
    }

    /// Form seeded from this record's current values
    fn to_form(&self) -> FormValues {
        Self::fields()
            .iter()
            .map(|f| (f.name, self.field_value(f.name).to_form_string()))
            .collect()
    }

    /// Run `rules`, then the collection-aware checks.
    ///
    /// A field that already failed a rule keeps that message.
    fn validate_form(
        rules: &[Rule],
        values: &FormValues,
        editing: Option<&Self::Id>,
        snapshot: &[Self],
    ) -> FieldErrors {
        let mut errors = validate(rules, values);
        for (field, message) in Self::validate_in_collection(values, editing, snapshot) {
            errors.entry(field).or_insert(message);
        }
        errors
    }

    /// Coerce a draft into a request body; blank optional fields are left out
    fn to_payload(values: &FormValues) -> Result<Payload, CoercionError> {
        let mut payload = Payload::new();
        for field in Self::fields() {
            if let Some(value) = field.kind.coerce(field.name, values.get(field.name))? {
                payload.insert(field.name.to_string(), value);
            }
        }
        Ok(payload)
    }

    /// The whole record as a request body, as used by restore
    fn to_full_payload(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Payload::new(),
        }
    }

    /// Case-insensitive substring match over the searchable fields.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        Self::fields()
            .iter()
            .filter(|f| f.searchable)
            .filter_map(|f| self.field_value(f.name).search_text())
            .any(|text| text.contains(needle))
    }
}
