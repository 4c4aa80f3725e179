use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductGroupId(pub i64);

impl ResourceId for ProductGroupId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ProductGroupId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Top level of the product classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_group_id: Option<ProductGroupId>,
    pub product_group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("productGroupName", "Group Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("groupCode", "Group Code", FieldKind::OptionalText).searchable(),
    FieldDescriptor::new("description", "Description", FieldKind::OptionalText)
        .searchable()
        .hidden_in_list(),
    FieldDescriptor::new("sortOrder", "Sort Order", FieldKind::Integer).default_value("1"),
];

const RULES: &[Rule] = &[
    Rule::required("productGroupName", "Product group name is required"),
    Rule::max_length(
        "productGroupName",
        100,
        "Product group name cannot exceed 100 characters",
    ),
    NumberRule::new("sortOrder", "Sort order must be at least 1")
        .integer()
        .at_least(1.0)
        .rule(),
];

impl Resource for ProductGroup {
    type Id = ProductGroupId;

    fn id(&self) -> Option<Self::Id> {
        self.product_group_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "productGroupId" => self.product_group_id.map(|id| id.0).into(),
            "productGroupName" => self.product_group_name.as_str().into(),
            "groupCode" => self.group_code.clone().into(),
            "description" => self.description.clone().into(),
            "sortOrder" => self.sort_order.into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product-groups"
    }

    fn id_field() -> &'static str {
        "productGroupId"
    }

    fn element_name() -> &'static str {
        "Product group"
    }

    fn list_name() -> &'static str {
        "Product groups"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "productGroupName"
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }

    fn search_param() -> &'static str {
        "name"
    }
}
