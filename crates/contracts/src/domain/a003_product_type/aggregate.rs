use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductTypeId(pub i64);

impl ResourceId for ProductTypeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ProductTypeId)
    }
}

/// Product type within a product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type_id: Option<ProductTypeId>,
    pub product_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type_description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category_id: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("productTypeName", "Type Name", FieldKind::Text).searchable(),
    FieldDescriptor::new(
        "productTypeDescription",
        "Description",
        FieldKind::OptionalText,
    )
    .searchable(),
    FieldDescriptor::new("productCategoryId", "Product Category", FieldKind::Integer),
    FieldDescriptor::new("sortOrder", "Sort Order", FieldKind::Integer).hidden_in_list(),
];

const RULES: &[Rule] = &[
    Rule::required("productTypeName", "Product type name is required"),
    Rule::max_length(
        "productTypeName",
        100,
        "Product type name cannot exceed 100 characters",
    ),
    Rule::max_length(
        "productTypeDescription",
        500,
        "Description cannot exceed 500 characters",
    ),
    NumberRule::new("productCategoryId", "Product category must be a valid selection")
        .integer()
        .greater_than(0.0)
        .rule(),
    NumberRule::new("sortOrder", "Sort order must be at least 1")
        .integer()
        .at_least(1.0)
        .rule(),
];

impl Resource for ProductType {
    type Id = ProductTypeId;

    fn id(&self) -> Option<Self::Id> {
        self.product_type_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "productTypeId" => self.product_type_id.map(|id| id.0).into(),
            "productTypeName" => self.product_type_name.as_str().into(),
            "productTypeDescription" => self.product_type_description.clone().into(),
            "productCategoryId" => self.product_category_id.into(),
            "sortOrder" => self.sort_order.into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "product-types"
    }

    fn id_field() -> &'static str {
        "productTypeId"
    }

    fn element_name() -> &'static str {
        "Product type"
    }

    fn list_name() -> &'static str {
        "Product types"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "productTypeName"
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }
}
