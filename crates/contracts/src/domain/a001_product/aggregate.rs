use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ResourceId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ProductId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A product placed on the market by the producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub sku_product_code: String,
    #[serde(default)]
    pub product_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_weight: Option<f64>,
    #[serde(default)]
    pub product_lifecycle_duration: Option<i64>,
    #[serde(default)]
    pub compliance_target_percentage: Option<f64>,
    /// Assigned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_manufacturing_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_expiry_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("productName", "Product Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("skuProductCode", "SKU / Product Code", FieldKind::Text).searchable(),
    FieldDescriptor::new("productGroupId", "Product Group", FieldKind::Integer),
    FieldDescriptor::new("productDescription", "Description", FieldKind::OptionalText)
        .searchable()
        .hidden_in_list(),
    FieldDescriptor::new("productWeight", "Weight (kg)", FieldKind::Decimal),
    FieldDescriptor::new("productLifecycleDuration", "Lifecycle (months)", FieldKind::Integer),
    FieldDescriptor::new(
        "complianceTargetPercentage",
        "Compliance Target (%)",
        FieldKind::Decimal,
    )
    .default_value("0"),
    FieldDescriptor::new("productManufacturingDate", "Manufacturing Date", FieldKind::Date)
        .hidden_in_list(),
    FieldDescriptor::new("productExpiryDate", "Expiry Date", FieldKind::Date).hidden_in_list(),
];

const RULES: &[Rule] = &[
    Rule::required("productName", "Product name is required"),
    Rule::required("skuProductCode", "SKU/Product code is required"),
    NumberRule::new("productWeight", "Product weight must be greater than 0")
        .required("Product weight must be greater than 0")
        .greater_than(0.0)
        .rule(),
    NumberRule::new(
        "productLifecycleDuration",
        "Lifecycle duration must be greater than 0",
    )
    .required("Lifecycle duration must be greater than 0")
    .integer()
    .invalid("Lifecycle duration must be a whole number of months")
    .greater_than(0.0)
    .rule(),
    NumberRule::new(
        "complianceTargetPercentage",
        "Compliance target must be between 0 and 100",
    )
    .at_least(0.0)
    .at_most(100.0)
    .rule(),
    NumberRule::new("productGroupId", "Product group is required")
        .required("Product group is required")
        .integer()
        .greater_than(0.0)
        .rule(),
    Rule::date(
        "productManufacturingDate",
        "Manufacturing date must be a valid date (YYYY-MM-DD)",
    ),
    Rule::date(
        "productExpiryDate",
        "Expiry date must be a valid date (YYYY-MM-DD)",
    ),
    Rule::max_length(
        "productDescription",
        500,
        "Description cannot exceed 500 characters",
    ),
];

impl Resource for Product {
    type Id = ProductId;

    fn id(&self) -> Option<Self::Id> {
        self.product_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "productId" => self.product_id.map(|id| id.0).into(),
            "productName" => self.product_name.as_str().into(),
            "skuProductCode" => self.sku_product_code.as_str().into(),
            "productGroupId" => self.product_group_id.into(),
            "productDescription" => self.product_description.clone().into(),
            "productWeight" => self.product_weight.into(),
            "productLifecycleDuration" => self.product_lifecycle_duration.into(),
            "complianceTargetPercentage" => self.compliance_target_percentage.into(),
            "registrationDate" => self.registration_date.clone().into(),
            "productManufacturingDate" => self.product_manufacturing_date.into(),
            "productExpiryDate" => self.product_expiry_date.into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn display_name(&self) -> String {
        self.product_name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn id_field() -> &'static str {
        "productId"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "productName"
    }
}
