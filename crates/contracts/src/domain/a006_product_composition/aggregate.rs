use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::form::{FieldErrors, FormValues};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

/// Tolerance for the 100% ceiling, absorbs float noise from decimal inputs
const PERCENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCompositionId(pub i64);

impl ResourceId for ProductCompositionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ProductCompositionId)
    }
}

/// Material share of a product: weight and percentage of the product total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComposition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_composition_id: Option<ProductCompositionId>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub material_id: Option<i64>,
    #[serde(default)]
    pub product_category_id: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub composition_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ProductComposition {
    fn belongs_to(&self, product_id: f64) -> bool {
        self.product_id.map(|id| id as f64) == Some(product_id)
    }

    fn uses_material(&self, material_id: f64) -> bool {
        self.material_id.map(|id| id as f64) == Some(material_id)
    }
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("productId", "Product", FieldKind::Integer),
    FieldDescriptor::new("materialId", "Material", FieldKind::Integer),
    FieldDescriptor::new("productCategoryId", "Product Category", FieldKind::Integer),
    FieldDescriptor::new("weight", "Weight (kg)", FieldKind::Decimal),
    FieldDescriptor::new("compositionPercentage", "Composition %", FieldKind::Decimal),
    FieldDescriptor::new("notes", "Notes", FieldKind::OptionalText).searchable(),
];

const RULES: &[Rule] = &[
    NumberRule::new("productId", "Product is required")
        .required("Product is required")
        .integer()
        .greater_than(0.0)
        .rule(),
    NumberRule::new("materialId", "Material is required")
        .required("Material is required")
        .integer()
        .greater_than(0.0)
        .rule(),
    NumberRule::new("productCategoryId", "Product category is required")
        .required("Product category is required")
        .integer()
        .greater_than(0.0)
        .rule(),
    NumberRule::new("weight", "Weight must be greater than 0")
        .required("Weight must be greater than 0")
        .greater_than(0.0)
        .rule(),
    NumberRule::new(
        "compositionPercentage",
        "Composition percentage must be greater than 0",
    )
    .required("Composition percentage must be greater than 0")
    .greater_than(0.0)
    .rule(),
    NumberRule::new(
        "compositionPercentage",
        "Composition percentage cannot exceed 100%",
    )
    .at_most(100.0)
    .rule(),
];

impl Resource for ProductComposition {
    type Id = ProductCompositionId;

    fn id(&self) -> Option<Self::Id> {
        self.product_composition_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "productCompositionId" => self.product_composition_id.map(|id| id.0).into(),
            "productId" => self.product_id.into(),
            "materialId" => self.material_id.into(),
            "productCategoryId" => self.product_category_id.into(),
            "weight" => self.weight.into(),
            "compositionPercentage" => self.composition_percentage.into(),
            "notes" => self.notes.clone().into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn display_name(&self) -> String {
        match (self.product_id, self.material_id) {
            (Some(product), Some(material)) => format!("product {product} / material {material}"),
            _ => self
                .product_composition_id
                .map(|id| id.as_string())
                .unwrap_or_default(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "product-compositions"
    }

    fn id_field() -> &'static str {
        "productCompositionId"
    }

    fn element_name() -> &'static str {
        "Product composition"
    }

    fn list_name() -> &'static str {
        "Product compositions"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "productId"
    }

    /// The active compositions of one product may not add up to more than 100%,
    /// and a material appears at most once per product.
    fn validate_in_collection(
        values: &FormValues,
        editing: Option<&Self::Id>,
        snapshot: &[Self],
    ) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let Some(product_id) = values.number("productId") else {
            return errors;
        };
        let siblings = || {
            snapshot.iter().filter(move |c| {
                c.is_active && c.belongs_to(product_id) && c.product_composition_id.as_ref() != editing
            })
        };

        if let Some(percentage) = values.number("compositionPercentage") {
            let taken: f64 = siblings().filter_map(|c| c.composition_percentage).sum();
            if taken + percentage > 100.0 + PERCENT_EPSILON {
                errors.insert(
                    "compositionPercentage",
                    format!(
                        "Total would exceed 100%. Maximum allowed: {:.2}%",
                        (100.0 - taken).max(0.0)
                    ),
                );
            }
        }

        if editing.is_none() {
            if let Some(material_id) = values.number("materialId") {
                if siblings().any(|c| c.uses_material(material_id)) {
                    errors.insert(
                        "materialId",
                        "This material is already used in this product".to_string(),
                    );
                }
            }
        }

        errors
    }
}
