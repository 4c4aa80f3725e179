use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCompositionId(pub i64);

impl ResourceId for MaterialCompositionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(MaterialCompositionId)
    }
}

/// Share of a material within a composition, as a weight and a percentage range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialComposition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_composition_id: Option<MaterialCompositionId>,
    pub composition_name: String,
    pub composition_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub material_id: Option<i64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub min_percentage: Option<f64>,
    #[serde(default)]
    pub max_percentage: Option<f64>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("compositionName", "Composition Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("compositionCode", "Composition Code", FieldKind::Text).searchable(),
    FieldDescriptor::new("description", "Description", FieldKind::OptionalText)
        .searchable()
        .hidden_in_list(),
    FieldDescriptor::new("materialId", "Material", FieldKind::Integer),
    FieldDescriptor::new("weightKg", "Weight (kg)", FieldKind::Decimal),
    FieldDescriptor::new("minPercentage", "Min %", FieldKind::Decimal).default_value("0"),
    FieldDescriptor::new("maxPercentage", "Max %", FieldKind::Decimal).default_value("100"),
    FieldDescriptor::new("sortOrder", "Sort Order", FieldKind::Integer).default_value("1"),
    FieldDescriptor::new("notes", "Notes", FieldKind::OptionalText).hidden_in_list(),
];

const RULES: &[Rule] = &[
    Rule::required("compositionName", "Composition name is required"),
    Rule::required("compositionCode", "Composition code is required"),
    NumberRule::new("materialId", "Material ID must be a valid positive number")
        .required("Material ID is required")
        .integer()
        .greater_than(0.0)
        .rule(),
    NumberRule::new("weightKg", "Weight must be greater than 0")
        .required("Weight is required")
        .greater_than(0.0)
        .rule(),
    NumberRule::new("minPercentage", "Minimum percentage must be between 0 and 100")
        .required("Minimum percentage is required")
        .at_least(0.0)
        .at_most(100.0)
        .rule(),
    NumberRule::new("maxPercentage", "Maximum percentage must be between 0 and 100")
        .required("Maximum percentage is required")
        .at_least(0.0)
        .at_most(100.0)
        .rule(),
    Rule::ordered(
        "minPercentage",
        "maxPercentage",
        "Maximum percentage must be ≥ minimum percentage",
    ),
    NumberRule::new("sortOrder", "Sort order must be at least 1")
        .required("Sort order is required")
        .integer()
        .at_least(1.0)
        .rule(),
];

impl Resource for MaterialComposition {
    type Id = MaterialCompositionId;

    fn id(&self) -> Option<Self::Id> {
        self.material_composition_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "materialCompositionId" => self.material_composition_id.map(|id| id.0).into(),
            "compositionName" => self.composition_name.as_str().into(),
            "compositionCode" => self.composition_code.as_str().into(),
            "description" => self.description.clone().into(),
            "materialId" => self.material_id.into(),
            "weightKg" => self.weight_kg.into(),
            "minPercentage" => self.min_percentage.into(),
            "maxPercentage" => self.max_percentage.into(),
            "sortOrder" => self.sort_order.into(),
            "notes" => self.notes.clone().into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "material-compositions"
    }

    fn id_field() -> &'static str {
        "materialCompositionId"
    }

    fn element_name() -> &'static str {
        "Material composition"
    }

    fn list_name() -> &'static str {
        "Material compositions"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "sortOrder"
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }
}
