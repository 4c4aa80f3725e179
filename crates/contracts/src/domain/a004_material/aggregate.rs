use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub i64);

impl ResourceId for MaterialId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(MaterialId)
    }
}

/// Raw material used in products and components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<MaterialId>,
    pub material_name: String,
    pub material_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub material_type_id: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("materialName", "Material Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("materialCode", "Material Code", FieldKind::Text).searchable(),
    FieldDescriptor::new("description", "Description", FieldKind::OptionalText).searchable(),
    FieldDescriptor::new("materialTypeId", "Material Type", FieldKind::Integer),
];

const RULES: &[Rule] = &[
    Rule::required("materialName", "Material name is required"),
    Rule::required("materialCode", "Material code is required"),
    NumberRule::new("materialTypeId", "Material type is required")
        .required("Material type is required")
        .integer()
        .greater_than(0.0)
        .rule(),
];

impl Resource for Material {
    type Id = MaterialId;

    fn id(&self) -> Option<Self::Id> {
        self.material_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "materialId" => self.material_id.map(|id| id.0).into(),
            "materialName" => self.material_name.as_str().into(),
            "materialCode" => self.material_code.as_str().into(),
            "description" => self.description.clone().into(),
            "materialTypeId" => self.material_type_id.into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "materials"
    }

    fn id_field() -> &'static str {
        "materialId"
    }

    fn element_name() -> &'static str {
        "Material"
    }

    fn list_name() -> &'static str {
        "Materials"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "materialName"
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }
}
