use serde::{Deserialize, Serialize};

use crate::domain::common::{default_active, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub i64);

impl ResourceId for ComponentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ComponentId)
    }
}

/// Physical component of a product (cap, label, shell)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,
    pub component_name: String,
    pub component_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_label: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("componentName", "Component Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("componentCode", "Component Code", FieldKind::Text).searchable(),
    FieldDescriptor::new("description", "Description", FieldKind::OptionalText)
        .searchable()
        .hidden_in_list(),
    FieldDescriptor::new("sortOrder", "Sort Order", FieldKind::Integer).default_value("1"),
    FieldDescriptor::new("componentWeight", "Weight (kg)", FieldKind::Decimal),
    FieldDescriptor::new("componentLabel", "Label", FieldKind::OptionalText).hidden_in_list(),
];

const RULES: &[Rule] = &[
    Rule::required("componentName", "Component name is required"),
    Rule::required("componentCode", "Component code is required"),
    NumberRule::new("sortOrder", "Sort order must be at least 1")
        .required("Sort order must be at least 1")
        .integer()
        .at_least(1.0)
        .rule(),
    NumberRule::new("componentWeight", "Weight must be greater than 0")
        .greater_than(0.0)
        .rule(),
];

impl Resource for Component {
    type Id = ComponentId;

    fn id(&self) -> Option<Self::Id> {
        self.component_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "componentId" => self.component_id.map(|id| id.0).into(),
            "componentName" => self.component_name.as_str().into(),
            "componentCode" => self.component_code.as_str().into(),
            "description" => self.description.clone().into(),
            "sortOrder" => self.sort_order.into(),
            "componentWeight" => self.component_weight.into(),
            "componentLabel" => self.component_label.clone().into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "components"
    }

    fn id_field() -> &'static str {
        "componentId"
    }

    fn element_name() -> &'static str {
        "Component"
    }

    fn list_name() -> &'static str {
        "Components"
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
}
