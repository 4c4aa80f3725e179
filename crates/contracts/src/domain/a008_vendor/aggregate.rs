use serde::{Deserialize, Serialize};

use crate::domain::common::{DeletePolicy, Resource, ResourceId};
use crate::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub i64);

impl ResourceId for VendorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(VendorId)
    }
}

pub const VENDOR_TYPES: &[&str] = &[
    "RECYCLING",
    "COLLECTION",
    "PROCESSING",
    "TRANSPORTATION",
    "DISPOSAL",
    "CONSULTING",
    "OTHER",
];

pub const CERTIFICATION_STATUSES: &[&str] = &["VALID", "EXPIRED"];

/// Recycling / collection partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<VendorId>,
    pub vendor_name: String,
    pub vendor_code: String,
    #[serde(default)]
    pub vendor_capacity_tonnes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    #[serde(default)]
    pub assigned_tasks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_performance_metrics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_certification_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Reported by some backends; vendors are removed outright on delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("vendorName", "Vendor Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("vendorCode", "Vendor Code", FieldKind::Text).searchable(),
    FieldDescriptor::new("vendorCapacityTonnes", "Capacity (t)", FieldKind::Decimal),
    FieldDescriptor::new("vendorType", "Vendor Type", FieldKind::Choice(VENDOR_TYPES))
        .default_value("RECYCLING"),
    FieldDescriptor::new("assignedTasks", "Assigned Tasks", FieldKind::Text).searchable(),
    FieldDescriptor::new(
        "vendorCertificationStatus",
        "Certification",
        FieldKind::Choice(CERTIFICATION_STATUSES),
    )
    .default_value("VALID"),
    FieldDescriptor::new("vendorFeedback", "Feedback", FieldKind::OptionalText).hidden_in_list(),
    FieldDescriptor::new("contactPerson", "Contact Person", FieldKind::OptionalText)
        .searchable()
        .hidden_in_list(),
    FieldDescriptor::new("contactEmail", "Contact Email", FieldKind::OptionalText)
        .hidden_in_list(),
    FieldDescriptor::new("contactPhone", "Contact Phone", FieldKind::OptionalText)
        .hidden_in_list(),
    FieldDescriptor::new("address", "Address", FieldKind::OptionalText).hidden_in_list(),
    FieldDescriptor::new("city", "City", FieldKind::OptionalText).hidden_in_list(),
    FieldDescriptor::new("state", "State", FieldKind::OptionalText).hidden_in_list(),
    FieldDescriptor::new("zipCode", "ZIP Code", FieldKind::OptionalText).hidden_in_list(),
    FieldDescriptor::new("country", "Country", FieldKind::OptionalText)
        .default_value("India")
        .hidden_in_list(),
];

/// Rules of the vendor management form
pub const MANAGEMENT_RULES: [Rule; 10] = [
    Rule::required("vendorName", "Vendor name is required"),
    Rule::max_length(
        "vendorName",
        100,
        "Vendor name must not exceed 100 characters",
    ),
    Rule::required("vendorCode", "Vendor code is required"),
    Rule::max_length(
        "vendorCode",
        50,
        "Vendor code must not exceed 50 characters",
    ),
    NumberRule::new(
        "vendorCapacityTonnes",
        "Vendor capacity must be at least 1 tonne",
    )
    .required("Vendor capacity must be at least 1 tonne")
    .at_least(1.0)
    .rule(),
    Rule::one_of(
        "vendorType",
        VENDOR_TYPES,
        "Please select a valid vendor type",
    ),
    Rule::required("assignedTasks", "Assigned tasks are required"),
    Rule::max_length(
        "assignedTasks",
        250,
        "Assigned tasks must not exceed 250 characters",
    ),
    Rule::one_of(
        "vendorCertificationStatus",
        CERTIFICATION_STATUSES,
        "Certification status must be VALID or EXPIRED",
    ),
    Rule::max_length(
        "vendorFeedback",
        250,
        "Vendor feedback must not exceed 250 characters",
    ),
];

impl Resource for Vendor {
    type Id = VendorId;

    fn id(&self) -> Option<Self::Id> {
        self.vendor_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "vendorId" => self.vendor_id.map(|id| id.0).into(),
            "vendorName" => self.vendor_name.as_str().into(),
            "vendorCode" => self.vendor_code.as_str().into(),
            "vendorCapacityTonnes" => self.vendor_capacity_tonnes.into(),
            "vendorType" => self.vendor_type.clone().into(),
            "assignedTasks" => self.assigned_tasks.as_str().into(),
            "vendorCertificationStatus" => self.vendor_certification_status.clone().into(),
            "vendorFeedback" => self.vendor_feedback.clone().into(),
            "contactPerson" => self.contact_person.clone().into(),
            "contactEmail" => self.contact_email.clone().into(),
            "contactPhone" => self.contact_phone.clone().into(),
            "address" => self.address.clone().into(),
            "city" => self.city.clone().into(),
            "state" => self.state.clone().into(),
            "zipCode" => self.zip_code.clone().into(),
            "country" => self.country.clone().into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    fn display_name(&self) -> String {
        self.vendor_name.clone()
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "vendors"
    }

    fn id_field() -> &'static str {
        "vendorId"
    }

    fn element_name() -> &'static str {
        "Vendor"
    }

    fn list_name() -> &'static str {
        "Vendors"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        &MANAGEMENT_RULES
    }

    fn default_sort_field() -> &'static str {
        "vendorName"
    }

    fn delete_policy() -> DeletePolicy {
        DeletePolicy::Hard
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }

    fn search_param() -> &'static str {
        "name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_form_selects_default_options() {
        let form = Vendor::blank_form();
        assert_eq!(form.get("vendorType"), "RECYCLING");
        assert_eq!(form.get("vendorCertificationStatus"), "VALID");
        assert_eq!(form.get("country"), "India");
    }

    #[test]
    fn test_management_rules() {
        let mut form = Vendor::blank_form();
        form.set("vendorName", "Green Cycle");
        form.set("vendorCode", "V".repeat(51));
        form.set("vendorCapacityTonnes", "0.5");
        form.set("assignedTasks", "Collection of PET");
        form.set("vendorType", "SHIPPING");

        let errors = Vendor::validate_form(Vendor::rules(), &form, None, &[]);
        assert_eq!(errors["vendorCode"], "Vendor code must not exceed 50 characters");
        assert_eq!(
            errors["vendorCapacityTonnes"],
            "Vendor capacity must be at least 1 tonne"
        );
        assert_eq!(errors["vendorType"], "Please select a valid vendor type");
        assert!(!errors.contains_key("contactEmail"));
    }

    #[test]
    fn test_payload_keeps_choice_values() {
        let mut form = Vendor::blank_form();
        form.set("vendorName", " Green Cycle ");
        form.set("vendorCode", "GC-01");
        form.set("vendorCapacityTonnes", "12.5");
        form.set("assignedTasks", "Collection");

        let payload = Vendor::to_payload(&form).unwrap();
        assert_eq!(payload["vendorName"], json!("Green Cycle"));
        assert_eq!(payload["vendorType"], json!("RECYCLING"));
        assert_eq!(payload["vendorCapacityTonnes"], json!(12.5));
        assert!(!payload.contains_key("contactEmail"));
        assert!(!payload.contains_key("isActive"));
    }
}
