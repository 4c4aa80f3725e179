//! Four-step vendor onboarding
//!
//! Each step only gates navigation with a relaxed check; the full rule set
//! runs once on the final submit.

use super::aggregate::MANAGEMENT_RULES;
use crate::shared::form::{FormStep, FormValues};
use crate::shared::metadata::Rule;

const CONTACT_RULES: [Rule; 6] = [
    Rule::required("contactPerson", "Contact person is required"),
    Rule::required("contactEmail", "Contact email is required"),
    Rule::email("contactEmail", "Please enter a valid email address"),
    Rule::required("address", "Address is required"),
    Rule::required("city", "City is required"),
    Rule::required("state", "State is required"),
];

/// Management rules plus contact and address requirements
pub const ONBOARDING_RULES: [Rule; 16] = concat(MANAGEMENT_RULES, CONTACT_RULES);

const fn concat<const A: usize, const B: usize, const N: usize>(
    head: [Rule; A],
    tail: [Rule; B],
) -> [Rule; N] {
    assert!(A > 0 && A + B == N);
    let mut out = [head[0]; N];
    let mut i = 0;
    while i < A {
        out[i] = head[i];
        i += 1;
    }
    while i < N {
        out[i] = tail[i - A];
        i += 1;
    }
    out
}

fn basic_done(values: &FormValues) -> bool {
    !values.is_blank("vendorName")
        && !values.is_blank("vendorCode")
        && values.number("vendorCapacityTonnes").is_some_and(|t| t > 0.0)
}

fn contact_done(values: &FormValues) -> bool {
    !values.is_blank("contactPerson") && !values.is_blank("contactEmail")
}

fn address_done(values: &FormValues) -> bool {
    !values.is_blank("address") && !values.is_blank("city") && !values.is_blank("state")
}

fn business_done(values: &FormValues) -> bool {
    !values.is_blank("assignedTasks")
}

pub const ONBOARDING_STEPS: &[FormStep] = &[
    FormStep {
        title: "Basic Information",
        fields: &["vendorName", "vendorCode", "vendorCapacityTonnes", "vendorType"],
        is_satisfied: basic_done,
    },
    FormStep {
        title: "Contact Details",
        fields: &["contactPerson", "contactEmail", "contactPhone"],
        is_satisfied: contact_done,
    },
    FormStep {
        title: "Address Information",
        fields: &["address", "city", "state", "zipCode", "country"],
        is_satisfied: address_done,
    },
    FormStep {
        title: "Business Details",
        fields: &[
            "assignedTasks",
            "vendorCertificationStatus",
            "vendorFeedback",
        ],
        is_satisfied: business_done,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a008_vendor::aggregate::Vendor;
    use crate::domain::common::Resource;
    use crate::shared::metadata::validate;

    #[test]
    fn test_every_field_belongs_to_exactly_one_step() {
        for field in Vendor::fields() {
            let owners = ONBOARDING_STEPS.iter().filter(|s| s.owns(field.name)).count();
            assert_eq!(owners, 1, "{}", field.name);
        }
    }

    #[test]
    fn test_onboarding_rules_extend_management_rules() {
        assert_eq!(&ONBOARDING_RULES[..MANAGEMENT_RULES.len()], &MANAGEMENT_RULES[..]);

        let mut values = Vendor::blank_form();
        values.set("vendorName", "Green Cycle");
        values.set("vendorCode", "GC");
        values.set("vendorCapacityTonnes", "10");
        values.set("assignedTasks", "Collection");
        values.set("contactPerson", "Asha");
        values.set("contactEmail", "asha@greencycle");
        let errors = validate(&ONBOARDING_RULES, &values);
        assert_eq!(errors["contactEmail"], "Please enter a valid email address");
        assert_eq!(errors["address"], "Address is required");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_basic_step_needs_positive_capacity() {
        let mut values = Vendor::blank_form();
        values.set("vendorName", "Green Cycle");
        values.set("vendorCode", "GC");
        assert!(!(ONBOARDING_STEPS[0].is_satisfied)(&values));
        values.set("vendorCapacityTonnes", "0");
        assert!(!(ONBOARDING_STEPS[0].is_satisfied)(&values));
        values.set("vendorCapacityTonnes", "0.5");
        assert!((ONBOARDING_STEPS[0].is_satisfied)(&values));
    }
}
