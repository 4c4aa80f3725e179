//! Multi-step creation on top of [`ResourceListController`]
//!
//! Steps only gate navigation. The final submit goes through the list
//! controller and validates the whole draft with its rule set.

use contracts::domain::common::Resource;
use contracts::shared::form::FormStep;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use super::controller::ResourceListController;
use super::error::ResourceError;

pub struct StepGatedController<E: Resource> {
    list: ResourceListController<E>,
    steps: &'static [FormStep],
    current: Rc<Cell<usize>>,
}

impl<E: Resource> Clone for StepGatedController<E> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            steps: self.steps,
            current: self.current.clone(),
        }
    }
}

impl<E: Resource> StepGatedController<E> {
    pub fn new(list: ResourceListController<E>, steps: &'static [FormStep]) -> Self {
        Self {
            list,
            steps,
            current: Rc::new(Cell::new(0)),
        }
    }

    /// Underlying list controller (draft, errors, notice)
    pub fn list(&self) -> &ResourceListController<E> {
        &self.list
    }

    pub fn steps(&self) -> &'static [FormStep] {
        self.steps
    }

    /// Index of the active step
    pub fn current_step(&self) -> usize {
        self.current.get()
    }

    pub fn is_last_step(&self) -> bool {
        self.current.get() + 1 >= self.steps.len()
    }

    fn move_to(&self, step: usize) {
        self.current.set(step);
        self.list.notify();
    }

    /// Open a fresh draft at the first step
    pub fn begin(&self) -> Result<(), ResourceError> {
        self.list.begin_create()?;
        self.move_to(0);
        Ok(())
    }

    fn step_satisfied(&self, index: usize) -> bool {
        match (self.list.form(), self.steps.get(index)) {
            (Some(form), Some(step)) => (step.is_satisfied)(&form.values),
            _ => false,
        }
    }

    /// Whether the active step's own requirements are met
    pub fn is_step_valid(&self) -> bool {
        self.step_satisfied(self.current.get())
    }

    pub fn next(&self) -> Result<(), ResourceError> {
        if self.list.form().is_none() {
            return Err(ResourceError::NoDraft);
        }
        if !self.is_step_valid() {
            return Err(ResourceError::StepIncomplete);
        }
        if !self.is_last_step() {
            self.move_to(self.current.get() + 1);
        }
        Ok(())
    }

    pub fn back(&self) {
        let current = self.current.get();
        if current > 0 {
            self.move_to(current - 1);
        }
    }

    /// Jump to `step`: backwards always, forwards only past satisfied steps
    pub fn go_to(&self, step: usize) -> Result<(), ResourceError> {
        if step >= self.steps.len() {
            return Err(ResourceError::StepIncomplete);
        }
        if step > self.current.get() && !(0..step).all(|i| self.step_satisfied(i)) {
            return Err(ResourceError::StepIncomplete);
        }
        self.move_to(step);
        Ok(())
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), ResourceError> {
        self.list.set_field(name, value)
    }

    /// Submit from the last step.
    ///
    /// Runs the full rule set whatever the step predicates say. When fields
    /// fail, the first step owning one of them becomes active.
    pub fn submit(&self) -> impl Future<Output = Result<(), ResourceError>> + 'static {
        let pending = if self.is_last_step() {
            let submit = self.list.submit();
            if let Some(step) = self.first_failing_step() {
                self.move_to(step);
            }
            Ok(submit)
        } else {
            Err(ResourceError::NotAtFinalStep)
        };

        let current = self.current.clone();
        async move {
            pending?.await?;
            current.set(0);
            Ok(())
        }
    }

    fn first_failing_step(&self) -> Option<usize> {
        let form = self.list.form()?;
        self.steps
            .iter()
            .position(|step| form.errors.keys().any(|field| step.owns(field)))
    }

    /// Discard the draft and return to the first step
    pub fn cancel(&self) {
        self.list.cancel_edit();
        self.move_to(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::resource_list::controller::EditState;
    use crate::shared::resource_list::testing::{MockClient, Op};
    use contracts::domain::a008_vendor::aggregate::Vendor;
    use contracts::domain::a008_vendor::onboarding::{ONBOARDING_RULES, ONBOARDING_STEPS};
    use futures::executor::block_on;

    fn wizard() -> (StepGatedController<Vendor>, MockClient<Vendor>) {
        let client = MockClient::new(vec![]);
        let list = ResourceListController::with_rules(Rc::new(client.clone()), &ONBOARDING_RULES);
        let wizard = StepGatedController::new(list, ONBOARDING_STEPS);
        wizard.begin().unwrap();
        (wizard, client)
    }

    fn fill(wizard: &StepGatedController<Vendor>, values: &[(&str, &str)]) {
        for (field, value) in values {
            wizard.set_field(field, *value).unwrap();
        }
    }

    const BASIC: &[(&str, &str)] = &[
        ("vendorName", "Green Cycle"),
        ("vendorCode", "GC-01"),
        ("vendorCapacityTonnes", "12"),
    ];

    #[test]
    fn test_first_step_gates_next() {
        let (wizard, _) = wizard();
        fill(&wizard, &[("vendorName", "Green Cycle"), ("vendorCapacityTonnes", "12")]);

        assert!(!wizard.is_step_valid());
        assert_eq!(wizard.next(), Err(ResourceError::StepIncomplete));
        assert_eq!(wizard.current_step(), 0);

        wizard.set_field("vendorCode", "GC-01").unwrap();
        assert!(wizard.is_step_valid());
        wizard.next().unwrap();
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_navigation() {
        let (wizard, _) = wizard();
        assert_eq!(wizard.go_to(2), Err(ResourceError::StepIncomplete));
        assert_eq!(wizard.go_to(9), Err(ResourceError::StepIncomplete));

        fill(&wizard, BASIC);
        fill(&wizard, &[("contactPerson", "Asha"), ("contactEmail", "asha@gc.in")]);
        wizard.go_to(2).unwrap();
        assert_eq!(wizard.current_step(), 2);

        wizard.back();
        assert_eq!(wizard.current_step(), 1);
        wizard.go_to(0).unwrap();
        wizard.back();
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn test_submit_only_from_last_step() {
        let (wizard, client) = wizard();
        fill(&wizard, BASIC);

        assert_eq!(block_on(wizard.submit()), Err(ResourceError::NotAtFinalStep));
        assert_eq!(client.count(Op::Create), 0);
    }

    #[test]
    fn test_failed_submit_jumps_to_first_failing_step() {
        let (wizard, client) = wizard();
        fill(&wizard, BASIC);
        fill(&wizard, &[("contactPerson", "Asha"), ("contactEmail", "not-an-email")]);
        fill(&wizard, &[("address", "12 MG Road"), ("city", "Pune"), ("state", "MH")]);
        fill(&wizard, &[("assignedTasks", "Collection")]);
        wizard.go_to(3).unwrap();

        let result = block_on(wizard.submit());

        let Err(ResourceError::Validation(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["contactEmail"]);
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(client.count(Op::Create), 0);
    }

    #[test]
    fn test_submit_away_from_last_step_keeps_the_step() {
        let (wizard, client) = wizard();
        fill(&wizard, BASIC);
        fill(&wizard, &[("contactPerson", "Asha"), ("contactEmail", "asha@gc.in")]);
        fill(&wizard, &[("address", "12 MG Road"), ("city", "Pune"), ("state", "MH")]);
        wizard.go_to(3).unwrap();
        assert!(block_on(wizard.submit()).is_err());
        assert_eq!(wizard.current_step(), 3);

        wizard.back();
        wizard.back();
        wizard.set_field("contactPerson", "").unwrap();
        assert!(!wizard.is_step_valid());

        assert_eq!(block_on(wizard.submit()), Err(ResourceError::NotAtFinalStep));
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(client.count(Op::Create), 0);
    }

    #[test]
    fn test_full_rules_run_despite_relaxed_steps() {
        let (wizard, _) = wizard();
        fill(&wizard, &[("vendorName", "Green Cycle"), ("vendorCode", "GC-01")]);
        fill(&wizard, &[("vendorCapacityTonnes", "0.5")]);
        assert!(wizard.is_step_valid());
        fill(&wizard, &[("contactPerson", "Asha"), ("contactEmail", "asha@gc.in")]);
        fill(&wizard, &[("address", "12 MG Road"), ("city", "Pune"), ("state", "MH")]);
        fill(&wizard, &[("assignedTasks", "Collection")]);
        wizard.go_to(3).unwrap();

        assert!(block_on(wizard.submit()).is_err());
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn test_successful_submit_creates_and_resets() {
        let (wizard, client) = wizard();
        fill(&wizard, BASIC);
        fill(&wizard, &[("contactPerson", "Asha"), ("contactEmail", "asha@gc.in")]);
        fill(&wizard, &[("address", "12 MG Road"), ("city", "Pune"), ("state", "MH")]);
        fill(&wizard, &[("assignedTasks", "Collection")]);
        wizard.go_to(3).unwrap();

        block_on(wizard.submit()).unwrap();

        assert_eq!(client.count(Op::Create), 1);
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.list().edit_state(), EditState::None);
        assert_eq!(
            wizard.list().notice().as_deref(),
            Some("Vendor created successfully")
        );
        let created = &client.rows()[0];
        assert_eq!(created.country.as_deref(), Some("India"));
        assert_eq!(created.contact_email.as_deref(), Some("asha@gc.in"));
    }

    #[test]
    fn test_cancel_discards_the_draft() {
        let (wizard, _) = wizard();
        fill(&wizard, BASIC);
        wizard.next().unwrap();

        wizard.cancel();

        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.list().form().is_none());
        assert_eq!(wizard.next(), Err(ResourceError::NoDraft));
    }
}
