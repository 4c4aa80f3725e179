use contracts::domain::a008_vendor::aggregate::Vendor;
use contracts::domain::a008_vendor::onboarding::{ONBOARDING_RULES, ONBOARDING_STEPS};
use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::resource_list::http_client::HttpResourceClient;
use crate::shared::resource_list::ui::step_gated_page;
use crate::shared::resource_list::{ResourceListController, StepGatedController};
use crate::system::auth::session::Session;

/// Four-step vendor registration, validated against the full onboarding rules on submit
#[component]
#[allow(non_snake_case)]
pub fn VendorOnboarding(session: Session) -> impl IntoView {
    let client = Rc::new(HttpResourceClient::<Vendor>::new(session));
    let list = ResourceListController::with_rules(client, &ONBOARDING_RULES);
    step_gated_page("Vendor Onboarding", StepGatedController::new(list, ONBOARDING_STEPS))
}
