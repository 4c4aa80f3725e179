use contracts::domain::common::Resource;
use leptos::prelude::*;
use thaw::*;

use super::binding::{spawn_task, ListBinding};
use super::form::field_input;
use crate::shared::icons::icon;
use crate::shared::resource_list::step_gated::StepGatedController;

/// Step-by-step creation screen
pub fn step_gated_page<E>(title: &'static str, wizard: StepGatedController<E>) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let binding = ListBinding::new(wizard.list().clone());
    let wizard = StoredValue::new_local(wizard);
    let steps = wizard.with_value(|w| w.steps());

    let start = move || {
        if let Err(e) = wizard.with_value(|w| w.begin()) {
            log::warn!("{}: {}", title, e);
        }
    };
    start();

    let current = move || binding.read(|_| wizard.with_value(|w| w.current_step()));
    let has_draft = move || binding.read(|c| c.form().is_some());
    let step_valid = Signal::derive(move || binding.read(|_| wizard.with_value(|w| w.is_step_valid())));
    let submitting = Signal::derive(move || binding.read(|c| c.is_submitting()));
    let has_errors = move || binding.read(|c| c.form().is_some_and(|form| form.has_errors()));

    let step_nav = move || {
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let class = move || {
                    let current = current();
                    if index == current {
                        "wizard__step wizard__step--active"
                    } else if index < current {
                        "wizard__step wizard__step--done"
                    } else {
                        "wizard__step"
                    }
                };
                view! {
                    <div
                        class=class
                        on:click=move |_| {
                            if let Err(e) = wizard.with_value(|w| w.go_to(index)) {
                                log::debug!("{}: {}", title, e);
                            }
                        }
                    >
                        <span class="wizard__step-number">{index + 1}</span>
                        <span class="wizard__step-title">{step.title}</span>
                    </div>
                }
            })
            .collect_view()
    };

    let form = move || {
        let step = steps[current().min(steps.len().saturating_sub(1))];
        step.fields
            .iter()
            .filter_map(|name| E::field(name))
            .map(|field| field_input(binding, field))
            .collect_view()
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                </div>
            </div>

            <div class="page__content">
                {move || binding.read(|c| c.notice()).map(|notice| view! {
                    <div class="alert alert--success">
                        <span>{notice}</span>
                        <button class="alert__close" on:click=move |_| binding.run(|c| c.dismiss_notice())>
                            {icon("x")}
                        </button>
                    </div>
                })}
                {move || binding.read(|c| c.error()).map(|error| view! {
                    <div class="alert alert--error">
                        <span>{error.to_string()}</span>
                        <button class="alert__close" on:click=move |_| binding.run(|c| c.dismiss_error())>
                            {icon("x")}
                        </button>
                    </div>
                })}

                {move || if has_draft() {
                    view! {
                        <div class="wizard">
                            <div class="wizard__steps">{step_nav}</div>
                            {move || has_errors().then(|| view! {
                                <div class="alert alert--error">"Please fix the highlighted fields"</div>
                            })}
                            <div class="wizard__body">{form}</div>
                            <div class="wizard__footer">
                                <Flex gap=FlexGap::Small>
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| wizard.with_value(|w| w.cancel())
                                    >
                                        "Cancel"
                                    </Button>
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| wizard.with_value(|w| w.back())
                                        disabled=Signal::derive(move || current() == 0)
                                    >
                                        "Back"
                                    </Button>
                                    {move || if current() + 1 >= steps.len() {
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| spawn_task(wizard.with_value(|w| w.submit()))
                                                disabled=submitting
                                            >
                                                {move || if submitting.get() { "Submitting..." } else { "Submit" }}
                                            </Button>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| {
                                                    if let Err(e) = wizard.with_value(|w| w.next()) {
                                                        log::debug!("{}: {}", title, e);
                                                    }
                                                }
                                                disabled=Signal::derive(move || !step_valid.get())
                                            >
                                                "Next"
                                            </Button>
                                        }.into_any()
                                    }}
                                </Flex>
                            </div>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| start()>
                            {icon("plus")}
                            " Start"
                        </Button>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
