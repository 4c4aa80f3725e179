use contracts::domain::common::{DeletePolicy, Resource};
use contracts::shared::metadata::{FieldDescriptor, FieldKind};
use leptos::prelude::*;
use thaw::*;

use super::binding::ListBinding;
use crate::shared::resource_list::controller::EditState;

/// Label, input and field error for one descriptor of the open draft
pub fn field_input<E>(binding: ListBinding<E>, field: &'static FieldDescriptor) -> AnyView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let value = move || {
        binding.read(|c| {
            c.form()
                .map(|form| form.values.get(field.name).to_string())
                .unwrap_or_default()
        })
    };
    let error = move || {
        binding.read(|c| {
            c.form()
                .and_then(|form| form.error(field.name).map(str::to_string))
        })
    };
    let set = move |raw: String| binding.act(|c| c.set_field(field.name, raw));

    let input = match field.kind {
        FieldKind::Choice(options) => view! {
            <select
                class="form__select"
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            >
                {options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Bool => view! {
            <input
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || value() == "true"
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        kind => {
            let (input_type, step) = match kind {
                FieldKind::Integer => ("number", "1"),
                FieldKind::Decimal => ("number", "any"),
                FieldKind::Date => ("date", ""),
                _ => ("text", ""),
            };
            view! {
                <input
                    type=input_type
                    step=step
                    class=move || if error().is_some() { "form__input form__input--error" } else { "form__input" }
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="form__group">
            <label class="form__label">{field.label}</label>
            {input}
            {move || error().map(|message| view! { <div class="form__error">{message}</div> })}
        </div>
    }
    .into_any()
}

/// Create/edit panel, shown while a draft is open
pub fn draft_panel<E>(binding: ListBinding<E>) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let title = move || {
        binding.read(|c| match c.edit_state() {
            EditState::Creating(_) => format!("New {}", E::element_name()),
            EditState::Editing { .. } => format!("Edit {}", E::element_name()),
            _ => String::new(),
        })
    };
    let submitting = Signal::derive(move || binding.read(|c| c.is_submitting()));
    let has_errors = move || binding.read(|c| c.form().is_some_and(|form| form.has_errors()));

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal__header">
                    <h2 class="modal__title">{title}</h2>
                </div>
                <div class="modal__body">
                    {move || has_errors().then(|| view! {
                        <div class="alert alert--error">"Please fix the highlighted fields"</div>
                    })}
                    {E::fields()
                        .iter()
                        .map(|field| field_input(binding, field))
                        .collect_view()}
                </div>
                <div class="modal__footer">
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| binding.spawn(|c| c.submit())
                            disabled=submitting
                        >
                            {move || if submitting.get() { "Saving..." } else { "Save" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| binding.run(|c| c.cancel_edit())
                        >
                            "Cancel"
                        </Button>
                    </Flex>
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog of the two-phase delete
pub fn delete_confirmation<E>(binding: ListBinding<E>, id: E::Id) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let name = binding.run(|c| c.get(&id).map(|entity| entity.display_name()).unwrap_or_default());
    let question = match E::delete_policy() {
        DeletePolicy::Hard => format!("Are you sure you want to delete \"{}\"?", name),
        DeletePolicy::Deactivate => format!(
            "Are you sure you want to mark \"{}\" as inactive? It can be restored later.",
            name
        ),
    };
    let submitting = Signal::derive(move || binding.read(|c| c.is_submitting()));

    view! {
        <div class="modal-overlay">
            <div class="modal modal--small">
                <div class="modal__body">
                    <p>{question}</p>
                </div>
                <div class="modal__footer">
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| binding.spawn(|c| c.confirm_delete())
                            disabled=submitting
                        >
                            "Delete"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| binding.act(|c| c.cancel_delete())
                        >
                            "Cancel"
                        </Button>
                    </Flex>
                </div>
            </div>
        </div>
    }
}
