use contracts::domain::common::Resource;
use contracts::shared::metadata::{FieldDescriptor, FieldValue};
use leptos::prelude::*;
use thaw::*;

use super::binding::ListBinding;
use super::form::{delete_confirmation, draft_panel};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};
use crate::shared::resource_list::controller::{EditState, LoadStatus, ResourceListController};
use crate::shared::resource_list::query::StatusFilter;

fn visible_fields<E: Resource>() -> impl Iterator<Item = &'static FieldDescriptor> {
    E::fields().iter().filter(|f| f.visible_in_list)
}

fn cell_text(value: FieldValue) -> String {
    match value {
        FieldValue::Bool(true) => "Yes".to_string(),
        FieldValue::Bool(false) => "No".to_string(),
        FieldValue::Missing => "-".to_string(),
        other => other.to_form_string(),
    }
}

/// Complete list screen of one collection: toolbar, table, draft and delete dialogs
pub fn resource_list_page<E>(controller: ResourceListController<E>) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let binding = ListBinding::new(controller);
    let restorable = E::delete_policy().allows_restore();
    binding.spawn(|c| c.load());

    let loading = Signal::derive(move || binding.read(|c| c.status() == LoadStatus::Loading));
    let search = Signal::derive(move || binding.read(|c| c.query().search));

    view! {
        <div class="page" data-page-id=format!("{}--list", E::aggregate_index())>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{E::list_name()}</h1>
                    <Badge>{move || binding.read(|c| c.view().len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| binding.act(|c| c.begin_create())
                    >
                        {icon("plus")}
                        {format!(" New {}", E::element_name())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| binding.spawn(|c| c.load())
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
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

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |text: String| {
                                binding.run(|c| c.set_search_text(text));
                                binding.spawn(|c| c.run_search());
                            })
                            placeholder=format!("Search {}...", E::list_name().to_lowercase())
                        />
                        {restorable.then(|| status_filter(binding))}
                    </Flex>
                    {restorable.then(|| view! {
                        <div class="summary">
                            {move || {
                                let (active, inactive) = binding.read(|c| c.active_counts());
                                format!("Active: {} | Inactive: {}", active, inactive)
                            }}
                        </div>
                    })}
                </div>

                {move || loading.get().then(|| view! { <Spinner /> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {visible_fields::<E>()
                                    .map(|field| sortable_header(binding, field))
                                    .collect_view()}
                                {restorable.then(|| view! { <TableHeaderCell>"Status"</TableHeaderCell> })}
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = binding.read(|c| c.view());
                                let search = binding.read(|c| c.query().search);
                                rows.into_iter()
                                    .map(|row| table_row(binding, row, &search))
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>

            {move || match binding.read(|c| c.edit_state()) {
                EditState::Creating(_) | EditState::Editing { .. } => draft_panel(binding).into_any(),
                EditState::ConfirmingDelete(id) => delete_confirmation(binding, id).into_any(),
                EditState::None => view! { <></> }.into_any(),
            }}
        </div>
    }
}

fn status_filter<E>(binding: ListBinding<E>) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    view! {
        <select
            class="form__select"
            prop:value=move || binding.read(|c| c.query().filter.as_str())
            on:change=move |ev| {
                if let Some(filter) = StatusFilter::from_str(&event_target_value(&ev)) {
                    binding.run(|c| c.set_filter(filter));
                }
            }
        >
            {[StatusFilter::Active, StatusFilter::Inactive, StatusFilter::All]
                .into_iter()
                .map(|filter| view! { <option value=filter.as_str()>{filter.label()}</option> })
                .collect_view()}
        </select>
    }
}

fn sortable_header<E>(binding: ListBinding<E>, field: &'static FieldDescriptor) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| binding.run(|c| c.toggle_sort(field.name))
            >
                {field.label}
                <span>
                    {move || {
                        let sort = binding.read(|c| c.query().sort);
                        get_sort_indicator(&sort.field, field.name, sort.direction.is_ascending())
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}

fn table_row<E>(binding: ListBinding<E>, row: E, search: &str) -> impl IntoView
where
    E: Resource + Send + Sync,
    E::Id: Send + Sync,
{
    let restorable = E::delete_policy().allows_restore();
    let inactive = row.is_active() == Some(false);
    let cells = visible_fields::<E>()
        .map(|field| {
            let content = match row.field_value(field.name) {
                FieldValue::Text(text) if field.searchable => highlight_matches(&text, search),
                value => view! { <span>{cell_text(value)}</span> }.into_any(),
            };
            view! {
                <TableCell>
                    <TableCellLayout truncate=true>{content}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    let actions = match row.id() {
        Some(id) if restorable && inactive => view! {
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| binding.spawn(|c| c.restore(&id))
            >
                {icon("restore")}
                " Restore"
            </Button>
        }
        .into_any(),
        Some(id) => view! {
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| binding.act(|c| c.begin_edit(&id))
                >
                    {icon("edit")}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| binding.act(|c| c.request_delete(&id))
                >
                    {icon("trash")}
                </Button>
            </Flex>
        }
        .into_any(),
        None => view! { <></> }.into_any(),
    };

    view! {
        <TableRow>
            {cells}
            {restorable.then(|| view! {
                <TableCell>
                    <TableCellLayout>
                        {if inactive {
                            view! { <span class="badge badge--warning">"Inactive"</span> }
                        } else {
                            view! { <span class="badge badge--success">"Active"</span> }
                        }}
                    </TableCellLayout>
                </TableCell>
            })}
            <TableCell>
                <TableCellLayout>{actions}</TableCellLayout>
            </TableCell>
        </TableRow>
    }
}
