//! Resource-list controller
//!
//! One instance owns the snapshot of a remote collection, the local
//! search/filter/sort criteria and the create/edit/delete lifecycle of a
//! list screen. The handle is cheap to clone; every clone drives the same
//! state.
//!
//! Intents run their synchronous part immediately. Intents that talk to the
//! backend return a future that must be polled (the bindings spawn it); the
//! future keeps only a weak reference, so a screen that was closed simply
//! drops late results.

use contracts::domain::common::{DeletePolicy, Payload, Resource, ResourceId, ACTIVE_FLAG};
use contracts::shared::form::FormState;
use contracts::shared::metadata::Rule;
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use super::client::ResourceClient;
use super::error::ResourceError;
use super::query::{active_counts, derive_view, ListQuery, SortDirection, SortSpec, StatusFilter};

/// Outcome of a collection read, shared by every caller that joined it
pub type LoadFuture = Shared<LocalBoxFuture<'static, Result<(), ResourceError>>>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState<Id> {
    #[default]
    None,
    Creating(FormState),
    Editing { id: Id, form: FormState },
    ConfirmingDelete(Id),
}

impl<Id> EditState<Id> {
    pub fn form(&self) -> Option<&FormState> {
        match self {
            Self::Creating(form) | Self::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Self::Creating(form) | Self::Editing { form, .. } => Some(form),
            _ => None,
        }
    }
}

/// Handle returned by [`ResourceListController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

enum Write<Id> {
    Create,
    Update(Id),
    Delete(Id),
    Restore(Id),
}

struct State<E: Resource> {
    snapshot: Vec<E>,
    status: LoadStatus,
    query: ListQuery,
    edit: EditState<E::Id>,
    error: Option<ResourceError>,
    notice: Option<String>,
    pending_load: Option<LoadFuture>,
    /// Bumped by every read; only the newest read may replace the snapshot
    generation: u64,
    writing: bool,
    disposed: bool,
}

struct Inner<E: Resource> {
    client: Rc<dyn ResourceClient<E>>,
    rules: &'static [Rule],
    state: RefCell<State<E>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
    next_listener: Cell<usize>,
}

impl<E: Resource> Inner<E> {
    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

pub struct ResourceListController<E: Resource> {
    inner: Rc<Inner<E>>,
}

impl<E: Resource> Clone for ResourceListController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Resource> ResourceListController<E> {
    /// Controller validating with the collection's own rule set
    pub fn new(client: Rc<dyn ResourceClient<E>>) -> Self {
        Self::with_rules(client, E::rules())
    }

    /// Controller validating with a different rule set (e.g. a stricter wizard)
    pub fn with_rules(client: Rc<dyn ResourceClient<E>>, rules: &'static [Rule]) -> Self {
        Self {
            inner: Rc::new(Inner {
                client,
                rules,
                state: RefCell::new(State {
                    snapshot: Vec::new(),
                    status: LoadStatus::Idle,
                    query: ListQuery::for_resource::<E>(),
                    edit: EditState::None,
                    error: None,
                    notice: None,
                    pending_load: None,
                    generation: 0,
                    writing: false,
                    disposed: false,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner<E>>) -> Result<Self, ResourceError> {
        weak.upgrade()
            .map(|inner| Self { inner })
            .ok_or(ResourceError::Disposed)
    }

    /// Apply `f` to the state, then notify listeners
    fn update<T>(&self, f: impl FnOnce(&mut State<E>) -> T) -> T {
        let mut state = self.inner.state.borrow_mut();
        let result = f(&mut *state);
        drop(state);
        self.inner.notify();
        result
    }

    pub(crate) fn notify(&self) {
        self.inner.notify();
    }

    // ============================================================================
    // Reading
    // ============================================================================

    /// Fetch the whole collection.
    ///
    /// A call while a read is outstanding joins that read instead of issuing
    /// another request.
    pub fn load(&self) -> LoadFuture {
        {
            let state = self.inner.state.borrow();
            if state.disposed {
                return disposed_load();
            }
            if let Some(pending) = &state.pending_load {
                return pending.clone();
            }
        }
        self.reload()
    }

    /// Fetch the whole collection with a new request.
    ///
    /// An outstanding read is superseded: its result is dropped and its
    /// callers get the outcome of this one.
    pub fn reload(&self) -> LoadFuture {
        let client = self.inner.client.clone();
        self.fetch(async move { client.list().await }.boxed_local())
    }

    /// Ask the backend for the records matching the current search text.
    ///
    /// Collections without a search endpoint keep filtering the loaded
    /// records locally and send nothing. Blank text brings back the whole
    /// collection.
    pub fn run_search(&self) -> LoadFuture {
        let text = {
            let state = self.inner.state.borrow();
            if state.disposed {
                return disposed_load();
            }
            state.query.search.trim().to_string()
        };
        if E::search_path().is_none() {
            return future::ready(Ok(())).boxed_local().shared();
        }
        if text.is_empty() {
            return self.reload();
        }
        let client = self.inner.client.clone();
        self.fetch(async move { client.search(&text).await }.boxed_local())
    }

    fn fetch(&self, request: LocalBoxFuture<'static, Result<Vec<E>, ResourceError>>) -> LoadFuture {
        let mut state = self.inner.state.borrow_mut();
        if state.disposed {
            return disposed_load();
        }
        state.generation += 1;
        let generation = state.generation;

        let weak = Rc::downgrade(&self.inner);
        let read = async move {
            let result = request.await;
            let newer = Self::from_weak(&weak)?.finish_load(generation, result)?;
            match newer {
                Some(newer) => newer.await,
                None => Ok(()),
            }
        }
        .boxed_local()
        .shared();

        state.status = LoadStatus::Loading;
        state.pending_load = Some(read.clone());
        drop(state);
        self.inner.notify();
        read
    }

    /// Store the result of read number `generation`.
    ///
    /// Returns the read that superseded it, if that one is still running.
    fn finish_load(
        &self,
        generation: u64,
        result: Result<Vec<E>, ResourceError>,
    ) -> Result<Option<LoadFuture>, ResourceError> {
        self.update(|state| {
            if state.disposed {
                return Err(ResourceError::Disposed);
            }
            if state.generation != generation {
                log::debug!("{}: dropping superseded read", E::list_name());
                return Ok(state.pending_load.clone());
            }
            state.pending_load = None;
            match result {
                Ok(items) => {
                    log::debug!("{}: loaded {} records", E::list_name(), items.len());
                    state.snapshot = items;
                    state.status = LoadStatus::Ready;
                    Ok(None)
                }
                Err(e) => {
                    log::warn!("{}: load failed: {}", E::list_name(), e);
                    state.status = LoadStatus::Error(e.to_string());
                    state.error = Some(e.clone());
                    Err(e)
                }
            }
        })
    }

    // ============================================================================
    // Local criteria
    // ============================================================================

    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.query.search = text);
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.update(|state| state.query.filter = filter);
    }

    pub fn set_sort(&self, field: impl Into<String>, direction: SortDirection) {
        let field = field.into();
        self.update(|state| state.query.sort = SortSpec { field, direction });
    }

    /// Header click: flip the direction of the active field, else sort ascending by `field`
    pub fn toggle_sort(&self, field: &str) {
        self.update(|state| {
            let sort = &mut state.query.sort;
            if sort.field == field {
                sort.direction = sort.direction.toggled();
            } else {
                *sort = SortSpec::ascending(field);
            }
        });
    }

    // ============================================================================
    // Drafts
    // ============================================================================

    fn start_draft(
        &self,
        f: impl FnOnce(&State<E>) -> Result<EditState<E::Id>, ResourceError>,
    ) -> Result<(), ResourceError> {
        self.update(|state| {
            if state.disposed {
                return Err(ResourceError::Disposed);
            }
            if state.writing {
                return Err(ResourceError::Busy);
            }
            state.edit = f(state)?;
            Ok(())
        })
    }

    pub fn begin_create(&self) -> Result<(), ResourceError> {
        self.start_draft(|_| Ok(EditState::Creating(FormState::new(E::blank_form()))))
    }

    pub fn begin_edit(&self, id: &E::Id) -> Result<(), ResourceError> {
        self.start_draft(|state| {
            let entity = find(&state.snapshot, id)?;
            Ok(EditState::Editing {
                id: *id,
                form: FormState::new(entity.to_form()),
            })
        })
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), ResourceError> {
        let field = E::field(name).ok_or_else(|| ResourceError::UnknownField(name.to_string()))?;
        let value = value.into();
        self.update(|state| {
            let form = state.edit.form_mut().ok_or(ResourceError::NoDraft)?;
            form.set_field(field.name, value);
            Ok(())
        })
    }

    /// Drop any draft or pending delete confirmation
    pub fn cancel_edit(&self) {
        self.update(|state| state.edit = EditState::None);
    }

    // ============================================================================
    // Writes
    // ============================================================================

    /// Validate the draft and send it.
    ///
    /// Field errors are stored on the draft and returned without a request.
    /// On success the draft is closed and the collection reloaded; on failure
    /// the draft stays open and the error is shown.
    pub fn submit(&self) -> impl Future<Output = Result<(), ResourceError>> + 'static {
        let prepared = self.update(|state| prepare_submit(state, self.inner.rules));
        self.write(prepared)
    }

    pub fn request_delete(&self, id: &E::Id) -> Result<(), ResourceError> {
        self.start_draft(|state| {
            find(&state.snapshot, id)?;
            Ok(EditState::ConfirmingDelete(*id))
        })
    }

    pub fn cancel_delete(&self) -> Result<(), ResourceError> {
        self.update(|state| match state.edit {
            EditState::ConfirmingDelete(_) => {
                state.edit = EditState::None;
                Ok(())
            }
            _ => Err(ResourceError::NoPendingDelete),
        })
    }

    /// Delete the record awaiting confirmation; a failure keeps the confirmation open
    pub fn confirm_delete(&self) -> impl Future<Output = Result<(), ResourceError>> + 'static {
        let prepared = self.update(|state| {
            guard_write(state)?;
            let EditState::ConfirmingDelete(id) = state.edit else {
                return Err(ResourceError::NoPendingDelete);
            };
            state.writing = true;
            Ok((Write::Delete(id), Payload::new()))
        });
        self.write(prepared)
    }

    /// Reactivate a soft-deleted record
    pub fn restore(&self, id: &E::Id) -> impl Future<Output = Result<(), ResourceError>> + 'static {
        let prepared = self.update(|state| {
            guard_write(state)?;
            if !E::delete_policy().allows_restore() {
                return Err(ResourceError::RestoreUnavailable);
            }
            let entity = find(&state.snapshot, id)?;
            if entity.is_active() != Some(false) {
                return Err(ResourceError::RestoreUnavailable);
            }
            let mut payload = entity.to_full_payload();
            payload.remove(E::id_field());
            payload.insert(ACTIVE_FLAG.to_string(), Value::Bool(true));
            state.writing = true;
            Ok((Write::Restore(*id), payload))
        });
        self.write(prepared)
    }

    fn write(
        &self,
        prepared: Result<(Write<E::Id>, Payload), ResourceError>,
    ) -> impl Future<Output = Result<(), ResourceError>> + 'static {
        let client = self.inner.client.clone();
        let weak = Rc::downgrade(&self.inner);
        async move {
            let (write, payload) = prepared?;
            let result = match &write {
                Write::Create => client.create(&payload).await.map(drop),
                Write::Update(id) | Write::Restore(id) => client.update(id, &payload).await.map(drop),
                Write::Delete(id) => client.delete(id).await,
            };
            let reload = Self::from_weak(&weak)?.finish_write(&write, result)?;
            // A failed reload is reported through the list status, the write itself went through.
            let _ = reload.await;
            Ok(())
        }
    }

    fn finish_write(
        &self,
        write: &Write<E::Id>,
        result: Result<(), ResourceError>,
    ) -> Result<LoadFuture, ResourceError> {
        self.update(|state| {
            if state.disposed {
                return Err(ResourceError::Disposed);
            }
            state.writing = false;
            match result {
                Ok(()) => {
                    let notice = success_notice::<E>(write);
                    log::debug!("{}", notice);
                    state.notice = Some(notice);
                    state.error = None;
                    if !matches!(write, Write::Restore(_)) {
                        state.edit = EditState::None;
                    }
                    Ok(())
                }
                Err(e) => {
                    log::warn!("{}: write failed: {}", E::list_name(), e);
                    state.error = Some(e.clone());
                    Err(e)
                }
            }
        })?;
        Ok(self.reload())
    }

    // ============================================================================
    // Messages, notifications, teardown
    // ============================================================================

    pub fn dismiss_error(&self) {
        self.update(|state| state.error = None);
    }

    pub fn dismiss_notice(&self) {
        self.update(|state| state.notice = None);
    }

    /// Call `listener` after every state change
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener, _)| *listener != id);
    }

    /// Mark the screen closed: outstanding results are dropped, listeners removed
    pub fn dispose(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.disposed = true;
        state.pending_load = None;
        drop(state);
        self.inner.listeners.borrow_mut().clear();
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn snapshot(&self) -> Vec<E> {
        self.inner.state.borrow().snapshot.clone()
    }

    /// Filtered, searched and sorted records for display
    pub fn view(&self) -> Vec<E> {
        let state = self.inner.state.borrow();
        derive_view(&state.snapshot, &state.query)
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.state.borrow().status.clone()
    }

    pub fn edit_state(&self) -> EditState<E::Id> {
        self.inner.state.borrow().edit.clone()
    }

    pub fn form(&self) -> Option<FormState> {
        self.inner.state.borrow().edit.form().cloned()
    }

    pub fn error(&self) -> Option<ResourceError> {
        self.inner.state.borrow().error.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.inner.state.borrow().notice.clone()
    }

    pub fn query(&self) -> ListQuery {
        self.inner.state.borrow().query.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.state.borrow().writing
    }

    pub fn active_counts(&self) -> (usize, usize) {
        active_counts(&self.inner.state.borrow().snapshot)
    }

    /// Record of the snapshot by id
    pub fn get(&self, id: &E::Id) -> Option<E> {
        find(&self.inner.state.borrow().snapshot, id).ok().cloned()
    }
}

fn disposed_load() -> LoadFuture {
    future::ready(Err(ResourceError::Disposed)).boxed_local().shared()
}

fn find<'a, E: Resource>(snapshot: &'a [E], id: &E::Id) -> Result<&'a E, ResourceError> {
    snapshot
        .iter()
        .find(|entity| entity.id().as_ref() == Some(id))
        .ok_or(ResourceError::NotFound)
}

fn guard_write<E: Resource>(state: &State<E>) -> Result<(), ResourceError> {
    if state.disposed {
        Err(ResourceError::Disposed)
    } else if state.writing {
        Err(ResourceError::Busy)
    } else {
        Ok(())
    }
}

fn prepare_submit<E: Resource>(
    state: &mut State<E>,
    rules: &[Rule],
) -> Result<(Write<E::Id>, Payload), ResourceError> {
    guard_write(state)?;
    let State { snapshot, edit, .. } = &mut *state;
    let snapshot = &*snapshot;
    let (write, form) = match edit {
        EditState::Creating(form) => (Write::Create, form),
        EditState::Editing { id, form } => (Write::Update(*id), form),
        _ => return Err(ResourceError::NoDraft),
    };
    let editing = match &write {
        Write::Update(id) => Some(id),
        _ => None,
    };

    let errors = E::validate_form(rules, &form.values, editing, snapshot);
    if !errors.is_empty() {
        form.errors = errors.clone();
        return Err(ResourceError::Validation(errors));
    }
    form.errors.clear();

    let mut payload = E::to_payload(&form.values)?;
    if E::delete_policy() == DeletePolicy::Deactivate {
        let active = editing
            .and_then(|id| find(snapshot, id).ok())
            .and_then(|entity| entity.is_active())
            .unwrap_or(true);
        payload.insert(ACTIVE_FLAG.to_string(), Value::Bool(active));
    }
    log::debug!(
        "{}: sending {}",
        E::list_name(),
        editing.map_or_else(|| "new record".to_string(), |id| id.as_string())
    );
    state.writing = true;
    Ok((write, payload))
}

fn success_notice<E: Resource>(write: &Write<E::Id>) -> String {
    let action = match write {
        Write::Create => "created",
        Write::Update(_) => "updated",
        Write::Delete(_) => match E::delete_policy() {
            DeletePolicy::Hard => "deleted",
            DeletePolicy::Deactivate => "marked as inactive",
        },
        Write::Restore(_) => "restored",
    };
    format!("{} {} successfully", E::element_name(), action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::resource_list::testing::{item, Call, Item, ItemId, MockClient, Op};
    use contracts::domain::a001_product::aggregate::Product;
    use contracts::domain::a005_material_composition::aggregate::MaterialComposition;
    use contracts::domain::a008_vendor::aggregate::{Vendor, VendorId};
    use futures::executor::block_on;
    use serde_json::json;

    fn setup(rows: Vec<Item>) -> (ResourceListController<Item>, MockClient<Item>) {
        let client = MockClient::new(rows);
        let controller = ResourceListController::new(Rc::new(client.clone()));
        (controller, client)
    }

    fn setup_loaded(rows: Vec<Item>) -> (ResourceListController<Item>, MockClient<Item>) {
        let (controller, client) = setup(rows);
        block_on(controller.load()).unwrap();
        (controller, client)
    }

    fn inactive(id: i64, name: &str) -> Item {
        let mut row = item(id, name, None);
        row.is_active = false;
        row
    }

    #[test]
    fn test_load_replaces_snapshot_and_sorts_view() {
        let (controller, client) = setup(vec![
            item(1, "A", Some(2.0)),
            item(2, "B", Some(1.0)),
        ]);
        assert_eq!(controller.status(), LoadStatus::Idle);

        let pending = controller.load();
        assert_eq!(controller.status(), LoadStatus::Loading);
        block_on(pending).unwrap();

        assert_eq!(controller.status(), LoadStatus::Ready);
        assert_eq!(controller.snapshot().len(), 2);
        assert_eq!(client.count(Op::List), 1);

        controller.set_sort("weight", SortDirection::Ascending);
        let ids: Vec<_> = controller.view().iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![Some(ItemId(2)), Some(ItemId(1))]);
    }

    #[test]
    fn test_failed_load_keeps_last_snapshot() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None)]);
        client.fail_next(Op::List, ResourceError::Network("offline".into()));

        let result = block_on(controller.load());

        assert_eq!(result, Err(ResourceError::Network("offline".into())));
        assert!(matches!(controller.status(), LoadStatus::Error(_)));
        assert_eq!(controller.snapshot().len(), 1);
        assert_eq!(controller.error(), Some(ResourceError::Network("offline".into())));

        controller.dismiss_error();
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn test_concurrent_loads_share_one_request() {
        let (controller, client) = setup(vec![item(1, "A", None)]);
        let gate = client.hold_next(Op::List);

        let first = controller.load();
        let second = controller.load();
        gate.send(()).unwrap();

        let (a, b) = block_on(futures::future::join(first, second));
        assert_eq!(a, Ok(()));
        assert_eq!(b, Ok(()));
        assert_eq!(client.count(Op::List), 1);

        block_on(controller.load()).unwrap();
        assert_eq!(client.count(Op::List), 2);
    }

    fn names(controller: &ResourceListController<Item>) -> Vec<String> {
        controller.snapshot().into_iter().map(|row| row.name).collect()
    }

    #[test]
    fn test_reload_after_write_supersedes_an_older_read() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None)]);
        let gate = client.hold_next(Op::List);
        let refresh = controller.load();
        assert!(refresh.clone().now_or_never().is_none());

        controller.begin_create().unwrap();
        controller.set_field("name", "New").unwrap();
        block_on(controller.submit()).unwrap();
        assert_eq!(names(&controller), vec!["A", "New"]);

        gate.send(()).unwrap();
        assert_eq!(block_on(refresh), Ok(()));

        assert_eq!(names(&controller), vec!["A", "New"]);
        assert_eq!(controller.status(), LoadStatus::Ready);
        assert_eq!(client.count(Op::List), 3);
    }

    #[test]
    fn test_search_goes_to_the_endpoint() {
        let (controller, client) =
            setup_loaded(vec![item(1, "Copper wire", None), item(2, "Steel bolt", None)]);

        controller.set_search_text(" bolt ");
        block_on(controller.run_search()).unwrap();

        assert_eq!(client.calls().last(), Some(&Call::Search("bolt".into())));
        assert_eq!(names(&controller), vec!["Steel bolt"]);
        assert_eq!(controller.status(), LoadStatus::Ready);

        controller.set_search_text("");
        block_on(controller.run_search()).unwrap();
        assert_eq!(names(&controller).len(), 2);
        assert_eq!(client.count(Op::List), 2);
        assert_eq!(client.count(Op::Search), 1);
    }

    #[test]
    fn test_late_search_result_is_dropped() {
        let (controller, client) =
            setup_loaded(vec![item(1, "Copper wire", None), item(2, "Steel bolt", None)]);
        let gate = client.hold_next(Op::Search);

        controller.set_search_text("copper");
        let first = controller.run_search();
        assert!(first.clone().now_or_never().is_none());
        controller.set_search_text("bolt");
        block_on(controller.run_search()).unwrap();

        gate.send(()).unwrap();
        assert_eq!(block_on(first), Ok(()));
        assert_eq!(names(&controller), vec!["Steel bolt"]);
    }

    #[test]
    fn test_search_without_endpoint_stays_local() {
        let client = MockClient::<Product>::new(vec![]);
        let controller = ResourceListController::new(Rc::new(client.clone()));

        controller.set_search_text("pet");
        block_on(controller.run_search()).unwrap();

        assert!(client.calls().is_empty());
        assert_eq!(controller.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_local_criteria_never_touch_the_client() {
        let (controller, client) = setup_loaded(vec![item(1, "Glass", None), inactive(2, "Glass jar")]);

        controller.set_search_text("glass");
        controller.set_filter(StatusFilter::All);
        controller.toggle_sort("name");
        controller.toggle_sort("weight");

        assert_eq!(client.calls(), vec![Call::List]);
        assert_eq!(controller.view().len(), 2);
        assert_eq!(controller.query().sort, SortSpec::ascending("weight"));
        assert_eq!(controller.active_counts(), (1, 1));
    }

    #[test]
    fn test_toggle_sort_flips_active_field() {
        let (controller, _) = setup(vec![]);
        assert_eq!(controller.query().sort, SortSpec::ascending("name"));
        controller.toggle_sort("name");
        assert_eq!(controller.query().sort.direction, SortDirection::Descending);
        controller.toggle_sort("name");
        assert_eq!(controller.query().sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_create_submits_and_reloads() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None)]);

        controller.begin_create().unwrap();
        controller.set_field("name", "Bottle").unwrap();
        controller.set_field("weight", "0.25").unwrap();
        block_on(controller.submit()).unwrap();

        assert_eq!(controller.edit_state(), EditState::None);
        assert_eq!(controller.notice().as_deref(), Some("Item created successfully"));
        assert_eq!(controller.snapshot().len(), 2);
        assert_eq!(client.count(Op::List), 2);
        assert!(!controller.is_submitting());

        let mut expected = Payload::new();
        expected.insert("name".into(), json!("Bottle"));
        expected.insert("weight".into(), json!(0.25));
        expected.insert("isActive".into(), json!(true));
        assert_eq!(client.calls()[1], Call::Create(expected));
    }

    #[test]
    fn test_invalid_draft_never_reaches_the_client() {
        let (controller, client) = setup_loaded(vec![]);

        controller.begin_create().unwrap();
        controller.set_field("weight", "-1").unwrap();
        let result = block_on(controller.submit());

        let Err(ResourceError::Validation(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["weight"], "Weight must be greater than 0");
        assert_eq!(client.count(Op::Create), 0);
        assert_eq!(controller.form().unwrap().errors, errors);

        controller.set_field("name", "Bottle").unwrap();
        let form = controller.form().unwrap();
        assert_eq!(form.error("name"), None);
        assert!(form.error("weight").is_some());
    }

    #[test]
    fn test_percentage_ordering_blocks_submit() {
        let client = MockClient::<MaterialComposition>::new(vec![]);
        let controller = ResourceListController::new(Rc::new(client.clone()));

        controller.begin_create().unwrap();
        for (field, value) in [
            ("compositionName", "PET shell"),
            ("compositionCode", "PET-1"),
            ("materialId", "3"),
            ("weightKg", "0.2"),
            ("minPercentage", "60"),
            ("maxPercentage", "40"),
        ] {
            controller.set_field(field, value).unwrap();
        }
        let result = block_on(controller.submit());

        let Err(ResourceError::Validation(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };
        assert!(errors["maxPercentage"].contains("must be ≥ minimum"));
        assert!(!errors.contains_key("minPercentage"));
        assert_eq!(client.count(Op::Create), 0);
    }

    #[test]
    fn test_conflict_keeps_the_draft() {
        let (controller, client) = setup_loaded(vec![]);
        client.fail_next(Op::Create, ResourceError::Conflict);

        controller.begin_create().unwrap();
        controller.set_field("name", "Duplicate").unwrap();
        let before = controller.edit_state();
        let result = block_on(controller.submit());

        assert_eq!(result, Err(ResourceError::Conflict));
        assert_eq!(controller.edit_state(), before);
        assert_eq!(controller.error(), Some(ResourceError::Conflict));
        assert!(!controller.is_submitting());
        assert_eq!(client.count(Op::List), 1);
    }

    #[test]
    fn test_edit_updates_by_original_id_and_keeps_flag() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None), inactive(7, "Old")]);

        controller.begin_edit(&ItemId(7)).unwrap();
        assert_eq!(controller.form().unwrap().values.get("name"), "Old");
        controller.set_field("name", "Renamed").unwrap();
        block_on(controller.submit()).unwrap();

        let Call::Update(id, payload) = &client.calls()[1] else {
            panic!("expected an update");
        };
        assert_eq!(id, "7");
        assert_eq!(payload["name"], json!("Renamed"));
        assert_eq!(payload["isActive"], json!(false));
        assert_eq!(controller.notice().as_deref(), Some("Item updated successfully"));
        assert_eq!(controller.get(&ItemId(7)).unwrap().name, "Renamed");
    }

    #[test]
    fn test_begin_edit_then_cancel_leaves_snapshot() {
        let (controller, client) = setup_loaded(vec![item(1, "A", Some(1.0))]);
        let before = controller.snapshot();

        controller.begin_edit(&ItemId(1)).unwrap();
        controller.set_field("name", "Changed").unwrap();
        controller.cancel_edit();

        assert_eq!(controller.snapshot(), before);
        assert_eq!(controller.edit_state(), EditState::None);
        assert_eq!(client.calls(), vec![Call::List]);
    }

    #[test]
    fn test_draft_errors() {
        let (controller, _) = setup_loaded(vec![item(1, "A", None)]);

        assert_eq!(controller.begin_edit(&ItemId(9)), Err(ResourceError::NotFound));
        assert_eq!(controller.set_field("name", "x"), Err(ResourceError::NoDraft));
        assert_eq!(block_on(controller.submit()), Err(ResourceError::NoDraft));

        controller.begin_create().unwrap();
        assert_eq!(
            controller.set_field("colour", "red"),
            Err(ResourceError::UnknownField("colour".into()))
        );
    }

    #[test]
    fn test_two_phase_delete() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None)]);

        controller.request_delete(&ItemId(1)).unwrap();
        assert_eq!(controller.edit_state(), EditState::ConfirmingDelete(ItemId(1)));
        assert_eq!(client.count(Op::Delete), 0);

        controller.cancel_delete().unwrap();
        assert_eq!(controller.cancel_delete(), Err(ResourceError::NoPendingDelete));
        assert_eq!(
            block_on(controller.confirm_delete()),
            Err(ResourceError::NoPendingDelete)
        );

        controller.request_delete(&ItemId(1)).unwrap();
        block_on(controller.confirm_delete()).unwrap();

        assert_eq!(client.count(Op::Delete), 1);
        assert_eq!(controller.edit_state(), EditState::None);
        assert_eq!(
            controller.notice().as_deref(),
            Some("Item marked as inactive successfully")
        );
        assert!(!controller.get(&ItemId(1)).unwrap().is_active);
        assert!(controller.view().is_empty());
    }

    #[test]
    fn test_failed_delete_stays_confirming() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None)]);
        client.fail_next(
            Op::Delete,
            ResourceError::Http {
                status: 500,
                message: "boom".into(),
            },
        );

        controller.request_delete(&ItemId(1)).unwrap();
        assert!(block_on(controller.confirm_delete()).is_err());

        assert_eq!(controller.edit_state(), EditState::ConfirmingDelete(ItemId(1)));
        assert!(controller.error().is_some());
        block_on(controller.confirm_delete()).unwrap();
        assert_eq!(controller.edit_state(), EditState::None);
    }

    #[test]
    fn test_hard_delete_removes_the_record() {
        let vendor: Vendor = serde_json::from_value(json!({
            "vendorId": 4,
            "vendorName": "Green Cycle",
            "vendorCode": "GC",
            "vendorCapacityTonnes": 10.0,
            "assignedTasks": "Collection"
        }))
        .unwrap();
        let client = MockClient::new(vec![vendor]);
        let controller = ResourceListController::<Vendor>::new(Rc::new(client.clone()));
        block_on(controller.load()).unwrap();

        assert_eq!(
            block_on(controller.restore(&VendorId(4))),
            Err(ResourceError::RestoreUnavailable)
        );

        controller.request_delete(&VendorId(4)).unwrap();
        block_on(controller.confirm_delete()).unwrap();

        assert!(controller.snapshot().is_empty());
        assert_eq!(controller.notice().as_deref(), Some("Vendor deleted successfully"));
    }

    #[test]
    fn test_restore_only_inactive_records() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None), inactive(2, "B")]);

        assert_eq!(
            block_on(controller.restore(&ItemId(1))),
            Err(ResourceError::RestoreUnavailable)
        );
        assert_eq!(
            block_on(controller.restore(&ItemId(5))),
            Err(ResourceError::NotFound)
        );

        block_on(controller.restore(&ItemId(2))).unwrap();

        let Call::Update(id, payload) = &client.calls()[1] else {
            panic!("expected an update");
        };
        assert_eq!(id, "2");
        assert_eq!(payload["isActive"], json!(true));
        assert_eq!(payload["name"], json!("B"));
        assert!(!payload.contains_key("itemId"));
        assert_eq!(controller.active_counts(), (2, 0));
        assert_eq!(controller.notice().as_deref(), Some("Item restored successfully"));
    }

    #[test]
    fn test_overlapping_writes_are_busy() {
        let (controller, client) = setup_loaded(vec![item(1, "A", None), inactive(2, "B")]);
        let gate = client.hold_next(Op::Create);

        controller.begin_create().unwrap();
        controller.set_field("name", "New").unwrap();
        let first = controller.submit();
        assert!(controller.is_submitting());

        assert_eq!(block_on(controller.submit()), Err(ResourceError::Busy));
        assert_eq!(block_on(controller.restore(&ItemId(2))), Err(ResourceError::Busy));
        assert_eq!(controller.begin_create(), Err(ResourceError::Busy));
        assert_eq!(controller.request_delete(&ItemId(1)), Err(ResourceError::Busy));

        controller.set_search_text("new");
        assert_eq!(controller.query().search, "new");

        gate.send(()).unwrap();
        block_on(first).unwrap();
        assert_eq!(client.count(Op::Create), 1);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn test_results_after_dispose_are_ignored() {
        let (controller, client) = setup(vec![item(1, "A", None)]);
        let gate = client.hold_next(Op::List);

        let pending = controller.load();
        controller.dispose();
        gate.send(()).unwrap();

        assert_eq!(block_on(pending), Err(ResourceError::Disposed));
        assert!(controller.snapshot().is_empty());
        assert_eq!(block_on(controller.load()), Err(ResourceError::Disposed));
        assert_eq!(controller.begin_create(), Err(ResourceError::Disposed));
    }

    #[test]
    fn test_results_after_drop_are_ignored() {
        let (controller, client) = setup_loaded(vec![]);
        controller.begin_create().unwrap();
        controller.set_field("name", "Orphan").unwrap();
        let pending = controller.submit();
        drop(controller);

        assert_eq!(block_on(pending), Err(ResourceError::Disposed));
        assert_eq!(client.count(Op::Create), 1);
        assert_eq!(client.count(Op::List), 1);
    }

    #[test]
    fn test_listeners_are_notified() {
        let (controller, _) = setup(vec![]);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = controller.subscribe(move || seen.set(seen.get() + 1));

        controller.set_search_text("a");
        controller.set_filter(StatusFilter::Inactive);
        assert_eq!(calls.get(), 2);

        controller.unsubscribe(id);
        controller.set_search_text("b");
        assert_eq!(calls.get(), 2);
    }
}
