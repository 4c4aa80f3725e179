use contracts::domain::common::Resource;
use leptos::prelude::*;
use std::future::Future;

use crate::shared::resource_list::controller::ResourceListController;
use crate::shared::resource_list::error::ResourceError;

/// Controller handle usable inside view closures
///
/// The controller lives in local arena storage; a version signal bumped on
/// every controller notification makes reads reactive.
pub struct ListBinding<E: Resource> {
    controller: StoredValue<ResourceListController<E>, LocalStorage>,
    version: RwSignal<u64>,
}

impl<E: Resource> Clone for ListBinding<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Resource> Copy for ListBinding<E> {}

impl<E: Resource> ListBinding<E> {
    /// Attach `controller` to the current reactive owner; it is disposed with it
    pub fn new(controller: ResourceListController<E>) -> Self {
        let version = RwSignal::new(0u64);
        controller.subscribe(move || {
            version.try_update(|v| *v += 1);
        });
        let stored = StoredValue::new_local(controller);
        on_cleanup(move || {
            stored.try_with_value(|c| c.dispose());
        });
        Self {
            controller: stored,
            version,
        }
    }

    /// Read controller state, re-running the surrounding closure on changes
    pub fn read<T>(&self, f: impl FnOnce(&ResourceListController<E>) -> T) -> T {
        self.version.track();
        self.controller.with_value(f)
    }

    /// Forward an intent without tracking
    pub fn run<T>(&self, f: impl FnOnce(&ResourceListController<E>) -> T) -> T {
        self.controller.with_value(f)
    }

    /// Forward an intent that may fail synchronously
    pub fn act(&self, f: impl FnOnce(&ResourceListController<E>) -> Result<(), ResourceError>) {
        match self.run(f) {
            Err(e) if e.is_remote() => log::warn!("{}: {}", E::list_name(), e),
            Err(e) => log::debug!("{}: {}", E::list_name(), e),
            Ok(()) => {}
        }
    }

    /// Start a network intent and forget about its outcome (it lands in controller state)
    pub fn spawn<F>(&self, f: impl FnOnce(&ResourceListController<E>) -> F)
    where
        F: Future<Output = Result<(), ResourceError>> + 'static,
    {
        spawn_task(self.run(f));
    }
}

pub fn spawn_task<F>(task: F)
where
    F: Future<Output = Result<(), ResourceError>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = task.await {
            log::debug!("request finished with error: {}", e);
        }
    });
}
