//! Client-side resource-list core
//!
//! [`controller::ResourceListController`] reconciles a remote collection with
//! local search/filter/sort criteria and drives its create/edit/delete
//! lifecycle. [`step_gated::StepGatedController`] runs the create path as a
//! multi-step form. `ui` renders both with Leptos.

pub mod client;
pub mod controller;
pub mod error;
pub mod http_client;
pub mod query;
pub mod step_gated;
#[cfg(test)]
pub mod testing;
pub mod ui;

pub use client::ResourceClient;
pub use controller::{EditState, LoadStatus, ResourceListController};
pub use error::ResourceError;
pub use http_client::HttpResourceClient;
pub use step_gated::StepGatedController;
