//! Common types and traits for all collections

pub mod resource;
pub mod resource_id;

// Re-exports
pub use resource::{default_active, DeletePolicy, Payload, Resource, ACTIVE_FLAG};
pub use resource_id::ResourceId;
