//! Shared types for the EPR Vault admin console: collection entities, typed field
//! descriptors, form state and the validation rule engine.

pub mod domain;
pub mod shared;
