use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a persisted resource
///
/// The backend assigns numeric identifiers; every collection wraps its own in a
/// newtype so a product id cannot be passed where a vendor id is expected.
pub trait ResourceId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + Debug + 'static
{
    /// Path segment used in `{collection}/{id}` URLs
    fn as_string(&self) -> String;

    /// Parse an id back from a path segment or a form value
    fn from_string(s: &str) -> Result<Self, String>;
}

impl ResourceId for i32 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim().parse::<i32>().map_err(|e| format!("Invalid i32: {}", e))
    }
}

impl ResourceId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim().parse::<i64>().map_err(|e| format!("Invalid i64: {}", e))
    }
}
