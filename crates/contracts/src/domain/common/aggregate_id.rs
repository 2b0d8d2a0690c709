use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Typed identifier of an aggregate, carried as a string in URLs and forms
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Convert the id to its URL/form representation
    fn as_string(&self) -> String;

    /// Parse an id from its URL/form representation
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim()).map_err(|e| format!("Invalid UUID: {}", e))
    }
}
