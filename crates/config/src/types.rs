//! The composed settings value.
//!
//! Responsibilities:
//! - Hold the merged settings object and the resolved environment name.
//! - Provide dotted-path lookup and typed deserialization.
//!
//! Does NOT handle:
//! - Loading, parsing, or merging (see loader).
//!
//! Invariants:
//! - The underlying object always contains an `"env"` key equal to
//!   [`Settings::env`].
//! - Never mutated after the secrets merge; the owning context returns the
//!   same instance on every call.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Fully composed settings for one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    env: String,
    root: Map<String, Value>,
}

impl Settings {
    pub(crate) fn new(env: String, root: Map<String, Value>) -> Self {
        Self { env, root }
    }

    /// The resolved environment name, e.g. `"development"`.
    pub fn env(&self) -> &str {
        &self.env
    }

    /// The settings as a plain JSON object.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Looks up a value by dotted path; numeric segments index into arrays.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut node = self.root.get(parts.next()?)?;
        for part in parts {
            node = match (node, part.parse::<usize>()) {
                (Value::Array(items), Ok(index)) => items.get(index)?,
                (Value::Object(map), _) => map.get(part)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Deserializes the whole settings object into a typed value.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the settings shape
    /// does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.root.clone()))
    }
}

impl Serialize for Settings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
