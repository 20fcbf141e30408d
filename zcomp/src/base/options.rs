use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ComponentError, Result};

/// Option set of a component.
///
/// `Default` holds the declared defaults. Overrides are merged field by
/// field: fields present in the override replace the current value, and an
/// explicit `null` clears an optional field, which disables the behaviour it
/// drives.
pub trait ComponentOptions: Clone + Default + Serialize + DeserializeOwned + 'static {
    /// Selector the factory uses to find roots during `init`.
    fn root_selector(&self) -> Option<&str>;

    /// Defaults with the fields of the JSON object `json` applied.
    fn from_json(json: &str) -> Result<Self> {
        Self::default().merge_json(json)
    }

    /// A copy of `self` with the fields of the JSON object `json` applied.
    ///
    /// Keys use the camelCase option names, e.g. `{"openedClass": "is-open"}`.
    fn merge_json(&self, json: &str) -> Result<Self> {
        let Value::Object(overrides) = serde_json::from_str::<Value>(json)? else {
            return Err(ComponentError::InvalidOptions(serde::de::Error::custom(
                "options must be a JSON object",
            )));
        };

        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        Ok(serde_json::from_value(merged)?)
    }
}

/// The configured value, unless it is absent or empty.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
