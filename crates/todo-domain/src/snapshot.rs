//! Persisted application state.
//!
//! Mirrors the local-storage layout: the todo array under `todos`, the dark
//! mode flag under `darkMode`, and the active filter under `filter`. Each key
//! is decoded on its own so one unreadable entry does not take the others
//! down with it.

use crate::{StatusFilter, ThemePreference, Todo, TodoStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TODOS_KEY: &str = "todos";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const FILTER_KEY: &str = "filter";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub todos: Vec<Todo>,

    #[serde(rename = "darkMode", default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,

    #[serde(default)]
    pub filter: StatusFilter,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(store: &TodoStore, theme: &ThemePreference) -> Self {
        Self {
            todos: store.todos().to_vec(),
            dark_mode: theme.saved(),
            filter: store.filter(),
        }
    }

    /// Decode a stored object key by key. Missing or malformed keys fall
    /// back to their defaults.
    pub fn from_value(value: &Value) -> Self {
        Self::decode(value).0
    }

    /// Like [`Snapshot::from_value`], also naming the keys that could not be
    /// read in full. Readable todos are kept when some records are not.
    pub fn decode(value: &Value) -> (Self, Vec<&'static str>) {
        let Some(map) = value.as_object() else {
            tracing::warn!("Stored state is not an object; starting empty");
            return (Self::default(), vec![TODOS_KEY, DARK_MODE_KEY, FILTER_KEY]);
        };

        let mut unreadable = Vec::new();
        let (todos, todos_complete) = decode_todos(map.get(TODOS_KEY));
        if !todos_complete {
            unreadable.push(TODOS_KEY);
        }
        let dark_mode = decode_key(map.get(DARK_MODE_KEY), DARK_MODE_KEY, &mut unreadable);
        let filter = decode_key(map.get(FILTER_KEY), FILTER_KEY, &mut unreadable);

        let snapshot = Self {
            todos,
            dark_mode,
            filter: filter.unwrap_or_default(),
        };
        (snapshot, unreadable)
    }

    pub fn theme(&self, system_dark: bool) -> ThemePreference {
        ThemePreference::new(self.dark_mode, system_dark)
    }

    pub fn into_store(self) -> TodoStore {
        TodoStore::from_parts(self.todos, self.filter)
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty() && self.dark_mode.is_none()
    }
}

fn decode_key<T: DeserializeOwned>(
    value: Option<&Value>,
    key: &'static str,
    unreadable: &mut Vec<&'static str>,
) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!("Ignoring unreadable '{}' entry: {}", key, e);
            unreadable.push(key);
            None
        }
    }
}

/// Decodes records one at a time. The flag is false when anything was skipped.
fn decode_todos(value: Option<&Value>) -> (Vec<Todo>, bool) {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return (Vec::new(), true);
    };
    let Some(records) = value.as_array() else {
        tracing::warn!("Ignoring '{}' entry: not a list", TODOS_KEY);
        return (Vec::new(), false);
    };

    let mut complete = true;
    let todos = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record.clone()) {
            Ok(todo) => Some(todo),
            Err(e) => {
                tracing::warn!("Skipping unreadable todo at index {}: {}", index, e);
                complete = false;
                None
            }
        })
        .collect();
    (todos, complete)
}
