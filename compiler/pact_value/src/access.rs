//! Index reads and writes.
//!
//! Reads are forgiving: a missing key or a position past the end reads as
//! `nil`, and indexing `nil` gives `nil`. Writes create what is missing: a
//! `nil` slot becomes an array when written with a position and a map
//! otherwise, and arrays grow with `nil` up to the written position.

use crate::errors::{invalid_index, RuntimeResult};
use crate::{Value, ValueMap};

/// Largest array an index write may create.
pub const MAX_ARRAY_LEN: usize = 1 << 24;

impl Value {
    /// `self[key]`
    pub fn index(&self, key: &Value) -> RuntimeResult<Value> {
        self.index_ref(key).map(|found| found.cloned().unwrap_or_default())
    }

    /// `self[key]` without copying. `None` reads as `nil`.
    pub fn index_ref(&self, key: &Value) -> RuntimeResult<Option<&Value>> {
        match self {
            Value::Nil => Ok(None),
            Value::Array(items) => {
                let pos = key.to_position().ok_or_else(|| invalid_index(key, "array"))?;
                Ok(items.get(pos))
            }
            Value::Map(map) => Ok(map.get(&key.to_key())),
            other => Err(invalid_index(key, other.type_name())),
        }
    }

    /// `self.name`: a map key read.
    pub fn field(&self, name: &str) -> RuntimeResult<Value> {
        self.field_ref(name).map(|found| found.cloned().unwrap_or_default())
    }

    /// `self.name` without copying. `None` reads as `nil`.
    pub fn field_ref(&self, name: &str) -> RuntimeResult<Option<&Value>> {
        match self {
            Value::Nil => Ok(None),
            Value::Map(map) => Ok(map.get(name)),
            other => Err(invalid_index(&name, other.type_name())),
        }
    }

    /// `self[path[0]][path[1]].. = value`
    pub fn assign_path(&mut self, path: &[Value], value: Value) -> RuntimeResult<()> {
        let Some((key, rest)) = path.split_first() else {
            *self = value;
            return Ok(());
        };
        if self.is_nil() {
            *self = if matches!(key, Value::Int(_)) {
                Value::Array(Vec::new())
            } else {
                Value::Map(ValueMap::new())
            };
        }
        match self {
            Value::Array(items) => {
                let pos = key
                    .to_position()
                    .filter(|pos| *pos < MAX_ARRAY_LEN)
                    .ok_or_else(|| invalid_index(key, "array"))?;
                if pos >= items.len() {
                    items.resize(pos + 1, Value::Nil);
                }
                items[pos].assign_path(rest, value)
            }
            Value::Map(map) => map.entry(key.to_key()).or_default().assign_path(rest, value),
            other => Err(invalid_index(key, other.type_name())),
        }
    }
}
