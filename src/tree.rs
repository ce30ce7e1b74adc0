//! Generic search over untyped JSON trees.
//!
//! The page payloads have no stable schema, so most lookups are phrased as
//! "the first object anywhere below here that has key X". Which object counts
//! as first is decided by the traversal order implemented in [`Objects`]:
//!
//! - an object is yielded before anything below it;
//! - an object's array-valued members are expanded first, then its
//!   object-valued members (scalars have nothing to visit);
//! - an array's object items are visited first, then its array items.
//!
//! Members are taken in document order within each group, which is why
//! `serde_json` is built with `preserve_order`. Primary content tends to live
//! in the earlier array members, and callers depend on that.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Depth-first iterator over every object reachable from a root value.
///
/// Created by [`objects`].
#[derive(Debug, Clone)]
pub struct Objects<'a> {
    stack: Vec<&'a Value>,
}

impl<'a> Objects<'a> {
    fn push_reversed(&mut self, children: impl Iterator<Item = &'a Value>) {
        let start = self.stack.len();
        self.stack.extend(children);
        self.stack[start..].reverse();
    }
}

impl<'a> Iterator for Objects<'a> {
    type Item = &'a Map<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(value) = self.stack.pop() {
            match value {
                Value::Object(map) => {
                    let arrays = map.values().filter(|v| v.is_array());
                    let objects = map.values().filter(|v| v.is_object());
                    self.push_reversed(arrays.chain(objects));
                    return Some(map);
                }
                Value::Array(items) => {
                    let objects = items.iter().filter(|v| v.is_object());
                    let arrays = items.iter().filter(|v| v.is_array());
                    self.push_reversed(objects.chain(arrays));
                }
                _ => {}
            }
        }
        None
    }
}

/// Lazily walk every object-shaped node under `root`, including `root`.
#[must_use]
pub fn objects(root: &Value) -> Objects<'_> {
    Objects { stack: vec![root] }
}

/// Every object-shaped node under `root`, in traversal order.
#[must_use]
pub fn enumerate(root: &Value) -> Vec<&Map<String, Value>> {
    objects(root).collect()
}

/// Objects under `root` accepted by `predicate`, in traversal order.
pub fn select<'a, P>(root: &'a Value, mut predicate: P) -> impl Iterator<Item = &'a Map<String, Value>>
where
    P: FnMut(&Map<String, Value>) -> bool,
{
    objects(root).filter(move |obj| predicate(*obj))
}

/// Values stored under `key` in every object that has it, in traversal order.
pub fn iterate<'a>(root: &'a Value, key: &'a str) -> impl Iterator<Item = &'a Value> {
    objects(root).filter_map(move |obj| obj.get(key))
}

/// All values stored under `key`.
#[must_use]
pub fn all<'a>(root: &'a Value, key: &str) -> Vec<&'a Value> {
    objects(root).filter_map(|obj| obj.get(key)).collect()
}

/// The first value stored under `key`.
///
/// A present `null` is returned as such; only a key that appears nowhere is
/// [`Error::EmptyResult`].
pub fn first<'a>(root: &'a Value, key: &str) -> Result<&'a Value> {
    objects(root)
        .find_map(|obj| obj.get(key))
        .ok_or_else(|| Error::EmptyResult(key.to_string()))
}

/// The last value stored under `key`.
pub fn last<'a>(root: &'a Value, key: &str) -> Result<&'a Value> {
    objects(root)
        .filter_map(|obj| obj.get(key))
        .last()
        .ok_or_else(|| Error::EmptyResult(key.to_string()))
}

// === Field access ===

/// Python-style truthiness: null, false, zero and empty containers are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Member `key` of `value`, which must be an object.
pub fn field<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    value.get(key).ok_or_else(|| Error::missing(key))
}

/// Follow `keys` one object member at a time.
///
/// The error names the dotted prefix that could not be resolved.
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a Value> {
    let mut current = value;
    for (depth, key) in keys.iter().enumerate() {
        current = current
            .get(*key)
            .ok_or_else(|| Error::missing(keys[..=depth].join(".")))?;
    }
    Ok(current)
}

/// String at `keys`, wrong types collapse into [`Error::FieldMissing`].
pub fn str_path<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a str> {
    path(value, keys)?
        .as_str()
        .ok_or_else(|| Error::missing(keys.join(".")))
}

/// Interpret a scalar as epoch seconds; both numbers and numeric strings occur.
#[must_use]
pub fn as_epoch(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render an identifier or count scalar as text; `null` is absent.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// `message.text` style optional text: empty when the container is falsy or lacks `text`.
#[must_use]
pub fn optional_text(value: &Value, container: &str) -> String {
    value
        .get(container)
        .filter(|c| is_truthy(c))
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
