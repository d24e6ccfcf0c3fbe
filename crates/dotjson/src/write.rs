//! Write path: assign and delete by path, reshaping the tree on the way.
//!
//! # Assignment
//!
//! Each step coerces the current slot to the container the segment needs:
//!
//! - `Index(k)` turns a non-array into `[]`, then grows the array to `k + 1`
//!   elements padding with `null`. Existing elements keep their positions.
//! - `Key(k)` turns a non-object into `{}` and inserts `k` as `null` when
//!   it is missing.
//! - `Query` is skipped.
//!
//! Slots are borrowed mutably from the root down, so replacing a container
//! of the wrong kind is a plain assignment into its parent slot.
//!
//! # Deletion
//!
//! The prefix must already exist; deletes never vivify. Removing an object
//! key shrinks the object. Removing an array index writes `null` into the
//! slot so later indexes keep their meaning, except for the trailing slot,
//! which is popped.

use crate::path::{parse_path, Segment};
use crate::value::{Map, Value};

impl Value {
    /// Assign `value` at a dotted path, creating whatever is missing.
    ///
    /// ```
    /// use dotjson::Value;
    ///
    /// let mut doc = Value::Null;
    /// doc.set("a.b.1", "ok").set("c", 2);
    /// assert_eq!(doc.to_string(), r#"{"a":{"b":[null,"ok"]},"c":2}"#);
    /// ```
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.sets(value, parse_path(path))
    }

    /// Assign `value` at an explicit segment list. An empty list replaces
    /// the whole value.
    ///
    /// An index of `usize::MAX` names a slot no array can hold; such a write
    /// leaves the value untouched.
    pub fn sets<I>(&mut self, value: impl Into<Value>, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
        if segments
            .iter()
            .any(|segment| matches!(segment, Segment::Index(usize::MAX)))
        {
            return self;
        }
        let mut slot: &mut Value = self;
        for segment in segments {
            slot = match segment {
                Segment::Index(index) => &mut vivify_array(slot, index + 1)[index],
                Segment::Key(key) => vivify_object(slot).entry(key).or_default(),
                Segment::Query(_) => slot,
            };
        }
        *slot = value.into();
        self
    }

    /// Delete at a dotted path. Returns whether anything changed.
    pub fn del(&mut self, path: &str) -> bool {
        self.dels(parse_path(path))
    }

    /// Delete at an explicit segment list. An empty list resets the value to
    /// `null` and always reports a change.
    ///
    /// A [`Segment::Query`] anywhere in the list makes the delete a miss: a
    /// query only hands out shared references, so the path that
    /// [`Value::gets`] follows through it cannot be walked mutably.
    pub fn dels<I>(&mut self, segments: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        let mut segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
        let Some(last) = segments.pop() else {
            *self = Value::Null;
            return true;
        };
        let Some(parent) = self.resolve_mut(&segments) else {
            return false;
        };
        match (last, parent) {
            (Segment::Key(key), Value::Object(map)) => map.remove(&key).is_some(),
            (Segment::Index(index), Value::Array(items)) if index < items.len() => {
                if index + 1 == items.len() {
                    items.pop();
                } else {
                    items[index] = Value::Null;
                }
                true
            }
            _ => false,
        }
    }
}

fn vivify_array(slot: &mut Value, len: usize) -> &mut Vec<Value> {
    if !slot.is_array() {
        *slot = Value::Array(Vec::with_capacity(len));
    }
    let Value::Array(items) = slot else {
        unreachable!("slot was just replaced with an array");
    };
    if items.len() < len {
        items.resize(len, Value::Null);
    }
    items
}

fn vivify_object(slot: &mut Value) -> &mut Map {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    let Value::Object(map) = slot else {
        unreachable!("slot was just replaced with an object");
    };
    map
}
