//! Read path: resolve segments against a value without changing it.
//!
//! Every miss (absent key, index past the end, wrong container kind, a query
//! returning `None`) stops the walk and reports "not found". Nothing here
//! allocates beyond parsing the path string.

use crate::path::{parse_path, Segment};
use crate::value::{Value, NULL};

impl Value {
    /// Value at a dotted path, or `Null` when the path does not resolve.
    ///
    /// ```
    /// use dotjson::Value;
    ///
    /// let doc: Value = r#"{"a":{"b":[1,2]}}"#.parse().unwrap();
    /// assert_eq!(doc.get("a.b.1").as_i64(), 2);
    /// assert!(doc.get("a.x").is_nil());
    /// ```
    pub fn get(&self, path: &str) -> &Value {
        self.gets(parse_path(path)).unwrap_or(&NULL)
    }

    /// Whether a dotted path resolves. A stored `null` counts as present.
    pub fn has(&self, path: &str) -> bool {
        self.gets(parse_path(path)).is_some()
    }

    /// Resolve an explicit segment list.
    ///
    /// Accepts anything convertible to [`Segment`], so `["c", 1]`-style
    /// lists need `Segment` values or `.into()` on mixed element types.
    pub fn gets<I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        let mut current = self;
        for segment in segments {
            current = match segment.into() {
                Segment::Index(index) => match current {
                    Value::Array(items) => items.get(index)?,
                    _ => return None,
                },
                Segment::Key(key) => match current {
                    Value::Object(map) => map.get(&key)?,
                    _ => return None,
                },
                Segment::Query(query) => query.apply(current)?,
            };
        }
        Some(current)
    }

    /// Mutable walk over existing structure only; never reshapes the tree.
    ///
    /// Queries hand out shared references, so a query segment here is a miss.
    pub(crate) fn resolve_mut(&mut self, segments: &[Segment]) -> Option<&mut Value> {
        let mut current = self;
        for segment in segments {
            current = match (segment, current) {
                (Segment::Index(index), Value::Array(items)) => items.get_mut(*index)?,
                (Segment::Key(key), Value::Object(map)) => map.get_mut(key)?,
                _ => return None,
            };
        }
        Some(current)
    }
}
