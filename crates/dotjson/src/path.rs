//! Dotted path parsing and path segments.
//!
//! `"a.b.1"` becomes `[Key("a"), Key("b"), Index(1)]`. A piece is an index
//! only when it is `0` or a digit run without a leading zero, so `"01"` stays
//! a key. There is no escape syntax: a key can never contain `.`.

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0$|^[1-9][0-9]*$").unwrap());

type Extractor = dyn for<'a> Fn(&'a Value) -> Option<&'a Value>;

/// A caller-supplied read step.
///
/// The closure inspects the current value and returns the sub-value to
/// continue from, or `None` for a miss. Writes skip query segments.
#[derive(Clone)]
pub struct Query(Rc<Extractor>);

impl Query {
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a Value) -> Option<&'a Value> + 'static,
    {
        Query(Rc::new(f))
    }

    pub(crate) fn apply<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        (self.0)(value)
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Query(..)")
    }
}

/// One step of a path.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Array position.
    Index(usize),
    /// Object key.
    Key(String),
    /// Custom lookup; honored on read, ignored on write.
    Query(Query),
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Index(a), Segment::Index(b)) => a == b,
            (Segment::Key(a), Segment::Key(b)) => a == b,
            (Segment::Query(a), Segment::Query(b)) => Rc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_owned())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<Query> for Segment {
    fn from(query: Query) -> Self {
        Segment::Query(query)
    }
}

/// Split a dotted path into segments.
///
/// `""` yields a single empty key, matching what splitting on `.` produces.
///
/// ```
/// use dotjson::{parse_path, Segment};
///
/// assert_eq!(
///     parse_path("items.0.01"),
///     vec![
///         Segment::Key("items".into()),
///         Segment::Index(0),
///         Segment::Key("01".into()),
///     ]
/// );
/// ```
pub fn parse_path(path: &str) -> Vec<Segment> {
    path.split('.').map(classify).collect()
}

fn classify(piece: &str) -> Segment {
    if INDEX_PATTERN.is_match(piece) {
        if let Ok(index) = piece.parse::<usize>() {
            return Segment::Index(index);
        }
    }
    Segment::Key(piece.to_owned())
}
