//! # dotjson
//!
//! Read, write and delete values inside untyped JSON documents by dotted
//! path, without declaring Rust structures for them.
//!
//! Paths are dot-separated: `"a.b.1"` walks key `a`, key `b`, then index
//! `1`. A piece that is `0` or a digit run without a leading zero is an
//! array index; anything else is an object key.
//!
//! ## Quick start
//!
//! ```rust
//! use dotjson::Document;
//!
//! let mut doc = Document::from(r#"{"a":{"b":1},"c":["x","y","z"]}"#);
//! assert_eq!(doc.get("a.b").as_i64(), 1);
//! assert_eq!(doc.get("c.1").as_text(), "y");
//!
//! // Writes create whatever is missing; arrays are padded with null.
//! doc.set("s.1.a", 10).set("c.5", "ok");
//! assert_eq!(
//!     doc.to_string(),
//!     r#"{"a":{"b":1},"c":["x","y","z",null,null,"ok"],"s":[null,{"a":10}]}"#
//! );
//!
//! // Misses are not errors.
//! assert!(doc.get("s.10.b").is_nil());
//! assert!(!doc.del("nope.0"));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tree and host conversions
//! - [`path`]: dotted path parsing, `Segment`, `Query`
//! - [`read`]: path resolution (`get`, `gets`, `has`)
//! - [`write`]: assignment with auto-vivification, deletion
//! - [`coerce`]: permissive scalar accessors and collection views
//! - [`document`]: lazy-decoding `Document` and the typed bridge
//! - [`encode`]: JSON text with prefix/indent layout
//! - [`error`]: error types for decoding and the typed bridge

pub mod coerce;
pub mod document;
pub mod encode;
pub mod error;
pub mod path;
pub mod read;
pub mod value;
pub mod write;

pub use document::Document;
pub use encode::{encode, EncodeOptions};
pub use error::{Error, Result};
pub use path::{parse_path, Query, Segment};
pub use value::{Map, Value};
