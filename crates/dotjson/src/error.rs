//! Error types for document decoding and the typed bridge.
//!
//! Path misses are never errors: reads report them as `None`/`false`,
//! writes auto-vivify, deletes return `false`.

use thiserror::Error;

/// Errors that can occur while decoding a document or bridging it to a
/// typed structure.
#[derive(Error, Debug)]
pub enum Error {
    /// The source bytes were not valid JSON, or did not fit the target type.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading a lazily-held source failed before it could be decoded.
    #[error("I/O error while reading source: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a value to JSON text failed.
    #[error("encoding error: {0}")]
    Encode(String),

    /// A host value could not be normalized into a [`crate::Value`].
    #[error("cannot normalize value: {0}")]
    Normalize(#[source] serde_json::Error),

    /// The raw form was already replaced by a decoded tree.
    #[error("value has been parsed")]
    AlreadyParsed,

    /// The document never had a source.
    #[error("no value to unmarshal")]
    NoValue,
}

/// Convenience alias used throughout dotjson.
pub type Result<T> = std::result::Result<T, Error>;
