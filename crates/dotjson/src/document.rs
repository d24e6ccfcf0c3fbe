//! `Document`: an owned value tree with an optional lazy raw source.
//!
//! A document built from bytes or a reader keeps that raw form until the
//! first value access, then decodes it once and drops it. While the raw
//! form is still held, [`Document::unmarshal`] can decode it straight into
//! a typed structure; afterwards the bridge reports
//! [`Error::AlreadyParsed`].
//!
//! The lazy state lives in a `RefCell`/`OnceCell` pair, so a `Document` is
//! not `Sync`. Share it across threads only behind external locking.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::{debug, trace, warn};

use crate::encode::{encode, EncodeOptions};
use crate::error::{Error, Result};
use crate::path::Segment;
use crate::value::Value;

enum Source {
    Bytes(Vec<u8>),
    Reader(Box<dyn Read>),
}

/// A JSON document addressed by dotted paths.
///
/// ```
/// use dotjson::Document;
///
/// let mut doc = Document::from(r#"{"a": {"b": [1, 2]}}"#);
/// assert_eq!(doc.get("a.b.0").as_i64(), 1);
///
/// doc.set("a.b.1", "ok").set("c", 2);
/// doc.del("c");
/// assert_eq!(doc.to_string(), r#"{"a":{"b":[1,"ok"]}}"#);
/// ```
#[derive(Default)]
pub struct Document {
    source: RefCell<Option<Source>>,
    value: OnceCell<Value>,
}

impl Document {
    /// A document with no source. It reads as `null` and has nothing to
    /// unmarshal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-decoded value.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self {
            source: RefCell::new(None),
            value: OnceCell::from(value.into()),
        }
    }

    /// Hold raw JSON bytes; they are decoded on first access.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::lazy(Source::Bytes(bytes.into()))
    }

    /// Hold a reader; it is drained and decoded on first access.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::lazy(Source::Reader(Box::new(reader)))
    }

    fn lazy(source: Source) -> Self {
        Self {
            source: RefCell::new(Some(source)),
            value: OnceCell::new(),
        }
    }

    /// Decode eagerly, returning malformed input as an error instead of
    /// reading it as `null`.
    pub fn decode(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes.as_ref())?;
        Ok(Self::from_value(value))
    }

    /// Whether the raw source is still held (no value access yet).
    pub fn is_raw(&self) -> bool {
        self.value.get().is_none() && self.source.borrow().is_some()
    }

    /// A copy of the raw JSON bytes while the document still holds them.
    ///
    /// `None` for a document without a source, once the value has been
    /// accessed, and for a reader that [`Document::unmarshal`] has not
    /// buffered yet. The bytes are returned as given, valid JSON or not.
    pub fn raw(&self) -> Option<Vec<u8>> {
        if self.value.get().is_some() {
            return None;
        }
        match self.source.borrow().as_ref() {
            Some(Source::Bytes(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// The root value, decoding the lazy source if needed.
    ///
    /// A source that fails to decode reads as `null`; use
    /// [`Document::decode`] to observe the error.
    pub fn value(&self) -> &Value {
        self.value
            .get_or_init(|| decode_source(self.source.borrow_mut().take()))
    }

    /// Mutable root value, decoding the lazy source if needed.
    pub fn value_mut(&mut self) -> &mut Value {
        if self.value.get().is_none() {
            let decoded = decode_source(self.source.get_mut().take());
            self.value = OnceCell::from(decoded);
        }
        let Some(value) = self.value.get_mut() else {
            unreachable!("value cell was just filled");
        };
        value
    }

    pub fn into_value(self) -> Value {
        let Document { source, value } = self;
        value
            .into_inner()
            .unwrap_or_else(|| decode_source(source.into_inner()))
    }

    /// See [`Value::get`].
    pub fn get(&self, path: &str) -> &Value {
        self.value().get(path)
    }

    /// See [`Value::gets`].
    pub fn gets<I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        self.value().gets(segments)
    }

    /// See [`Value::has`].
    pub fn has(&self, path: &str) -> bool {
        self.value().has(path)
    }

    /// See [`Value::set`].
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.value_mut().set(path, value);
        self
    }

    /// See [`Value::sets`].
    pub fn sets<I>(&mut self, value: impl Into<Value>, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        self.value_mut().sets(value, segments);
        self
    }

    /// See [`Value::del`].
    pub fn del(&mut self, path: &str) -> bool {
        self.value_mut().del(path)
    }

    /// See [`Value::dels`].
    pub fn dels<I>(&mut self, segments: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        self.value_mut().dels(segments)
    }

    /// JSON text; see [`EncodeOptions`] for the layout rules.
    pub fn encode(&self, prefix: &str, indent: &str) -> Result<String> {
        self.encode_with(&EncodeOptions::new(prefix, indent))
    }

    pub fn encode_with(&self, options: &EncodeOptions) -> Result<String> {
        encode(self.value(), options)
    }

    /// Decode the held raw source into `T`.
    ///
    /// The raw form stays in place, so this can be called repeatedly until
    /// the first value access. A reader source is buffered on the first
    /// call. If the reader fails partway, the bytes read so far replace it
    /// and later calls decode those.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyParsed`] once the document holds a decoded tree.
    /// - [`Error::NoValue`] for a document that never had a source.
    /// - [`Error::Io`] if draining a reader fails.
    /// - [`Error::Decode`] if the bytes do not decode into `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        if self.value.get().is_some() {
            debug!("typed unmarshal refused: document already decoded");
            return Err(Error::AlreadyParsed);
        }
        let mut source = self.source.borrow_mut();
        if let Some(Source::Reader(reader)) = source.as_mut() {
            let mut buf = Vec::new();
            let drained = reader.read_to_end(&mut buf);
            *source = Some(Source::Bytes(buf));
            if let Err(error) = drained {
                warn!(%error, "document reader failed, keeping the bytes read so far");
                return Err(error.into());
            }
        }
        match source.as_ref() {
            Some(Source::Bytes(bytes)) => Ok(serde_json::from_slice(bytes)?),
            Some(Source::Reader(_)) => unreachable!("reader sources are buffered above"),
            None => {
                debug!("typed unmarshal refused: document has no source");
                Err(Error::NoValue)
            }
        }
    }
}

fn decode_source(source: Option<Source>) -> Value {
    let decoded = match source {
        None => return Value::Null,
        Some(Source::Bytes(bytes)) => serde_json::from_slice::<Value>(&bytes),
        Some(Source::Reader(reader)) => serde_json::from_reader::<_, Value>(reader),
    };
    match decoded {
        Ok(value) => {
            trace!(kind = value.kind(), "decoded lazy document source");
            value
        }
        Err(error) => {
            warn!(%error, "lazy document source is not valid JSON, reading as null");
            Value::Null
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<&str> for Document {
    fn from(json: &str) -> Self {
        Self::from_bytes(json)
    }
}

impl From<String> for Document {
    fn from(json: String) -> Self {
        Self::from_bytes(json)
    }
}

impl From<Vec<u8>> for Document {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for Document {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Nesting a document inside a value takes its (decoded) tree.
impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value(), f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_raw() {
            f.write_str("Document(<raw>)")
        } else {
            f.debug_tuple("Document").field(self.value()).finish()
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Deserializing keeps the field's JSON text as a lazy raw source, so
/// [`Document::unmarshal`] works on an embedded document. This relies on
/// serde_json's raw values and fails under other deserializers.
impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::from_bytes(raw.get()))
    }
}
