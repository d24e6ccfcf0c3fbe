//! JSON text output with a line prefix and per-level indent.
//!
//! Compact output (both strings empty) is the `Display` rendering. Indented
//! output puts every array element and object entry on its own line; each
//! line after the first starts with `prefix` followed by one `indent` per
//! nesting level. Empty containers stay on one line (`[]`, `{}`). There is
//! no trailing newline.
//!
//! Both layouts go through serde_json's serializer, so escaping and number
//! text are identical; only the whitespace differs.
//!
//! # Example
//! ```
//! use dotjson::{encode, EncodeOptions, Value};
//!
//! let value: Value = r#"{"a":{"b":[1,"ok"]}}"#.parse().unwrap();
//! let text = encode(&value, &EncodeOptions::new("> ", "  ")).unwrap();
//! assert_eq!(text, "{\n>   \"a\": {\n>     \"b\": [\n>       1,\n>       \"ok\"\n>     ]\n>   }\n> }");
//! ```

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

use crate::error::{Error, Result};
use crate::value::Value;

/// Layout settings for [`encode`]. The default is compact output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Written at the start of every line except the first.
    pub prefix: String,
    /// Written once per nesting level after the prefix.
    pub indent: String,
}

impl EncodeOptions {
    pub fn new(prefix: impl Into<String>, indent: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            indent: indent.into(),
        }
    }

    /// Two-space indent, no prefix.
    pub fn pretty() -> Self {
        Self::new("", "  ")
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    fn is_compact(&self) -> bool {
        self.prefix.is_empty() && self.indent.is_empty()
    }
}

/// Render `value` as JSON text laid out per `options`.
///
/// # Errors
///
/// [`Error::Encode`] if the serializer fails. A [`Value`] always has a JSON
/// form, so this only surfaces writer failures.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    let mut out = Vec::new();
    if options.is_compact() {
        write_with(value, &mut out, CompactFormatter)?;
    } else {
        write_with(value, &mut out, PrefixFormatter::new(options))?;
    }
    String::from_utf8(out).map_err(|e| Error::Encode(e.to_string()))
}

fn write_with<F: Formatter>(value: &Value, out: &mut Vec<u8>, formatter: F) -> Result<()> {
    let mut serializer = Serializer::with_formatter(out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::Encode(e.to_string()))
}

/// serde_json formatter that breaks lines inside non-empty containers,
/// starting each new line with a prefix and `depth` indents.
struct PrefixFormatter<'a> {
    prefix: &'a [u8],
    indent: &'a [u8],
    depth: usize,
    has_value: bool,
}

impl<'a> PrefixFormatter<'a> {
    fn new(options: &'a EncodeOptions) -> Self {
        Self {
            prefix: options.prefix.as_bytes(),
            indent: options.indent.as_bytes(),
            depth: 0,
            has_value: false,
        }
    }

    fn new_line<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"\n")?;
        writer.write_all(self.prefix)?;
        for _ in 0..self.depth {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.depth -= 1;
        if self.has_value {
            self.new_line(writer)?;
        }
        writer.write_all(bracket)
    }

    fn begin_entry<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        self.new_line(writer)
    }
}

impl Formatter for PrefixFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.begin_entry(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.begin_entry(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        s.parse().unwrap()
    }

    fn render(value: &Value, options: &EncodeOptions) -> String {
        encode(value, options).unwrap()
    }

    #[test]
    fn compact_matches_display() {
        let value = parse(r#"{"b":[1,2.5,null],"a":"<&>"}"#);
        assert_eq!(render(&value, &EncodeOptions::default()), value.to_string());
        assert_eq!(value.to_string(), r#"{"a":"<&>","b":[1,2.5,null]}"#);
    }

    #[test]
    fn null_root() {
        assert_eq!(render(&Value::Null, &EncodeOptions::default()), "null");
        assert_eq!(render(&Value::Null, &EncodeOptions::pretty()), "null");
    }

    #[test]
    fn empty_containers_stay_inline() {
        let value = parse(r#"{"a":[],"b":{}}"#);
        assert_eq!(
            render(&value, &EncodeOptions::pretty()),
            "{\n  \"a\": [],\n  \"b\": {}\n}"
        );
    }

    #[test]
    fn nested_containers_close_on_their_own_lines() {
        let value = parse(r#"[[1],{"k":[]},2]"#);
        assert_eq!(
            render(&value, &EncodeOptions::new("", " ")),
            "[\n [\n  1\n ],\n {\n  \"k\": []\n },\n 2\n]"
        );
    }

    #[test]
    fn prefix_only_still_breaks_lines() {
        let value = parse("[1,2]");
        assert_eq!(render(&value, &EncodeOptions::default().with_prefix("#")), "[\n#1,\n#2\n#]");
    }

    #[test]
    fn escapes_match_serde_json() {
        let raw = "q\"b\\n\nt\tc\u{1}e\u{8}f\u{c}é";
        let value = Value::from(raw);
        let pretty = render(&value, &EncodeOptions::pretty());
        assert_eq!(pretty, serde_json::to_string(raw).unwrap());
        assert_eq!(pretty.parse::<Value>().unwrap(), value);
    }

    #[test]
    fn pretty_numbers_match_compact() {
        let value = parse("[1e21,0.1,-3,1.5e-7]");
        let compact = render(&value, &EncodeOptions::new("", ""));
        let indented = render(&value, &EncodeOptions::new("", " "));
        assert_eq!(indented.replace(['\n', ' '], ""), compact);
    }

    #[test]
    fn two_space_indent_matches_serde_json_pretty() {
        let value = parse(r#"{"a":{"b":[1,"x",{}]},"c":[]}"#);
        assert_eq!(
            render(&value, &EncodeOptions::pretty()),
            serde_json::to_string_pretty(&value).unwrap()
        );
    }
}
