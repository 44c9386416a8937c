//! Canonical JSON formatting for structural comparison.
//!
//! Two documents that differ only in key order or whitespace normalize to
//! the same text. Layout: 4-space indentation, keys sorted, `,` between
//! items and `:` (no space) between a key and its value.

use std::io;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

use crate::error::{TemplateError, TemplateResult};

/// Re-serializes JSON documents into a canonical layout.
pub struct DocumentNormalizer;

impl DocumentNormalizer {
    /// Parse `text` as JSON and return its canonical form.
    pub fn normalize(text: &str) -> TemplateResult<String> {
        let value: Value = serde_json::from_str(text).map_err(TemplateError::InvalidJson)?;
        Self::normalize_value(&value)
    }

    /// Canonical form of an already parsed value.
    pub fn normalize_value(value: &Value) -> TemplateResult<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter::new());
        SortedKeys(value)
            .serialize(&mut ser)
            .map_err(TemplateError::Serialize)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Serializes a value with object keys in lexicographic order, whatever
/// order the underlying map keeps them in.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));

                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    out.serialize_entry(key, &SortedKeys(item))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&SortedKeys(item))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// `PrettyFormatter` with a 4-space indent and no space after `:`.
struct CanonicalFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl CanonicalFormatter<'_> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for CanonicalFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b":")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}
