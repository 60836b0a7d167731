use std::fmt;

use bytes::Bytes;
use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::constants::{ERROR_MIME, MARKDOWN_MIME};

/// A parsed output record.
///
/// Stored outputs are opaque to the codec: they are decoded just far enough
/// to restore embedded byte buffers and otherwise pass through unchanged.
/// Binary payloads travel through JSON as `{"type":"Buffer","data":[...]}`
/// and come back as [`OutputValue::Bytes`]; serializing emits the same
/// wrapper, so revival round-trips. Object key order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Raw bytes restored from a tagged buffer wrapper.
    Bytes(Bytes),
    Array(Vec<OutputValue>),
    Object(IndexMap<String, OutputValue>),
}

impl OutputValue {
    /// Parses one serialized output entry, restoring tagged byte buffers
    /// anywhere in the tree.
    pub fn parse(entry: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(entry)
    }

    /// Serializes the value back to its stored JSON form.
    pub fn to_entry(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Restores a `{"type":"Buffer","data":[n1,n2,...]}` object to its bytes.
///
/// Only an all-numeric `data` array is revived; anything else is left as the
/// plain object it parsed as.
fn revive_buffer(map: &IndexMap<String, OutputValue>) -> Option<Bytes> {
    match (map.get("type"), map.get("data")) {
        (Some(OutputValue::String(tag)), Some(OutputValue::Array(items))) if tag == "Buffer" => {
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                if let OutputValue::Number(n) = item {
                    bytes.push(n.as_u64().unwrap_or_default() as u8);
                } else {
                    return None;
                }
            }
            Some(Bytes::from(bytes))
        }
        _ => None,
    }
}

impl Serialize for OutputValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OutputValue::Null => serializer.serialize_unit(),
            OutputValue::Bool(value) => serializer.serialize_bool(*value),
            OutputValue::Number(number) => number.serialize(serializer),
            OutputValue::String(text) => serializer.serialize_str(text),
            OutputValue::Bytes(bytes) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "Buffer")?;
                map.serialize_entry("data", bytes.as_ref())?;
                map.end()
            }
            OutputValue::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            OutputValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for OutputValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OutputValueVisitor;

        impl<'de> Visitor<'de> for OutputValueVisitor {
            type Value = OutputValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(OutputValue::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(OutputValue::Number(Number::from(value)))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(OutputValue::Number(Number::from(value)))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Number::from_f64(value).map_or(OutputValue::Null, OutputValue::Number))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(OutputValue::String(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(OutputValue::String(value))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OutputValue::Null)
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = access.next_element()? {
                    values.push(value);
                }
                Ok(OutputValue::Array(values))
            }

            // Buffer wrappers are revived here, bottom-up, so a wrapper at
            // any depth becomes bytes before its parent is assembled.
            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = IndexMap::new();
                while let Some((key, value)) = access.next_entry::<String, OutputValue>()? {
                    entries.insert(key, value);
                }
                Ok(match revive_buffer(&entries) {
                    Some(bytes) => OutputValue::Bytes(bytes),
                    None => OutputValue::Object(entries),
                })
            }
        }

        deserializer.deserialize_any(OutputValueVisitor)
    }
}

/// One output item produced by executing a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputItem {
    /// A text payload tagged with a MIME type.
    Text { mime: String, content: String },
    /// An execution failure rendered in place of the cell's output.
    Error { name: String, message: String },
}

impl OutputItem {
    /// Converts the item to the persisted tree shape: a `{mime, data}`
    /// object whose `data` is the payload bytes.
    pub fn to_value(&self) -> OutputValue {
        let (mime, data) = match self {
            OutputItem::Text { mime, content } => {
                (mime.clone(), Bytes::copy_from_slice(content.as_bytes()))
            }
            OutputItem::Error { name, message } => {
                let payload = serde_json::json!({ "name": name, "message": message });
                (ERROR_MIME.to_string(), Bytes::from(payload.to_string()))
            }
        };

        let mut entry = IndexMap::new();
        entry.insert("mime".to_string(), OutputValue::String(mime));
        entry.insert("data".to_string(), OutputValue::Bytes(data));
        OutputValue::Object(entry)
    }
}

/// A full cell output: the ordered items displayed for one cell.
///
/// Executions always replace a cell's output wholesale with one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct CellOutput {
    pub items: Vec<OutputItem>,
}

impl CellOutput {
    /// A single markdown text item holding `content`.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            items: vec![OutputItem::Text {
                mime: MARKDOWN_MIME.to_string(),
                content: content.into(),
            }],
        }
    }

    /// A single text item with an explicit MIME type.
    pub fn text(content: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            items: vec![OutputItem::Text {
                mime: mime.into(),
                content: content.into(),
            }],
        }
    }

    /// A single error item carrying the failure.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            items: vec![OutputItem::Error {
                name: name.into(),
                message: message.into(),
            }],
        }
    }

    /// Converts to the persisted output tree (an `{items: [...]}` object),
    /// ready to be stored on a cell and serialized by the codec.
    pub fn to_value(&self) -> OutputValue {
        let items = self.items.iter().map(OutputItem::to_value).collect();
        let mut entry = IndexMap::new();
        entry.insert("items".to_string(), OutputValue::Array(items));
        OutputValue::Object(entry)
    }
}
