//! In-memory model of `claude_desktop_config.json`.
//!
//! The document is owned by the host application and may carry top-level
//! keys this tool knows nothing about. Everything outside the well-known
//! registry key is carried verbatim, and with serde_json's
//! `preserve_order` feature the key order survives a rewrite, so an
//! upsert produces the smallest possible diff.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use serde_json::ser::Serializer;
use tracing::warn;

use crate::error::MutateErr;
use crate::error::Result;

/// Well-known top-level key holding the server registry.
pub const SERVERS_KEY: &str = "mcpServers";

/// One registered executable invocation.
///
/// Equality is the basis for upsert idempotence: same `command` and the
/// same `args` in the same order. Unknown fields on an entry read from
/// disk are ignored for the comparison and replaced wholesale on update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl fmt::Display for ServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command `{}` args {:?}", self.command, self.args)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Minimal valid document: the registry key mapped to an empty
    /// registry. Written on first run so every transaction starts from a
    /// well-formed base.
    pub fn empty() -> Self {
        let mut root = Map::new();
        root.insert(SERVERS_KEY.to_string(), Value::Object(Map::new()));
        Self { root }
    }

    /// Parses the raw document. A top level that is not valid JSON, or is
    /// valid JSON but not an object, is an error: the file belongs to the
    /// host application and must not be silently replaced.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(MutateErr::NotAnObject),
        }
    }

    /// Read-only view of the registry. `None` when the key is absent or
    /// holds a non-object value.
    pub fn servers(&self) -> Option<&Map<String, Value>> {
        self.root.get(SERVERS_KEY).and_then(Value::as_object)
    }

    /// Mutable view of the registry, initializing the key when it is
    /// absent or holds a non-object value. All sibling keys are left
    /// untouched either way.
    pub fn servers_mut(&mut self) -> &mut Map<String, Value> {
        let value = self
            .root
            .entry(SERVERS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !value.is_object() {
            warn!("`{SERVERS_KEY}` held a non-object value; reinitializing it as an empty registry");
            *value = Value::Object(Map::new());
        }
        match value {
            Value::Object(map) => map,
            _ => unreachable!("registry value was coerced to an object above"),
        }
    }

    pub fn has_entry(&self, name: &str) -> bool {
        self.servers().is_some_and(|map| map.contains_key(name))
    }

    /// Lenient typed view of one entry. `None` when the entry is absent
    /// or does not deserialize (e.g. a hand-edited entry with a missing
    /// `command`), in which case an upsert treats it as "different".
    pub fn entry(&self, name: &str) -> Option<ServerEntry> {
        let value = self.servers()?.get(name)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Serialized form: pretty-printed with `indent` spaces per level and
    /// a trailing newline, the way the host application writes it.
    pub fn to_bytes(&self, indent: usize) -> Result<Vec<u8>> {
        let indent_str = " ".repeat(indent);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent_str.as_bytes());
        let mut ser = Serializer::with_formatter(&mut out, formatter);
        self.root.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }
}
