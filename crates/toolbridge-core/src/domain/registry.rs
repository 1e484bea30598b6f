//! Server registry types.
//!
//! The registry maps a logical server name (e.g. `puppeteer`, `context7`)
//! to the command used to launch it over stdio.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How to launch one MCP server process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Command to execute (e.g. "npx" or an absolute path).
    pub command: String,

    /// Arguments passed to the command, in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Variables overlaid on the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl LaunchSpec {
    /// Create a launch spec with no environment overrides.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: BTreeMap::new(),
        }
    }

    /// Add an environment override.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Parsed contents of a registry file.
///
/// Entries are kept as raw JSON. Only the entry that is actually resolved
/// has to be a valid [`LaunchSpec`]; other entries (remote or disabled
/// servers, fields this crate does not know) never invalidate the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerRegistry {
    servers: BTreeMap<String, Value>,
}

impl ServerRegistry {
    /// Parse a registry document.
    ///
    /// Both the flat shape `{ "<name>": {...} }` and the wrapped shape
    /// `{ "mcpServers": { "<name>": {...} } }` are accepted. Fails only when
    /// the document is not JSON or its server table is not an object.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let mut document: Value = serde_json::from_str(content)?;

        let servers_value = match document.get_mut("mcpServers") {
            Some(inner) if inner.is_object() => inner.take(),
            _ => document,
        };

        let servers: BTreeMap<String, Value> = serde_json::from_value(servers_value)?;
        Ok(Self { servers })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Raw registry entry for a server.
    pub fn entry(&self, name: &str) -> Option<&Value> {
        self.servers.get(name)
    }

    /// Launch spec for a server, decoded on demand.
    ///
    /// `None` when the server is not listed, `Some(Err(_))` when its entry
    /// is not a stdio launch entry.
    pub fn launch_spec(&self, name: &str) -> Option<Result<LaunchSpec, serde_json::Error>> {
        self.servers
            .get(name)
            .map(|entry| LaunchSpec::deserialize(entry))
    }

    /// All registered server names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// One candidate registry location that was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAttempt {
    /// The path that was checked.
    pub candidate: PathBuf,
    /// What happened when it was checked.
    pub outcome: AttemptOutcome,
}

/// Outcome of checking a candidate registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// File was read and parsed.
    Ok,
    /// Path does not exist.
    NotFound,
    /// File exists but could not be read.
    Unreadable(String),
    /// File was read but is not a valid registry document.
    InvalidJson(String),
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "not found"),
            Self::Unreadable(msg) => write!(f, "unreadable: {msg}"),
            Self::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
        }
    }
}
