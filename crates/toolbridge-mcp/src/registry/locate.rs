//! Registry location and server resolution.

use super::env::{EnvProvider, SystemEnv};
use super::source::{RegistrySource, SystemSource};
use std::io;
use std::path::{Path, PathBuf};
use toolbridge_core::{AttemptOutcome, BridgeErrorKind, LaunchSpec, RegistryAttempt, ServerRegistry};

/// Environment variable naming the absolute fallback registry file.
pub const CONFIG_ENV_VAR: &str = "TOOLBRIDGE_MCP_CONFIG";

fn registry_file(base: &Path) -> PathBuf {
    base.join(".claude").join("mcp.json")
}

/// Build the ordered candidate list for a working directory.
pub fn default_candidates(cwd: &Path, env: &dyn EnvProvider) -> Vec<PathBuf> {
    let mut candidates = vec![registry_file(cwd), registry_file(&cwd.join(".."))];

    let fallback = env
        .var(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| env.home_dir().map(|home| registry_file(&home)));

    if let Some(path) = fallback {
        candidates.push(path);
    }
    candidates
}

/// Finds and reads the server registry.
///
/// The registry is re-read on every call; nothing is cached.
pub struct RegistryLocator {
    candidates: Vec<PathBuf>,
    source: Box<dyn RegistrySource>,
}

impl RegistryLocator {
    /// Locator over the default candidates for the current directory.
    pub fn discover() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::with_candidates(default_candidates(&cwd, &SystemEnv)))
    }

    /// Locator over an explicit candidate list, read from the filesystem.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self::with_source(candidates, SystemSource)
    }

    /// Locator with an injected file source (for testing).
    pub fn with_source(candidates: Vec<PathBuf>, source: impl RegistrySource + 'static) -> Self {
        Self {
            candidates,
            source: Box::new(source),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Load the first candidate that reads and parses.
    ///
    /// Returns the registry together with the path it came from.
    pub fn load(&self) -> Result<(ServerRegistry, PathBuf), BridgeErrorKind> {
        let mut attempts = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            let outcome = match self.source.read_to_string(candidate) {
                Ok(content) => match ServerRegistry::from_json_str(&content) {
                    Ok(registry) => {
                        tracing::debug!(
                            path = %candidate.display(),
                            servers = registry.len(),
                            "Loaded MCP registry"
                        );
                        return Ok((registry, candidate.clone()));
                    }
                    Err(e) => AttemptOutcome::InvalidJson(e.to_string()),
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => AttemptOutcome::NotFound,
                Err(e) => AttemptOutcome::Unreadable(e.to_string()),
            };

            tracing::debug!(
                path = %candidate.display(),
                outcome = %outcome,
                "Skipping registry candidate"
            );
            attempts.push(RegistryAttempt {
                candidate: candidate.clone(),
                outcome,
            });
        }

        Err(BridgeErrorKind::ConfigNotFound { attempts })
    }

    /// Resolve a server name to its launch spec.
    ///
    /// Only the requested entry is decoded; a malformed sibling entry does
    /// not affect resolution.
    pub fn resolve(&self, server: &str) -> Result<LaunchSpec, BridgeErrorKind> {
        let (registry, _path) = self.load()?;

        match registry.launch_spec(server) {
            Some(Ok(spec)) => Ok(spec),
            Some(Err(e)) => Err(BridgeErrorKind::InvalidServerEntry {
                server: server.to_string(),
                reason: e.to_string(),
            }),
            None => Err(BridgeErrorKind::ServerNotRegistered {
                server: server.to_string(),
                available: registry.names(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::env::MockEnv;
    use crate::registry::source::MockSource;

    const FIRST: &str = "/work/project/.claude/mcp.json";
    const SECOND: &str = "/work/project/../.claude/mcp.json";
    const THIRD: &str = "/home/dev/.claude/mcp.json";

    fn candidates() -> Vec<PathBuf> {
        vec![FIRST.into(), SECOND.into(), THIRD.into()]
    }

    #[test]
    fn test_default_candidates_order() {
        let env = MockEnv::new().with_home("/home/dev");
        let found = default_candidates(Path::new("/work/project"), &env);
        assert_eq!(found, candidates());
    }

    #[test]
    fn test_env_var_overrides_home_fallback() {
        let env = MockEnv::new()
            .with_home("/home/dev")
            .with_var(CONFIG_ENV_VAR, "/etc/toolbridge/mcp.json");
        let found = default_candidates(Path::new("/work/project"), &env);
        assert_eq!(found.len(), 3);
        assert_eq!(found[2], PathBuf::from("/etc/toolbridge/mcp.json"));
    }

    #[test]
    fn test_no_home_no_fallback() {
        let found = default_candidates(Path::new("/work"), &MockEnv::new());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_resolve_returns_exact_spec() {
        let source = MockSource::new().with_file(
            FIRST,
            r#"{"demo": {"command": "echo", "args": ["ok"], "env": {"A": "1"}}}"#,
        );
        let locator = RegistryLocator::with_source(candidates(), source);

        let spec = locator.resolve("demo").unwrap();
        assert_eq!(
            spec,
            LaunchSpec::new("echo", vec!["ok".to_string()]).with_env("A", "1")
        );
    }

    #[test]
    fn test_invalid_first_falls_back_to_second() {
        let source = MockSource::new()
            .with_file(FIRST, "{ not json")
            .with_file(SECOND, r#"{"demo": {"command": "second"}}"#)
            .with_file(THIRD, r#"{"demo": {"command": "third"}}"#);
        let locator = RegistryLocator::with_source(candidates(), source);

        let (registry, path) = locator.load().unwrap();
        assert_eq!(path, PathBuf::from(SECOND));
        assert_eq!(registry.launch_spec("demo").unwrap().unwrap().command, "second");
    }

    #[test]
    fn test_unreadable_first_falls_back_to_second() {
        let source = MockSource::new()
            .with_unreadable(FIRST)
            .with_file(SECOND, r#"{"demo": {"command": "second"}}"#);
        let locator = RegistryLocator::with_source(candidates(), source);

        assert_eq!(locator.resolve("demo").unwrap().command, "second");
    }

    #[test]
    fn test_first_valid_file_wins_without_merging() {
        let source = MockSource::new()
            .with_file(FIRST, r#"{"a": {"command": "a"}}"#)
            .with_file(SECOND, r#"{"b": {"command": "b"}}"#);
        let locator = RegistryLocator::with_source(candidates(), source);

        let err = locator.resolve("b").unwrap_err();
        match err {
            BridgeErrorKind::ServerNotRegistered { available, .. } => {
                assert_eq!(available, vec!["a".to_string()]);
            }
            other => panic!("Expected ServerNotRegistered, got {other:?}"),
        }
    }

    #[test]
    fn test_later_candidates_not_read_after_success() {
        let source = MockSource::new().with_file(FIRST, r#"{"a": {"command": "a"}}"#);
        let reads = source.reads_handle();
        let locator = RegistryLocator::with_source(candidates(), source);
        locator.load().unwrap();

        assert_eq!(*reads.lock().unwrap(), vec![PathBuf::from(FIRST)]);
    }

    #[test]
    fn test_commandless_sibling_does_not_block_resolution() {
        let source = MockSource::new()
            .with_file(
                FIRST,
                r#"{"mcpServers": {
                    "remote": {"type": "http", "url": "https://example.com/mcp"},
                    "demo": {"command": "echo", "args": ["ok"]}
                }}"#,
            )
            .with_file(SECOND, r#"{"demo": {"command": "second"}}"#);
        let locator = RegistryLocator::with_source(candidates(), source);

        let spec = locator.resolve("demo").unwrap();
        assert_eq!(spec, LaunchSpec::new("echo", vec!["ok".to_string()]));
    }

    #[test]
    fn test_malformed_requested_entry_is_named() {
        let source = MockSource::new().with_file(
            FIRST,
            r#"{"remote": {"type": "http", "url": "https://example.com/mcp"}}"#,
        );
        let locator = RegistryLocator::with_source(candidates(), source);

        match locator.resolve("remote").unwrap_err() {
            BridgeErrorKind::InvalidServerEntry { server, reason } => {
                assert_eq!(server, "remote");
                assert!(reason.contains("command"));
            }
            other => panic!("Expected InvalidServerEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_server_not_registered_enumerates_names() {
        let source = MockSource::new().with_file(
            FIRST,
            r#"{"puppeteer": {"command": "npx"}, "context7": {"command": "npx"}}"#,
        );
        let locator = RegistryLocator::with_source(candidates(), source);

        let err = locator.resolve("missing-server").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing-server"));
        assert!(msg.contains("puppeteer"));
        assert!(msg.contains("context7"));
    }

    #[test]
    fn test_config_not_found_records_every_attempt() {
        let source = MockSource::new().with_file(THIRD, "[]");
        let locator = RegistryLocator::with_source(candidates(), source);

        match locator.load().unwrap_err() {
            BridgeErrorKind::ConfigNotFound { attempts } => {
                assert_eq!(attempts.len(), 3);
                assert_eq!(attempts[0].outcome, AttemptOutcome::NotFound);
                assert!(matches!(attempts[2].outcome, AttemptOutcome::InvalidJson(_)));
            }
            other => panic!("Expected ConfigNotFound, got {other:?}"),
        }
    }
}
