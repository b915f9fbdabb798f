//! Configuration schema and file discovery.
//!
//! The discovery order is:
//! 1. An explicit path passed by the caller (must exist).
//! 2. `TOOLRELAY_CONFIG` environment variable.
//! 3. `~/.toolrelay/config.json`
//! 4. If none found, defaults are used.
//!
//! Keys may be written in snake_case or camelCase.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};
use crate::invocation::InvocationContext;
use crate::model::ModelHandle;
use crate::secret::SecretString;

/// Environment variable that points at a config file.
pub const CONFIG_ENV_VAR: &str = "TOOLRELAY_CONFIG";

/// Default instructions given to the agent.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant that can access GitHub \
on behalf of the user. Use the available tools to answer questions and perform actions. \
If a tool result contains \"authorizationRequired\": true, show the returned url to the \
user and ask them to open it to grant access, then retry once they confirm.";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tool-hosting platform connection.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// The single agent this process assembles.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Connection settings for the tool-hosting platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_base_url", alias = "baseUrl")]
    pub base_url: String,

    /// API key. Takes precedence over `api_key_env`.
    #[serde(default, alias = "apiKey")]
    pub api_key: SecretString,

    /// Environment variable consulted when `api_key` is empty.
    #[serde(default = "default_api_key_env", alias = "apiKeyEnv")]
    pub api_key_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Maximum number of tool definitions requested from the catalog.
    #[serde(default = "default_page_limit", alias = "pageLimit")]
    pub page_limit: u32,
}

fn default_base_url() -> String {
    "https://api.arcade.dev".into()
}

fn default_api_key_env() -> String {
    "TOOLRELAY_API_KEY".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    100
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: SecretString::default(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
        }
    }
}

impl PlatformConfig {
    /// Resolve the API key from config or the environment.
    pub fn resolve_api_key(&self) -> Result<SecretString> {
        if !self.api_key.is_empty() {
            return Ok(self.api_key.clone());
        }
        SecretString::from_env(&self.api_key_env).ok_or_else(|| RelayError::ConfigInvalid {
            reason: format!(
                "no platform API key: set platform.api_key or the {} env var",
                self.api_key_env
            ),
        })
    }
}

/// How to treat two catalog entries that share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one.
    #[default]
    Replace,
    /// Assembly fails.
    Reject,
}

/// Agent definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name shown to the orchestration runtime.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// System instructions for the model.
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Version-pinned model identifier.
    #[serde(default)]
    pub model: ModelHandle,

    /// Toolkit to fetch from the platform. `None` fetches every toolkit.
    #[serde(default = "default_toolkit")]
    pub toolkit: Option<String>,

    /// Platform user the agent acts for when no override is given.
    #[serde(default, alias = "userId")]
    pub user_id: String,

    /// Duplicate tool name handling.
    #[serde(default, alias = "duplicatePolicy")]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_agent_name() -> String {
    "github-agent".into()
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.into()
}

fn default_toolkit() -> Option<String> {
    Some("github".into())
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            instructions: default_instructions(),
            model: ModelHandle::default(),
            toolkit: default_toolkit(),
            user_id: String::new(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl AgentConfig {
    /// Build the invocation context, preferring `user_override`.
    pub fn invocation_context(&self, user_override: Option<&str>) -> Result<InvocationContext> {
        let user = user_override.unwrap_or(&self.user_id);
        if user.is_empty() {
            return Err(RelayError::ConfigInvalid {
                reason: "no user id: set agent.user_id or pass --user".into(),
            });
        }
        Ok(InvocationContext::new(user))
    }
}

/// Find the config file path.
///
/// `env_value` is the value of [`CONFIG_ENV_VAR`], if set. Returns `None`
/// when nothing applies and the home-directory file does not exist.
pub fn discover_config_path(env_value: Option<String>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = env_value.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let candidate = home_dir?.join(".toolrelay").join("config.json");
    candidate.exists().then_some(candidate)
}

/// Load configuration from `path_override` or via discovery.
pub fn load_config(path_override: Option<&Path>) -> Result<Config> {
    let path = match path_override {
        Some(p) => {
            if !p.exists() {
                return Err(RelayError::ConfigNotFound(p.display().to_string()));
            }
            p.to_path_buf()
        }
        None => {
            let env_value = std::env::var(CONFIG_ENV_VAR).ok();
            match discover_config_path(env_value, dirs::home_dir()) {
                Some(p) if p.exists() => p,
                Some(p) => {
                    tracing::warn!(path = %p.display(), "config path does not exist, using defaults");
                    return Ok(Config::default());
                }
                None => {
                    tracing::info!("no config file found, using defaults");
                    return Ok(Config::default());
                }
            }
        }
    };

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(&path)?;
    parse_config(&contents)
}

/// Parse a config document.
pub fn parse_config(contents: &str) -> Result<Config> {
    Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.platform.base_url, "https://api.arcade.dev");
        assert_eq!(cfg.platform.api_key_env, "TOOLRELAY_API_KEY");
        assert_eq!(cfg.platform.timeout_secs, 30);
        assert_eq!(cfg.platform.page_limit, 100);
        assert_eq!(cfg.agent.name, "github-agent");
        assert_eq!(cfg.agent.toolkit.as_deref(), Some("github"));
        assert_eq!(cfg.agent.duplicate_policy, DuplicatePolicy::Replace);
        assert!(cfg.agent.instructions.contains("authorizationRequired"));
    }

    #[test]
    fn camel_case_aliases_accepted() {
        let cfg = parse_config(
            r#"{
                "platform": { "baseUrl": "http://localhost:9000", "apiKey": "k", "pageLimit": 5 },
                "agent": { "userId": "dev@example.com", "duplicatePolicy": "reject",
                           "model": "anthropic/claude-sonnet-4-5" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.platform.base_url, "http://localhost:9000");
        assert_eq!(cfg.platform.api_key.expose(), "k");
        assert_eq!(cfg.platform.page_limit, 5);
        assert_eq!(cfg.agent.user_id, "dev@example.com");
        assert_eq!(cfg.agent.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(cfg.agent.model.provider, "anthropic");
    }

    #[test]
    fn null_toolkit_fetches_everything() {
        let cfg = parse_config(r#"{"agent": {"toolkit": null}}"#).unwrap();
        assert!(cfg.agent.toolkit.is_none());
    }

    #[test]
    fn invalid_model_is_a_parse_error() {
        let err = parse_config(r#"{"agent": {"model": "gpt-4o"}}"#).unwrap_err();
        assert!(matches!(err, RelayError::Json(_)));
    }

    #[test]
    fn explicit_api_key_wins() {
        let platform = PlatformConfig {
            api_key: "explicit".into(),
            api_key_env: "TOOLRELAY_TEST_KEY_A".into(),
            ..Default::default()
        };
        temp_env::with_var("TOOLRELAY_TEST_KEY_A", Some("from-env"), || {
            assert_eq!(platform.resolve_api_key().unwrap().expose(), "explicit");
        });
    }

    #[test]
    fn api_key_falls_back_to_env() {
        let platform = PlatformConfig {
            api_key_env: "TOOLRELAY_TEST_KEY_B".into(),
            ..Default::default()
        };
        temp_env::with_var("TOOLRELAY_TEST_KEY_B", Some("from-env"), || {
            assert_eq!(platform.resolve_api_key().unwrap().expose(), "from-env");
        });
        temp_env::with_var_unset("TOOLRELAY_TEST_KEY_B", || {
            let err = platform.resolve_api_key().unwrap_err();
            assert!(err.to_string().contains("TOOLRELAY_TEST_KEY_B"));
        });
    }

    #[test]
    fn invocation_context_prefers_override() {
        let agent = AgentConfig {
            user_id: "configured".into(),
            ..Default::default()
        };
        assert_eq!(agent.invocation_context(None).unwrap().user_id, "configured");
        assert_eq!(agent.invocation_context(Some("cli")).unwrap().user_id, "cli");
    }

    #[test]
    fn invocation_context_requires_user() {
        let agent = AgentConfig::default();
        assert!(agent.invocation_context(None).is_err());
    }

    #[test]
    fn discover_prefers_env_value() {
        let found = discover_config_path(Some("/etc/toolrelay.json".into()), None);
        assert_eq!(found, Some(PathBuf::from("/etc/toolrelay.json")));
    }

    #[test]
    fn discover_checks_home_file() {
        let home = tempfile::tempdir().unwrap();
        assert!(discover_config_path(None, Some(home.path().to_path_buf())).is_none());

        let dir = home.path().join(".toolrelay");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.json"), "{}").unwrap();
        let found = discover_config_path(None, Some(home.path().to_path_buf())).unwrap();
        assert!(found.ends_with(".toolrelay/config.json"));
    }

    #[test]
    fn load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"agent": {{"name": "octo"}}}}"#).unwrap();
        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.agent.name, "octo");
    }

    #[test]
    fn load_missing_explicit_path_errors() {
        let err = load_config(Some(Path::new("/nonexistent/toolrelay.json"))).unwrap_err();
        assert!(matches!(err, RelayError::ConfigNotFound(_)));
    }

    #[test]
    fn config_dump_redacts_key() {
        let cfg = parse_config(r#"{"platform": {"apiKey": "secret-value"}}"#).unwrap();
        let dump = serde_json::to_string(&cfg).unwrap();
        assert!(!dump.contains("secret-value"));
    }
}
