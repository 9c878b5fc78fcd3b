//! Configuration loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level formcraft configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormcraftConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Where `formcraft serve` listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// How the CLI reaches a running server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `formcraft.toml` in the current directory
/// 2. `~/.config/formcraft/config.toml`
///
/// Environment variable overrides: `FORMCRAFT_API_URL`, `FORMCRAFT_PORT`.
pub fn load_config_from(path: Option<&Path>) -> Result<FormcraftConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("formcraft.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FormcraftConfig::default(),
    };

    if let Ok(url) = std::env::var("FORMCRAFT_API_URL") {
        config.client.base_url = url;
    }
    if let Ok(port) = std::env::var("FORMCRAFT_PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("FORMCRAFT_PORT is not a port number: {port}"))?;
    }

    Ok(config)
}

/// Parse a TOML config string, resolving `${VAR}` references.
pub fn parse_config(content: &str) -> Result<FormcraftConfig> {
    let mut config: FormcraftConfig = toml::from_str(content)?;
    config.server.host = resolve_env_vars(&config.server.host);
    config.client.base_url = resolve_env_vars(&config.client.base_url);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("formcraft"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Tests touching FORMCRAFT_* variables must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("formcraft.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_FORMCRAFT_TEST_VAR", "forms.local");
        assert_eq!(resolve_env_vars("${_FORMCRAFT_TEST_VAR}"), "forms.local");
        assert_eq!(
            resolve_env_vars("http://${_FORMCRAFT_TEST_VAR}:8080"),
            "http://forms.local:8080"
        );
        std::env::remove_var("_FORMCRAFT_TEST_VAR");
    }

    #[test]
    fn unterminated_reference_is_left_alone() {
        assert_eq!(resolve_env_vars("http://${HOST"), "http://${HOST");
    }

    #[test]
    fn default_config() {
        let config = FormcraftConfig::default();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.client.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
[server]
port = 8080

[client]
base_url = "http://forms.internal:8080"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.client.base_url, "http://forms.internal:8080");
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nhost = \"0.0.0.0\"\n");
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn substituted_value_is_not_rescanned() {
        std::env::set_var("_FORMCRAFT_SELF_REF", "${_FORMCRAFT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a-${_FORMCRAFT_SELF_REF}-b"),
            "a-${_FORMCRAFT_SELF_REF}-b"
        );
        std::env::remove_var("_FORMCRAFT_SELF_REF");
    }

    #[test]
    fn missing_variable_resolves_to_empty() {
        assert_eq!(resolve_env_vars("x${_FORMCRAFT_UNSET_VAR}y"), "xy");
    }

    #[test]
    fn host_reference_resolves_through_parse() {
        std::env::set_var("_FORMCRAFT_TEST_HOST", "10.0.0.7");
        let config = parse_config("[server]\nhost = \"${_FORMCRAFT_TEST_HOST}\"\n").unwrap();
        assert_eq!(config.server.host, "10.0.0.7");
        assert_eq!(config.server.bind_addr(), "10.0.0.7:3000");
        std::env::remove_var("_FORMCRAFT_TEST_HOST");
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[server]\nport = 8080\n\n[client]\nbase_url = \"http://file.local:8080\"\n",
        );

        std::env::set_var("FORMCRAFT_API_URL", "http://env.local:9000");
        std::env::set_var("FORMCRAFT_PORT", "9000");
        let config = load_config_from(Some(&path));
        std::env::remove_var("FORMCRAFT_API_URL");
        std::env::remove_var("FORMCRAFT_PORT");

        let config = config.unwrap();
        assert_eq!(config.client.base_url, "http://env.local:9000");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn non_numeric_port_override_fails() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 8080\n");

        std::env::set_var("FORMCRAFT_PORT", "eighty");
        let result = load_config_from(Some(&path));
        std::env::remove_var("FORMCRAFT_PORT");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("is not a port number"), "{err:#}");
    }
}
