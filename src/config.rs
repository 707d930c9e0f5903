//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `DUKA_WORK_DIR` and `DUKA_LOG_LEVEL` env overrides.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// File name of the persisted knowledge blob inside `work_dir`.
/// Matches the storage key the entries have always been kept under.
pub const DEFAULT_KNOWLEDGE_FILE: &str = "knowledge_base_entries.json";

const DEFAULT_USERS_FILE: &str = "config/users.json";

/// Gemini provider configuration.
/// Populated from `[llm.gemini]` in the TOML.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL of the generative-language API (no trailing slash).
    pub api_base_url: String,
    /// Model name interpolated into the `generateContent` path.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds, set on the client at build time.
    pub timeout_seconds: u64,
}

/// LLM subsystem configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"dummy"`, `"gemini"`).
    /// Maps to `default` in `[llm]` TOML — named `default` there to signal
    /// that other provider sections can coexist without being loaded.
    pub provider: String,
    /// Config for the Gemini provider (`[llm.gemini]`).
    pub gemini: GeminiConfig,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name of the shop, used in the console banner.
    pub store_name: String,
    /// Working directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    /// Path of the persisted knowledge blob (absolute, or resolved under `work_dir`).
    pub knowledge_file: PathBuf,
    /// Path of the credential store (absolute, or relative to the CWD like
    /// `config/default.toml` itself).
    pub users_file: PathBuf,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` env var — `None` for the keyless dummy
    /// provider. Never sourced from TOML.
    pub llm_api_key: Option<String>,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    store: RawStore,
    #[serde(default)]
    knowledge: RawKnowledge,
    #[serde(default)]
    auth: RawAuth,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawStore {
    name: String,
    work_dir: String,
    log_level: String,
}

#[derive(Deserialize, Default)]
struct RawKnowledge {
    /// Defaults to [`DEFAULT_KNOWLEDGE_FILE`] under `work_dir`.
    file: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawAuth {
    /// Defaults to `config/users.json` next to `default.toml`.
    users_file: Option<String>,
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGeminiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), gemini: RawGeminiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
    #[serde(default = "default_gemini_temperature")]
    temperature: f32,
    #[serde(default = "default_gemini_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            timeout_seconds: default_gemini_timeout_seconds(),
        }
    }
}

fn default_llm_provider() -> String { "dummy".to_string() }
fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String { "gemini-2.0-flash".to_string() }
fn default_gemini_temperature() -> f32 { 0.7 }
fn default_gemini_timeout_seconds() -> u64 { 30 }

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let work_dir_override = env::var("DUKA_WORK_DIR").ok();
    let log_level_override = env::var("DUKA_LOG_LEVEL").ok();
    load_from(
        Path::new("config/default.toml"),
        work_dir_override.as_deref(),
        log_level_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    work_dir_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let s = parsed.store;

    let work_dir_str = work_dir_override.unwrap_or(&s.work_dir).to_string();
    let work_dir = expand_home(&work_dir_str);
    let log_level = log_level_override.unwrap_or(&s.log_level).to_string();

    let knowledge_file = {
        let p = PathBuf::from(
            parsed.knowledge.file.as_deref().unwrap_or(DEFAULT_KNOWLEDGE_FILE),
        );
        if p.is_absolute() { p } else { work_dir.join(p) }
    };

    let users_file = PathBuf::from(
        parsed.auth.users_file.as_deref().unwrap_or(DEFAULT_USERS_FILE),
    );

    Ok(Config {
        store_name: s.name,
        work_dir,
        log_level,
        knowledge_file,
        users_file,
        llm: LlmConfig {
            provider: parsed.llm.provider,
            gemini: GeminiConfig {
                api_base_url: parsed.llm.gemini.api_base_url,
                model: parsed.llm.gemini.model,
                temperature: parsed.llm.gemini.temperature,
                timeout_seconds: parsed.llm.gemini.timeout_seconds,
            },
        },
        llm_api_key: env::var("LLM_API_KEY").ok(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default(work_dir: &Path) -> Self {
        Self {
            store_name: "test-shop".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            knowledge_file: work_dir.join(DEFAULT_KNOWLEDGE_FILE),
            users_file: work_dir.join("users.json"),
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0/v1beta".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[store]
name = "Duka Electronics"
work_dir = "~/.duka-bot"
log_level = "info"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_basic_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.store_name, "Duka Electronics");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.llm.provider, "dummy");
    }

    #[test]
    fn knowledge_file_defaults_under_work_dir() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("/tmp/duka-test"), None).unwrap();
        assert_eq!(
            cfg.knowledge_file,
            PathBuf::from("/tmp/duka-test").join(DEFAULT_KNOWLEDGE_FILE)
        );
    }

    #[test]
    fn absolute_knowledge_file_kept() {
        let toml = format!("{MINIMAL_TOML}\n[knowledge]\nfile = \"/var/lib/duka/kb.json\"\n");
        let f = write_toml(&toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.knowledge_file, PathBuf::from("/var/lib/duka/kb.json"));
    }

    #[test]
    fn gemini_section_parses() {
        let toml = format!(
            "{MINIMAL_TOML}\n[llm]\ndefault = \"gemini\"\n\n[llm.gemini]\nmodel = \"gemini-2.0-pro\"\ntimeout_seconds = 10\n"
        );
        let f = write_toml(&toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.llm.provider, "gemini");
        assert_eq!(cfg.llm.gemini.model, "gemini-2.0-pro");
        assert_eq!(cfg.llm.gemini.timeout_seconds, 10);
        // untouched fields keep their defaults
        assert!(cfg.llm.gemini.api_base_url.contains("generativelanguage"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.duka-bot");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".duka-bot"));
    }

    #[test]
    fn absolute_path_unchanged() {
        let p = expand_home("/absolute/path");
        assert_eq!(p, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn relative_path_unchanged() {
        let p = expand_home("relative/path");
        assert_eq!(p, PathBuf::from("relative/path"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn env_work_dir_override() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("/tmp/test-override"), None).unwrap();
        assert_eq!(cfg.work_dir, PathBuf::from("/tmp/test-override"));
    }

    #[test]
    fn env_log_level_override() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, Some("debug")).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }
}
