//! Configuration system for Folio.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/folio/config.toml` and/or `.folio/config.toml`
//! in the sandbox root.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Top-level configuration for the Folio shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    pub shell: ShellConfig,
    pub ui: UiConfig,
    pub network: NetworkConfig,
    pub profile: ProfileConfig,
}

/// Prompt identity and the text shown before the first command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// User name shown in the prompt and by `whoami`.
    pub user: String,
    /// Host name shown in the prompt.
    pub host: String,
    /// Whether to show the ASCII banner at the top of the transcript.
    pub show_banner: bool,
    /// Greeting shown under the banner until the first `clear`.
    pub greeting: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "folio".to_string(),
            show_banner: true,
            greeting: "Welcome to the Folio portfolio shell!\n\n\
                Navigation:\n\
                • Use the arrow keys to browse command history\n\
                • Use Page Up/Page Down or the mouse wheel to scroll\n\
                • Press Tab to complete commands and file names\n\
                • Type 'help' to see all available commands\n\n\
                Get started with 'ls' to explore or 'help' for guidance."
                .to_string(),
        }
    }
}

/// Terminal UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme name.
    pub theme: String,
    /// Whether to use the TUI (false = simple REPL).
    pub use_tui: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            use_tui: true,
        }
    }
}

/// Settings for the network collaborators behind `wiki` and `joke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of the Wikipedia REST summary endpoint; the title is appended.
    pub wiki_endpoint: String,
    pub joke_endpoint: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("Folio/{}", env!("CARGO_PKG_VERSION")),
            wiki_endpoint: "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            joke_endpoint: "https://icanhazdadjoke.com/".to_string(),
        }
    }
}

/// Content for the `skills` and `contact` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub skills: Vec<String>,
    /// `(label, value)` pairs rendered as aligned lines.
    pub contact: Vec<(String, String)>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Folio".to_string(),
            skills: vec![
                "Rust Programming".to_string(),
                "Terminal/CLI Development".to_string(),
                "Web Development".to_string(),
                "Game Development".to_string(),
                "LLMs (Large Language Models)".to_string(),
            ],
            contact: vec![
                ("GitHub".to_string(), "github.com/DevJadhav".to_string()),
                ("Email".to_string(), "hello@folio.dev".to_string()),
            ],
        }
    }
}

impl FolioConfig {
    /// Reject values the shell cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.ui.theme.as_str(), "dark" | "light") {
            return Err(ConfigError::Invalid {
                message: format!("unknown theme '{}'", self.ui.theme),
            });
        }
        if self.shell.user.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "shell.user must not be empty".to_string(),
            });
        }
        if self.network.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "network.timeout_secs must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `FOLIO_`)
/// 3. An explicit config file, if given
/// 4. Root-local config (`.folio/config.toml`)
/// 5. User config (`~/.config/folio/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    root: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&FolioConfig>,
) -> Result<FolioConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(FolioConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(root) = root {
        let local = root.join(".folio").join("config.toml");
        if local.exists() {
            figment = figment.merge(Toml::file(&local));
        }
    }

    if let Some(file) = config_file {
        if !file.exists() {
            return Err(ConfigError::FileNotFound {
                path: file.to_path_buf(),
            });
        }
        figment = figment.merge(Toml::file(file));
    }

    // Environment variables (FOLIO_UI__THEME, FOLIO_SHELL__USER, etc.)
    figment = figment.merge(Env::prefixed("FOLIO_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config: FolioConfig = figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// `~/.config/folio/config.toml` (via the `directories` crate).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "folio", "folio")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.shell.user, "guest");
        assert_eq!(config.shell.host, "folio");
        assert_eq!(config.ui.theme, "dark");
        assert!(config.ui.use_tui);
        assert_eq!(config.network.timeout_secs, 10);
        assert!(!config.profile.skills.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FolioConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = FolioConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: FolioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.shell.user, config.shell.user);
        assert_eq!(deserialized.profile.contact, config.profile.contact);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = FolioConfig::default();
        overrides.shell.user = "visitor".to_string();
        overrides.ui.theme = "light".to_string();

        let config = load_config(None, None, Some(&overrides)).unwrap();
        assert_eq!(config.shell.user, "visitor");
        assert_eq!(config.ui.theme, "light");
    }

    #[test]
    fn test_load_config_from_root() {
        let dir = tempfile::tempdir().unwrap();
        let folio_dir = dir.path().join(".folio");
        std::fs::create_dir_all(&folio_dir).unwrap();
        std::fs::write(
            folio_dir.join("config.toml"),
            r#"
[shell]
host = "portfolio"

[network]
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None, None).unwrap();
        assert_eq!(config.shell.host, "portfolio");
        assert_eq!(config.network.timeout_secs, 3);
        // Untouched sections keep their defaults
        assert_eq!(config.shell.user, "guest");
    }

    #[test]
    fn test_load_config_explicit_file_missing() {
        let err = load_config(None, Some(Path::new("/definitely/not/here.toml")), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_config_rejects_unknown_theme() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("folio.toml");
        std::fs::write(&file, "[ui]\ntheme = \"solarized\"\n").unwrap();
        let err = load_config(None, Some(&file), None).unwrap_err();
        assert!(err.to_string().contains("solarized"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FolioConfig::default();
        config.network.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
