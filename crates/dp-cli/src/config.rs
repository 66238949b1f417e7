//! Configuration loading and management.

use std::path::{Path, PathBuf};

use dp_store::DocumentPaths;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Task list document.
    pub tasks_path: PathBuf,

    /// Activity log document (date to entries).
    pub logs_path: PathBuf,

    /// Meeting list document.
    pub meetings_path: PathBuf,

    /// Start of working hours, `HH:MM` local time.
    pub work_start: String,

    /// End of working hours, `HH:MM` local time.
    pub work_end: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            tasks_path: data_dir.join("tasks.yaml"),
            logs_path: data_dir.join("logs.yaml"),
            meetings_path: data_dir.join("meetings.yaml"),
            work_start: "09:00".to_string(),
            work_end: "17:00".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DP_*)
        figment = figment.merge(Env::prefixed("DP_"));

        figment.extract()
    }

    /// The three source documents.
    pub fn documents(&self) -> DocumentPaths {
        DocumentPaths {
            tasks: self.tasks_path.clone(),
            logs: self.logs_path.clone(),
            meetings: self.meetings_path.clone(),
        }
    }
}

/// Returns the platform-specific config directory for dayplan.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dayplan"))
}

/// Returns the platform-specific data directory for dayplan.
///
/// On Linux: `~/.local/share/dayplan`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("dayplan"))
}
