//! CLI configuration: `~/.config/gamebox/cli.toml`
//! (`%APPDATA%\gamebox\cli.toml` on Windows).

use std::path::{Path, PathBuf};
use std::time::Duration;

use gamebox_library::{PresentationConfig, Session};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// API base URL.
    pub base_url: String,

    /// `name=value` cookie from the last login; empty when logged out.
    pub session_cookie: String,

    /// Cover shown for games without an image.
    pub fallback_image: String,

    pub request_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            session_cookie: String::new(),
            fallback_image: PresentationConfig::default().fallback_image,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CliConfig {
    /// Loads the config at `path`, writing the defaults there if it does
    /// not exist yet.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = CliConfig::default();
            config.save(path)?;
            tracing::info!(path = %path.display(), "created default config");
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Ok(CliConfig::default())
            }
        }
    }

    /// Writes the config to `path`. The file holds the session cookie, so
    /// it is readable by the owner only.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        set_permissions_0600(path);

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn session(&self) -> Session {
        Session::anonymous(self.base_url.as_str()).with_cookie(self.session_cookie.as_str())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn presentation(&self) -> PresentationConfig {
        PresentationConfig {
            fallback_image: self.fallback_image.clone(),
        }
    }
}

fn set_permissions_0600(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

pub fn default_config_path() -> PathBuf {
    config_base_dir().join("gamebox").join("cli.toml")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cli.toml");

        let config = CliConfig::load_or_create(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("base_url = \"http://localhost:5000\""));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        CliConfig::default().save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn round_trips_and_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(
            &path,
            "base_url = \"https://gamebox.example/\"\nsession_cookie = \"session=abc\"\n",
        )
        .unwrap();

        let config = CliConfig::load_or_create(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.fallback_image, "img/persona.png");

        let session = config.session();
        assert_eq!(session.base_url(), "https://gamebox.example");
        assert_eq!(session.cookie(), Some("session=abc"));

        let mut changed = config.clone();
        changed.session_cookie.clear();
        changed.save(&path).unwrap();
        let reloaded = CliConfig::load_or_create(&path).unwrap();
        assert_eq!(reloaded, changed);
        assert!(!reloaded.session().has_cookie());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        assert_eq!(
            CliConfig::load_or_create(&path).unwrap(),
            CliConfig::default()
        );
    }
}
