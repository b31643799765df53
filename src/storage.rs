use crate::config::Settings;
use crate::constants::CONFIG_DIR_NAME;
use crate::models::ActivityRecord;
use crate::stores::WalletStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "config.yaml";
const WALLET_FILE: &str = "wallet.yaml";
const ACTIVITY_EXPORT_FILE: &str = "activity.json";

/// Manages settings and the persisted wallet session on disk
#[derive(Clone, Debug)]
pub struct Storage {
    config_dir: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Storage { config_dir }
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Storage {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensure config directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("creating config directory {}", self.config_dir.display())
            })?;
        }
        Ok(())
    }

    /// Load settings; a missing or unreadable file yields defaults
    pub fn load_settings(&self) -> Settings {
        let path = self.config_dir.join(SETTINGS_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return Settings::default();
        };
        match serde_yaml::from_str::<Settings>(&content) {
            Ok(settings) => settings.normalized(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed settings");
                Settings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.ensure_dir()?;
        let path = self.config_dir.join(SETTINGS_FILE);
        let content = serde_yaml::to_string(settings)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Restore the last wallet session, if one was saved
    pub fn load_wallet(&self) -> Option<WalletStore> {
        let path = self.config_dir.join(WALLET_FILE);
        let content = fs::read_to_string(&path).ok()?;
        match serde_yaml::from_str::<WalletStore>(&content) {
            Ok(wallet) if wallet.is_connected => Some(wallet),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed wallet session");
                None
            }
        }
    }

    pub fn save_wallet(&self, wallet: &WalletStore) -> Result<()> {
        self.ensure_dir()?;
        let path = self.config_dir.join(WALLET_FILE);
        let content = serde_yaml::to_string(wallet)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn clear_wallet(&self) -> Result<()> {
        let path = self.config_dir.join(WALLET_FILE);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        }
        Ok(())
    }

    /// Write the activity history as pretty JSON and return the file path
    pub fn export_activity(&self, records: &[ActivityRecord]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.config_dir.join(ACTIVITY_EXPORT_FILE);
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::models::Theme;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_give_defaults() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path().join("nested"));
        assert_eq!(storage.load_settings(), Settings::default());
        assert!(storage.load_wallet().is_none());
    }

    #[test]
    fn test_settings_round_trip_creates_dir() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path().join("nested"));
        let settings = Settings {
            theme: Theme::System,
            failure_rate: 0.5,
            ..Default::default()
        };
        storage.save_settings(&settings).unwrap();
        assert_eq!(storage.load_settings(), settings);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "theme: [not, a, theme]").unwrap();
        let storage = Storage::with_dir(dir.path());
        assert_eq!(storage.load_settings(), Settings::default());
    }

    #[test]
    fn test_wallet_session_persists_until_cleared() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path());
        let mut wallet = WalletStore::default();
        wallet.connect("0xabc", 1);
        wallet.set_balance(99.5);
        storage.save_wallet(&wallet).unwrap();
        assert_eq!(storage.load_wallet(), Some(wallet));

        storage.clear_wallet().unwrap();
        assert!(storage.load_wallet().is_none());
        storage.clear_wallet().unwrap();
    }

    #[test]
    fn test_disconnected_wallet_is_not_restored() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path());
        storage.save_wallet(&WalletStore::default()).unwrap();
        assert!(storage.load_wallet().is_none());
    }

    #[test]
    fn test_export_activity_writes_json() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path());
        let path = storage.export_activity(&data::activity()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let parsed: Vec<ActivityRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[0].id, "tx_001");
    }
}
