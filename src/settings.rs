//! Grid settings
//!
//! Persisted separately from the game session, through the same store.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PLAYER_COUNT, DEFAULT_ROUND_COUNT, DEFAULT_TITLE, MAX_PLAYER_COUNT, MAX_ROUND_COUNT,
    SESSION_STORAGE_KEY,
};
use crate::error::StoreError;
use crate::platform::KeyValueStore;

/// Shape of a fresh game and where it is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Round (hole) columns in a fresh matrix
    pub round_count: usize,
    /// Player rows in a fresh matrix
    pub player_count: usize,
    /// Title used for new sessions and when a stored title is missing
    pub default_title: String,
    /// Key the session is stored under
    pub storage_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_count: DEFAULT_ROUND_COUNT,
            player_count: DEFAULT_PLAYER_COUNT,
            default_title: DEFAULT_TITLE.to_string(),
            storage_key: SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Storage key for the settings themselves
    pub const STORAGE_KEY: &'static str = "gdisc_settings";

    /// Clamp counts into range and repair an empty storage key
    pub fn sanitized(mut self) -> Self {
        self.round_count = self.round_count.clamp(1, MAX_ROUND_COUNT);
        self.player_count = self.player_count.clamp(1, MAX_PLAYER_COUNT);
        if self.storage_key.trim().is_empty() || self.storage_key == Self::STORAGE_KEY {
            self.storage_key = SESSION_STORAGE_KEY.to_string();
        }
        self
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.round_count, 9);
        assert_eq!(s.player_count, 4);
        assert_eq!(s.default_title, "GDisc: Keep score of your disc golf games");
        assert_eq!(s.storage_key, "gDiscGridData");
    }

    #[test]
    fn test_load_missing_or_garbage_uses_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
        store.seed(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            round_count: 18,
            player_count: 2,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_session_key_cannot_shadow_settings_key() {
        let store = MemoryStore::new();
        store.seed(
            Settings::STORAGE_KEY,
            r#"{"storage_key": "gdisc_settings", "player_count": 2}"#,
        );
        let s = Settings::load(&store);
        assert_eq!(s.storage_key, SESSION_STORAGE_KEY);
        assert_eq!(s.player_count, 2);
    }

    #[test]
    fn test_partial_and_out_of_range_values() {
        let store = MemoryStore::new();
        store.seed(
            Settings::STORAGE_KEY,
            r#"{"round_count": 0, "player_count": 500, "storage_key": " "}"#,
        );
        let s = Settings::load(&store);
        assert_eq!(s.round_count, 1);
        assert_eq!(s.player_count, MAX_PLAYER_COUNT);
        assert_eq!(s.storage_key, SESSION_STORAGE_KEY);
        assert_eq!(s.default_title, DEFAULT_TITLE);
    }
}
