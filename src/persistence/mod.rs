//! Session save/load
//!
//! Features:
//! - Versioned JSON envelope
//! - Default-filling for older saves
//! - Structural validation (anything unusable reads as "no save")

pub mod envelope;
pub mod migration;

use chrono::{DateTime, Utc};

pub use envelope::{PAYLOAD_VERSION, SessionEnvelope};
pub use migration::into_session;

use crate::error::StoreError;
use crate::grid::GameSession;
use crate::platform::KeyValueStore;
use crate::settings::Settings;

/// Read the session under `settings.storage_key`.
///
/// Absent, unreadable or malformed saves all come back as `None`.
pub fn load_session(
    store: &dyn KeyValueStore,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Option<GameSession> {
    let json = match store.get(&settings.storage_key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read saved game: {}", e);
            return None;
        }
    };

    match SessionEnvelope::from_json(&json).and_then(|env| into_session(env, settings, now)) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Discarding saved game: {}", e);
            None
        }
    }
}

/// Write the whole session in a single `set`
pub fn save_session(
    store: &mut dyn KeyValueStore,
    settings: &Settings,
    session: &GameSession,
) -> Result<(), StoreError> {
    let json = SessionEnvelope::from_session(session).to_json()?;
    store.set(&settings.storage_key, &json)?;
    log::debug!("Game saved ({} bytes)", json.len());
    Ok(())
}
