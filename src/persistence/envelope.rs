//! Stored session record
//!
//! JSON shape under the session key:
//! `{ data, startTime, lastUpdatedTime, title, version }`.
//! Early saves lack `lastUpdatedTime`, `title` and `version`, so every field
//! except `data` is optional on the way in.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::grid::GameSession;
use crate::platform::format_instant;

/// Current payload version written by this crate
pub const PAYLOAD_VERSION: u32 = 1;

/// Session as stored; optional fields are filled in by migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEnvelope {
    /// Full matrix including the header row
    pub data: Vec<Vec<String>>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub last_updated_time: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// 0 for saves made before versioning
    #[serde(default)]
    pub version: u32,
}

impl SessionEnvelope {
    /// Snapshot a live session
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            data: session.matrix.rows().to_vec(),
            start_time: Some(format_instant(session.start_time)),
            last_updated_time: Some(format_instant(session.last_updated_time)),
            title: Some(session.title.clone()),
            version: PAYLOAD_VERSION,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }
}
