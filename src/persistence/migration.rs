//! Turn a stored envelope into a live session
//!
//! Only `data` is required. Missing or unreadable timestamps become the
//! load instant and a missing or empty title becomes the default title.

use chrono::{DateTime, Utc};

use super::envelope::SessionEnvelope;
use crate::error::PayloadError;
use crate::grid::{GameSession, MatrixShapeError, ScoreMatrix};
use crate::platform::parse_instant;
use crate::settings::Settings;

impl From<MatrixShapeError> for PayloadError {
    fn from(e: MatrixShapeError) -> Self {
        match e {
            MatrixShapeError::Empty => PayloadError::EmptyMatrix,
            MatrixShapeError::TooFewColumns(n) => PayloadError::TooFewColumns(n),
            MatrixShapeError::Ragged { row, len, expected } => {
                PayloadError::RaggedRow { row, len, expected }
            }
        }
    }
}

/// Build a session from a stored envelope, filling defaults
pub fn into_session(
    envelope: SessionEnvelope,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<GameSession, PayloadError> {
    let matrix = ScoreMatrix::from_rows(envelope.data)?;

    let start_time = instant_or(envelope.start_time.as_deref(), "startTime", now);
    let last_updated_time =
        instant_or(envelope.last_updated_time.as_deref(), "lastUpdatedTime", now);

    let title = match envelope.title {
        Some(title) if !title.is_empty() => title,
        _ => settings.default_title.clone(),
    };

    Ok(GameSession {
        matrix,
        title,
        start_time,
        last_updated_time,
    })
}

fn instant_or(text: Option<&str>, field: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    match text {
        Some(text) => parse_instant(text).unwrap_or_else(|| {
            log::warn!("Unreadable {} {:?}, using now", field, text);
            now
        }),
        None => now,
    }
}
