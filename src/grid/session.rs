//! Game session state and its restart transitions
//!
//! Everything that gets persisted lives here. Transitions take `now`
//! explicitly so they stay pure.

use chrono::{DateTime, Utc};

use super::matrix::ScoreMatrix;
use crate::settings::Settings;

/// Which restart a player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartKind {
    /// New game: names, scores and title all discarded
    Full,
    /// New game with the same players: names and title kept
    SamePlayers,
    /// Scores cleared in place: names and title kept
    ScoresOnly,
}

/// Score matrix plus title and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub matrix: ScoreMatrix,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub last_updated_time: DateTime<Utc>,
}

impl GameSession {
    /// Fresh session from settings, both timestamps at `now`
    pub fn new(settings: &Settings, now: DateTime<Utc>) -> Self {
        Self {
            matrix: ScoreMatrix::new(settings.round_count, settings.player_count),
            title: settings.default_title.clone(),
            start_time: now,
            last_updated_time: now,
        }
    }

    /// Stamp a mutation. The update time never moves backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated_time = now.max(self.last_updated_time);
    }

    /// Apply a restart and stamp a new start time
    pub fn restart(&mut self, kind: RestartKind, settings: &Settings, now: DateTime<Utc>) {
        match kind {
            RestartKind::Full => {
                *self = Self::new(settings, now);
                return;
            }
            RestartKind::SamePlayers => {
                let names = self.matrix.player_names();
                self.matrix = ScoreMatrix::with_names(settings.round_count, names);
            }
            RestartKind::ScoresOnly => self.matrix.clear_scores(),
        }
        self.start_time = now;
        self.last_updated_time = now;
    }
}
