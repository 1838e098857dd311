//! The scorekeeping grid
//!
//! Owns the live session, writes it to the store after every change and
//! tells subscribers what changed. Rendering is somebody else's job.

use chrono::{DateTime, Utc};

use super::events::GridEvent;
use super::matrix::ScoreMatrix;
use super::session::{GameSession, RestartKind};
use crate::error::{GridError, StoreError};
use crate::persistence::{load_session, save_session};
use crate::platform::{Clock, KeyValueStore, SystemClock};
use crate::settings::Settings;

type Listener = Box<dyn FnMut(&GridEvent)>;

/// Score matrix, title and timestamps backed by a key-value store
pub struct ScoreGrid<S: KeyValueStore, C: Clock = SystemClock> {
    session: GameSession,
    settings: Settings,
    store: S,
    clock: C,
    listeners: Vec<Listener>,
    last_save_error: Option<StoreError>,
}

impl<S: KeyValueStore> ScoreGrid<S, SystemClock> {
    /// Open the grid with settings read from the same store
    pub fn new(store: S) -> Self {
        let settings = Settings::load(&store);
        Self::with_clock(store, settings, SystemClock)
    }

    pub fn with_settings(store: S, settings: Settings) -> Self {
        Self::with_clock(store, settings, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ScoreGrid<S, C> {
    /// Restore the saved session, or start (and save) a fresh one
    pub fn with_clock(store: S, settings: Settings, clock: C) -> Self {
        let settings = settings.sanitized();
        let now = clock.now();

        let restored = load_session(&store, &settings, now);
        let fresh = restored.is_none();
        let session = restored.unwrap_or_else(|| GameSession::new(&settings, now));

        let mut grid = Self {
            session,
            settings,
            store,
            clock,
            listeners: Vec::new(),
            last_save_error: None,
        };

        if fresh {
            log::info!("No saved game found, starting fresh");
            grid.persist();
        } else {
            log::info!(
                "Loaded saved game ({} players, {} rounds)",
                grid.session.matrix.player_count(),
                grid.session.matrix.round_count()
            );
        }
        grid
    }

    // === Mutations ===

    /// Store raw text in a round cell and recompute that player's total
    pub fn set_cell_value(&mut self, row: usize, col: usize, text: &str) -> Result<(), GridError> {
        if let Err(e) = self.session.matrix.set_score(row, col, text) {
            log::warn!("Rejected score edit: {}", e);
            return Err(e);
        }
        self.commit(GridEvent::CellChanged { row, col });
        Ok(())
    }

    pub fn set_player_name(&mut self, row: usize, text: &str) -> Result<(), GridError> {
        if let Err(e) = self.session.matrix.set_name(row, text) {
            log::warn!("Rejected name edit: {}", e);
            return Err(e);
        }
        self.commit(GridEvent::NameChanged { row });
        Ok(())
    }

    pub fn set_title(&mut self, text: &str) {
        self.session.title = text.to_string();
        self.commit(GridEvent::TitleChanged);
    }

    /// New game: default players, blank scores, default title
    pub fn reset(&mut self) {
        self.restart(RestartKind::Full);
    }

    /// New game with the same players (and title)
    pub fn start_new_game(&mut self) {
        self.restart(RestartKind::SamePlayers);
    }

    /// Clear every score, keeping players and title
    pub fn reset_score(&mut self) {
        self.restart(RestartKind::ScoresOnly);
    }

    /// Register a callback run after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Queries ===

    pub fn title(&self) -> &str {
        &self.session.title
    }

    pub fn last_updated_time(&self) -> DateTime<Utc> {
        self.session.last_updated_time
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.session.start_time
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.session.matrix
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player_names(&self) -> Vec<String> {
        self.session.matrix.player_names()
    }

    pub fn player_count(&self) -> usize {
        self.session.matrix.player_count()
    }

    pub fn round_count(&self) -> usize {
        self.session.matrix.round_count()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.session.matrix.cell(row, col)
    }

    pub fn total(&self, row: usize) -> Option<&str> {
        self.session.matrix.total(row)
    }

    /// Whether the latest state reached the store
    pub fn is_saved(&self) -> bool {
        self.last_save_error.is_none()
    }

    pub fn last_save_error(&self) -> Option<&StoreError> {
        self.last_save_error.as_ref()
    }

    // === Internals ===

    fn restart(&mut self, kind: RestartKind) {
        let now = self.clock.now().max(self.session.last_updated_time);
        self.session.restart(kind, &self.settings, now);
        log::info!("Game restarted ({:?})", kind);
        self.persist();
        self.notify(GridEvent::Restarted(kind));
    }

    fn commit(&mut self, event: GridEvent) {
        self.session.touch(self.clock.now());
        self.persist();
        self.notify(event);
    }

    fn persist(&mut self) {
        match save_session(&mut self.store, &self.settings, &self.session) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                log::warn!("Changes not saved: {}", e);
                self.last_save_error = Some(e);
                self.notify(GridEvent::SaveFailed);
            }
        }
    }

    fn notify(&mut self, event: GridEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
