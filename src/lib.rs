//! GDisc - keep score of disc golf games in the browser
//!
//! Core modules:
//! - `grid`: Score matrix, session state and the `ScoreGrid` component
//! - `persistence`: Versioned save/load of the session
//! - `platform`: Storage and clock abstraction (LocalStorage on web)
//! - `settings`: Shape of a fresh game and storage key
//! - `ui`: Render-agnostic table view for presentation shells

pub mod error;
pub mod grid;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod ui;

pub use error::{GridError, PayloadError, StoreError};
pub use grid::{GameSession, GridEvent, RestartKind, ScoreGrid, ScoreMatrix};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Key the session is stored under
    pub const SESSION_STORAGE_KEY: &str = "gDiscGridData";
    /// Title for a new game
    pub const DEFAULT_TITLE: &str = "GDisc: Keep score of your disc golf games";

    /// Holes per round
    pub const DEFAULT_ROUND_COUNT: usize = 9;
    pub const DEFAULT_PLAYER_COUNT: usize = 4;
    pub const MAX_ROUND_COUNT: usize = 36;
    pub const MAX_PLAYER_COUNT: usize = 12;

    /// Header labels around the round numbers
    pub const NAME_LABEL: &str = "Name";
    pub const TOTAL_LABEL: &str = "Total";
}
