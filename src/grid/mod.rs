//! Scorekeeping core
//!
//! Pure state lives in `matrix` and `session`; `score_grid` wires it to a
//! store and a clock. Nothing in here knows how the grid is drawn.

pub mod events;
pub mod matrix;
pub mod numeric;
pub mod score_grid;
pub mod session;

pub use events::GridEvent;
pub use matrix::{MatrixShapeError, ScoreMatrix, placeholder_name};
pub use numeric::{format_total, parse_score};
pub use score_grid::ScoreGrid;
pub use session::{GameSession, RestartKind};
