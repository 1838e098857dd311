//! Change notifications for whoever renders the grid

use super::session::RestartKind;

/// Something about the grid changed; re-query and redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// A round cell (and that row's total) changed
    CellChanged { row: usize, col: usize },
    NameChanged { row: usize },
    TitleChanged,
    /// The whole matrix was replaced or cleared
    Restarted(RestartKind),
    /// The latest state could not be written to storage
    SaveFailed,
}

impl GridEvent {
    /// Whether the event means the table layout may have changed
    pub fn needs_full_redraw(&self) -> bool {
        matches!(self, GridEvent::Restarted(_))
    }
}
