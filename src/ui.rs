//! Table view for presentation shells
//!
//! Shells build their widgets from `TableView` instead of poking at the
//! matrix directly, so the DOM shell and the text shell agree on which
//! cells are editable.

use chrono::{DateTime, Utc};

use crate::grid::ScoreMatrix;

/// What a body cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Name,
    Score,
    Total,
}

impl CellKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            CellKind::Name => "name-cell",
            CellKind::Score => "score-cell",
            CellKind::Total => "total-cell",
        }
    }

    /// HTML input type for the cell
    pub fn input_type(&self) -> &'static str {
        match self {
            CellKind::Name => "text",
            CellKind::Score | CellKind::Total => "number",
        }
    }

    pub fn editable(&self) -> bool {
        !matches!(self, CellKind::Total)
    }
}

/// Grid mutation an edited input feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Name { row: usize },
    Score { row: usize, col: usize },
}

impl EditTarget {
    /// `data-*` attributes that identify the input in the page
    pub fn attrs(&self) -> Vec<(&'static str, String)> {
        match *self {
            EditTarget::Name { row } => vec![("data-row", row.to_string())],
            EditTarget::Score { row, col } => vec![
                ("data-row", row.to_string()),
                ("data-col", col.to_string()),
            ],
        }
    }

    /// Read back what `attrs` stamped; a missing `data-col` means a name cell
    pub fn from_attrs(row: Option<&str>, col: Option<&str>) -> Option<Self> {
        let row = row?.parse().ok()?;
        match col {
            None => Some(EditTarget::Name { row }),
            Some(col) => Some(EditTarget::Score {
                row,
                col: col.parse().ok()?,
            }),
        }
    }
}

/// One body cell with its matrix address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    pub value: String,
}

impl CellView {
    /// Totals are derived, so they have no edit target
    pub fn edit_target(&self) -> Option<EditTarget> {
        match self.kind {
            CellKind::Name => Some(EditTarget::Name { row: self.row }),
            CellKind::Score => Some(EditTarget::Score {
                row: self.row,
                col: self.col,
            }),
            CellKind::Total => None,
        }
    }
}

/// Header labels plus classified player rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellView>>,
}

impl TableView {
    pub fn from_matrix(matrix: &ScoreMatrix) -> Self {
        let total_col = matrix.total_column();
        let rows = matrix
            .player_rows()
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, value)| CellView {
                        row: i + 1,
                        col,
                        kind: match col {
                            0 => CellKind::Name,
                            c if c == total_col => CellKind::Total,
                            _ => CellKind::Score,
                        },
                        value: value.clone(),
                    })
                    .collect()
            })
            .collect();

        Self {
            header: matrix.header().to_vec(),
            rows,
        }
    }

    /// Plain-text table with aligned columns
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for cell in row {
                let w = cell.value.chars().count();
                if let Some(slot) = widths.get_mut(cell.col) {
                    *slot = (*slot).max(w);
                }
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = line(self.header.iter().map(String::as_str).collect());
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row.iter().map(|c| c.value.as_str()).collect()));
        }
        out
    }
}

/// "Game started" / "Last updated" lines, formatted by the shell
pub fn time_info_lines(
    start: DateTime<Utc>,
    updated: DateTime<Utc>,
    format: impl Fn(DateTime<Utc>) -> String,
) -> [String; 2] {
    [
        format!("Game started: {}", format(start)),
        format!("Last updated: {}", format(updated)),
    ]
}
