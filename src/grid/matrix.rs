//! Score matrix: a header row followed by one row per player
//!
//! Layout of every row: `[name, round 1, .., round N, total]`.

use super::numeric::{format_total, sum_scores};
use crate::consts::{NAME_LABEL, TOTAL_LABEL};
use crate::error::GridError;

/// Why a stored matrix cannot be adopted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShapeError {
    /// No rows at all (not even a header)
    Empty,
    /// Fewer than a name and a total column
    TooFewColumns(usize),
    /// Row length differs from the header
    Ragged { row: usize, len: usize, expected: usize },
}

/// Text cells with a fixed header row and a derived total column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: Vec<Vec<String>>,
}

impl ScoreMatrix {
    /// Fresh matrix: placeholder names, blank rounds, zero totals
    pub fn new(round_count: usize, player_count: usize) -> Self {
        let names = (1..=player_count).map(placeholder_name);
        Self::with_names(round_count, names)
    }

    /// Fresh matrix with one row per given name
    pub fn with_names(round_count: usize, names: impl IntoIterator<Item = String>) -> Self {
        let mut rows = vec![header_row(round_count)];
        rows.extend(names.into_iter().map(|name| blank_row(name, round_count)));
        Self { rows }
    }

    /// Adopt rows from storage, checking shape and recomputing totals
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, MatrixShapeError> {
        let expected = rows.first().ok_or(MatrixShapeError::Empty)?.len();
        if expected < 2 {
            return Err(MatrixShapeError::TooFewColumns(expected));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(MatrixShapeError::Ragged {
                row,
                len: r.len(),
                expected,
            });
        }

        let mut matrix = Self { rows };
        for row in 1..=matrix.player_count() {
            matrix.recompute_total(row);
        }
        Ok(matrix)
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Player rows only (row 1 onwards)
    pub fn player_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    pub fn player_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// Columns per row (name + rounds + total)
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn round_count(&self) -> usize {
        self.column_count() - 2
    }

    pub fn total_column(&self) -> usize {
        self.column_count() - 1
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn player_name(&self, row: usize) -> Option<&str> {
        if row == 0 {
            return None;
        }
        self.cell(row, 0)
    }

    pub fn total(&self, row: usize) -> Option<&str> {
        if row == 0 {
            return None;
        }
        self.cell(row, self.total_column())
    }

    /// Names in row order
    pub fn player_names(&self) -> Vec<String> {
        self.player_rows().iter().map(|r| r[0].clone()).collect()
    }

    /// Store raw text in a round cell and refresh that row's total
    pub fn set_score(&mut self, row: usize, col: usize, text: &str) -> Result<(), GridError> {
        self.check_row(row)?;
        let rounds = self.round_count();
        if col == 0 || col > rounds {
            return Err(GridError::ColumnOutOfRange { col, rounds });
        }
        self.rows[row][col] = text.to_string();
        self.recompute_total(row);
        Ok(())
    }

    pub fn set_name(&mut self, row: usize, text: &str) -> Result<(), GridError> {
        self.check_row(row)?;
        self.rows[row][0] = text.to_string();
        Ok(())
    }

    /// Blank every round cell and zero every total; names stay
    pub fn clear_scores(&mut self) {
        let total_col = self.total_column();
        for row in self.rows.iter_mut().skip(1) {
            for cell in &mut row[1..total_col] {
                cell.clear();
            }
            row[total_col] = "0".to_string();
        }
    }

    fn recompute_total(&mut self, row: usize) {
        let total_col = self.total_column();
        let cells = &self.rows[row];
        let total = sum_scores(cells[1..total_col].iter().map(String::as_str));
        self.rows[row][total_col] = format_total(total);
    }

    fn check_row(&self, row: usize) -> Result<(), GridError> {
        let players = self.player_count();
        if row == 0 || row > players {
            return Err(GridError::RowOutOfRange { row, players });
        }
        Ok(())
    }
}

/// Display name given to an unnamed player in position `n` (1-based)
pub fn placeholder_name(n: usize) -> String {
    format!("Player #{}", n)
}

fn header_row(round_count: usize) -> Vec<String> {
    let mut row = Vec::with_capacity(round_count + 2);
    row.push(NAME_LABEL.to_string());
    row.extend((1..=round_count).map(|r| r.to_string()));
    row.push(TOTAL_LABEL.to_string());
    row
}

fn blank_row(name: String, round_count: usize) -> Vec<String> {
    let mut row = Vec::with_capacity(round_count + 2);
    row.push(name);
    row.extend(std::iter::repeat_n(String::new(), round_count));
    row.push("0".to_string());
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_layout() {
        let m = ScoreMatrix::new(9, 4);
        assert_eq!(
            m.header(),
            strings(&["Name", "1", "2", "3", "4", "5", "6", "7", "8", "9", "Total"])
        );
        assert_eq!(m.player_count(), 4);
        assert_eq!(m.column_count(), 11);
        assert_eq!(
            m.rows()[1],
            strings(&["Player #1", "", "", "", "", "", "", "", "", "", "0"])
        );
        assert_eq!(m.player_name(4), Some("Player #4"));
        assert!(m.rows().iter().all(|r| r.len() == 11));
    }

    #[test]
    fn test_total_ignores_bad_cells() {
        let mut m = ScoreMatrix::new(9, 4);
        m.set_score(2, 1, "5").unwrap();
        m.set_score(2, 2, "x").unwrap();
        m.set_score(2, 3, "3").unwrap();
        assert_eq!(m.total(2), Some("8"));
        assert_eq!(m.cell(2, 2), Some("x"));
        // Other rows untouched
        assert_eq!(m.total(1), Some("0"));
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let mut m = ScoreMatrix::new(9, 4);
        let before = m.clone();
        assert_eq!(
            m.set_score(0, 1, "3"),
            Err(GridError::RowOutOfRange { row: 0, players: 4 })
        );
        assert_eq!(
            m.set_score(5, 1, "3"),
            Err(GridError::RowOutOfRange { row: 5, players: 4 })
        );
        assert_eq!(
            m.set_score(1, 0, "3"),
            Err(GridError::ColumnOutOfRange { col: 0, rounds: 9 })
        );
        assert_eq!(
            m.set_score(1, 10, "3"),
            Err(GridError::ColumnOutOfRange { col: 10, rounds: 9 })
        );
        assert!(m.set_name(0, "Header").is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn test_clear_scores_keeps_names() {
        let mut m = ScoreMatrix::new(3, 2);
        m.set_name(1, "Alice").unwrap();
        m.set_score(1, 1, "4").unwrap();
        m.set_score(2, 3, "6").unwrap();
        m.clear_scores();
        assert_eq!(m.rows()[1], strings(&["Alice", "", "", "", "0"]));
        assert_eq!(m.rows()[2], strings(&["Player #2", "", "", "", "0"]));
        assert_eq!(m.header(), strings(&["Name", "1", "2", "3", "Total"]));
    }

    #[test]
    fn test_from_rows_validates_shape() {
        assert_eq!(ScoreMatrix::from_rows(vec![]), Err(MatrixShapeError::Empty));
        assert_eq!(
            ScoreMatrix::from_rows(vec![strings(&["Name"])]),
            Err(MatrixShapeError::TooFewColumns(1))
        );
        assert_eq!(
            ScoreMatrix::from_rows(vec![
                strings(&["Name", "1", "Total"]),
                strings(&["Bob", "3"]),
            ]),
            Err(MatrixShapeError::Ragged {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_from_rows_recomputes_totals() {
        let m = ScoreMatrix::from_rows(vec![
            strings(&["Name", "1", "2", "Total"]),
            strings(&["Bob", "3", "4", "99"]),
        ])
        .unwrap();
        assert_eq!(m.total(1), Some("7"));
        assert_eq!(m.round_count(), 2);
    }

    #[test]
    fn test_with_names_sizes_to_roster() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let m = ScoreMatrix::with_names(9, names.clone());
        assert_eq!(m.player_names(), names);
        assert_eq!(m.player_count(), 3);
    }

    proptest! {
        #[test]
        fn test_total_matches_integer_sum(scores in proptest::collection::vec(0u32..1000, 9)) {
            let mut m = ScoreMatrix::new(9, 1);
            for (i, s) in scores.iter().enumerate() {
                m.set_score(1, i + 1, &s.to_string()).unwrap();
            }
            let expected = scores.iter().sum::<u32>().to_string();
            prop_assert_eq!(m.total(1), Some(expected.as_str()));
        }
    }
}
