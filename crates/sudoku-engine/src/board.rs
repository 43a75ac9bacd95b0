use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position (row and col must be in 0..9)
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Index of the 3x3 box containing this position (0..9, row-major)
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }
}

/// A set of candidate digits 1-9, stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitSet(u16);

impl DigitSet {
    const FULL: u16 = 0b1_1111_1111;

    /// The empty set
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set of all nine digits
    pub fn all() -> Self {
        Self(Self::FULL)
    }

    /// Check if a digit is in the set
    pub fn contains(self, digit: u8) -> bool {
        debug_assert!((1..=9).contains(&digit));
        self.0 & (1 << (digit - 1)) != 0
    }

    /// Add a digit to the set
    pub fn insert(&mut self, digit: u8) {
        debug_assert!((1..=9).contains(&digit));
        self.0 |= 1 << (digit - 1);
    }

    /// Remove a digit from the set
    pub fn remove(&mut self, digit: u8) {
        debug_assert!((1..=9).contains(&digit));
        self.0 &= !(1 << (digit - 1));
    }

    /// Number of digits in the set
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// If the set holds exactly one digit, return it
    pub fn single_value(self) -> Option<u8> {
        if self.count() == 1 {
            Some(self.0.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    /// Iterate over the digits in the set in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9u8).filter(move |&d| self.contains(d))
    }
}

/// Error for grids that violate the input contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell value outside 0-9
    ValueOutOfRange { pos: Position, value: u8 },
    /// A puzzle string whose length is not 81
    BadLength(usize),
    /// A puzzle string character that is not a digit or '.'
    BadCharacter(char),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ValueOutOfRange { pos, value } => write!(
                f,
                "cell ({}, {}) holds {}, expected 0-9",
                pos.row, pos.col, value
            ),
            GridError::BadLength(len) => {
                write!(f, "puzzle string has {} characters, expected 81", len)
            }
            GridError::BadCharacter(c) => {
                write!(f, "puzzle string contains '{}', expected 0-9 or '.'", c)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The 9x9 board. Values are 0-9 with 0 denoting an empty cell.
///
/// Dimensions are fixed; the only mutation is per-cell value updates.
/// Solvers never mutate a caller's grid, they work on their own clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; 9]; 9],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Create an empty grid
    pub fn empty() -> Self {
        Self { cells: [[0; 9]; 9] }
    }

    /// Create a grid from a 9x9 row-major value array.
    ///
    /// Values above 9 violate the input contract and are rejected.
    pub fn from_values(values: [[u8; 9]; 9]) -> Result<Self, GridError> {
        for (row, row_values) in values.iter().enumerate() {
            for (col, &value) in row_values.iter().enumerate() {
                if value > 9 {
                    return Err(GridError::ValueOutOfRange {
                        pos: Position::new(row, col),
                        value,
                    });
                }
            }
        }
        Ok(Self { cells: values })
    }

    /// Parse a grid from an 81-character string where '0' or '.' is an empty cell
    pub fn from_string(s: &str) -> Result<Self, GridError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 81 {
            return Err(GridError::BadLength(chars.len()));
        }

        let mut grid = Self::empty();
        for (i, &c) in chars.iter().enumerate() {
            let value = match c {
                '.' => 0,
                '0'..='9' => c as u8 - b'0',
                other => return Err(GridError::BadCharacter(other)),
            };
            grid.cells[i / 9][i % 9] = value;
        }
        Ok(grid)
    }

    /// Render the grid as an 81-character string ('0' for empty cells)
    pub fn to_string_compact(&self) -> String {
        let mut s = String::with_capacity(81);
        for row in &self.cells {
            for &value in row {
                s.push((b'0' + value) as char);
            }
        }
        s
    }

    /// The raw cell values, row-major
    pub fn values(&self) -> &[[u8; 9]; 9] {
        &self.cells
    }

    /// Get the value at a position (0 = empty)
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Set the value at a position (0 clears the cell)
    pub fn set(&mut self, pos: Position, value: u8) {
        debug_assert!(value <= 9);
        self.cells[pos.row][pos.col] = value;
    }

    /// Check if every cell is assigned
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    /// Number of assigned cells
    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        81 - self.given_count()
    }

    /// Check whether placing `digit` at `pos` would keep the row, column and
    /// box free of duplicates. The cell being tested is ignored, so an
    /// already-assigned cell can be re-checked against its peers.
    pub fn is_legal(&self, pos: Position, digit: u8) -> bool {
        debug_assert!((1..=9).contains(&digit));

        for col in 0..9 {
            if col != pos.col && self.cells[pos.row][col] == digit {
                return false;
            }
        }

        for row in 0..9 {
            if row != pos.row && self.cells[row][pos.col] == digit {
                return false;
            }
        }

        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                if (row != pos.row || col != pos.col) && self.cells[row][col] == digit {
                    return false;
                }
            }
        }

        true
    }

    /// Digits that can legally be placed at an empty position.
    ///
    /// Returns the empty set for an already-assigned cell; callers should
    /// not ask for candidates of a filled cell.
    pub fn candidates(&self, pos: Position) -> DigitSet {
        if self.get(pos) != 0 {
            return DigitSet::empty();
        }

        let mut set = DigitSet::all();
        for col in 0..9 {
            let v = self.cells[pos.row][col];
            if v != 0 {
                set.remove(v);
            }
        }
        for row in 0..9 {
            let v = self.cells[row][pos.col];
            if v != 0 {
                set.remove(v);
            }
        }
        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                let v = self.cells[row][col];
                if v != 0 {
                    set.remove(v);
                }
            }
        }
        set
    }

    /// Locate the next empty cell in row-major order
    pub fn find_next_empty(&self) -> Option<Position> {
        for row in 0..9 {
            for col in 0..9 {
                if self.cells[row][col] == 0 {
                    return Some(Position::new(row, col));
                }
            }
        }
        None
    }

    /// Run the duplicate-detection pass over rows, columns and boxes.
    ///
    /// Both members of a duplicate pair are marked, matching what a display
    /// layer wants to highlight. This is a presentation helper; neither
    /// solver consults it.
    pub fn validate(&self) -> Validation {
        let mut conflicts = [[false; 9]; 9];

        // Rows
        for row in 0..9 {
            let mut seen: [Option<usize>; 10] = [None; 10];
            for col in 0..9 {
                let value = self.cells[row][col] as usize;
                if value != 0 {
                    if let Some(first_col) = seen[value] {
                        conflicts[row][col] = true;
                        conflicts[row][first_col] = true;
                    } else {
                        seen[value] = Some(col);
                    }
                }
            }
        }

        // Columns
        for col in 0..9 {
            let mut seen: [Option<usize>; 10] = [None; 10];
            for row in 0..9 {
                let value = self.cells[row][col] as usize;
                if value != 0 {
                    if let Some(first_row) = seen[value] {
                        conflicts[row][col] = true;
                        conflicts[first_row][col] = true;
                    } else {
                        seen[value] = Some(row);
                    }
                }
            }
        }

        // Boxes
        for box_idx in 0..9 {
            let box_row = (box_idx / 3) * 3;
            let box_col = (box_idx % 3) * 3;
            let mut seen: [Option<(usize, usize)>; 10] = [None; 10];
            for dr in 0..3 {
                for dc in 0..3 {
                    let (row, col) = (box_row + dr, box_col + dc);
                    let value = self.cells[row][col] as usize;
                    if value != 0 {
                        if let Some((fr, fc)) = seen[value] {
                            conflicts[row][col] = true;
                            conflicts[fr][fc] = true;
                        } else {
                            seen[value] = Some((row, col));
                        }
                    }
                }
            }
        }

        let is_valid = !conflicts.iter().flatten().any(|&c| c);
        Validation {
            is_valid,
            conflicts,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, row_values) in self.cells.iter().enumerate() {
            if row % 3 == 0 && row != 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (col, &value) in row_values.iter().enumerate() {
                if col % 3 == 0 && col != 0 {
                    write!(f, "| ")?;
                }
                if value == 0 {
                    write!(f, ". ")?;
                } else {
                    write!(f, "{} ", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of the duplicate-detection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// True when no row, column or box holds a duplicate digit
    pub is_valid: bool,
    conflicts: [[bool; 9]; 9],
}

impl Validation {
    /// Check if the given position is part of a duplicate pair
    pub fn is_conflict(&self, pos: Position) -> bool {
        self.conflicts[pos.row][pos.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_parse_and_round_trip() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), 5);
        assert_eq!(grid.get(Position::new(0, 2)), 0);
        assert_eq!(grid.to_string_compact(), DEMO_PUZZLE);
        assert_eq!(grid.given_count(), 30);
        assert_eq!(grid.empty_count(), 51);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Grid::from_string("123").unwrap_err(), GridError::BadLength(3));

        let with_letter = format!("x{}", &DEMO_PUZZLE[1..]);
        assert_eq!(
            Grid::from_string(&with_letter).unwrap_err(),
            GridError::BadCharacter('x')
        );

        let mut values = [[0u8; 9]; 9];
        values[4][7] = 12;
        assert_eq!(
            Grid::from_values(values).unwrap_err(),
            GridError::ValueOutOfRange {
                pos: Position::new(4, 7),
                value: 12
            }
        );
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(2, 5).box_index(), 1);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 8).box_index(), 8);
        assert_eq!(Position::new(6, 2).box_index(), 6);
    }

    #[test]
    fn test_is_legal() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let pos = Position::new(0, 2);
        // Row already holds 5, 3 and 7; column holds 8; box holds 6, 9, 8.
        assert!(!grid.is_legal(pos, 5));
        assert!(!grid.is_legal(pos, 7));
        assert!(!grid.is_legal(pos, 8));
        assert!(!grid.is_legal(pos, 9));
        assert!(grid.is_legal(pos, 1));
        assert!(grid.is_legal(pos, 4));
    }

    #[test]
    fn test_candidates() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let set = grid.candidates(Position::new(0, 2));
        let digits: Vec<u8> = set.iter().collect();
        assert_eq!(digits, vec![1, 2, 4]);

        // Candidates of a filled cell are empty by contract.
        assert!(grid.candidates(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_digit_set() {
        let mut set = DigitSet::empty();
        assert!(set.is_empty());
        set.insert(3);
        set.insert(7);
        assert_eq!(set.count(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert_eq!(set.single_value(), None);
        set.remove(7);
        assert_eq!(set.single_value(), Some(3));
        assert_eq!(DigitSet::all().count(), 9);
    }

    #[test]
    fn test_find_next_empty_row_major() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        assert_eq!(grid.find_next_empty(), Some(Position::new(0, 2)));

        let full = Grid::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        assert_eq!(full.find_next_empty(), None);
        assert!(full.is_complete());
    }

    #[test]
    fn test_validate_marks_both_duplicates() {
        let mut grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let report = grid.validate();
        assert!(report.is_valid);

        // Put a second 5 in row 0; both cells should be flagged.
        grid.set(Position::new(0, 8), 5);
        let report = grid.validate();
        assert!(!report.is_valid);
        assert!(report.is_conflict(Position::new(0, 0)));
        assert!(report.is_conflict(Position::new(0, 8)));
        assert!(!report.is_conflict(Position::new(1, 0)));
    }

    #[test]
    fn test_validate_box_duplicates() {
        let mut grid = Grid::empty();
        grid.set(Position::new(3, 3), 4);
        grid.set(Position::new(5, 5), 4);
        let report = grid.validate();
        assert!(!report.is_valid);
        assert!(report.is_conflict(Position::new(3, 3)));
        assert!(report.is_conflict(Position::new(5, 5)));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::from_string(DEMO_PUZZLE).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
