use crate::board::BOARD_SIZE;
use std::fmt;

/// A board coordinate. Row 0 is the top of the board (Black's back rank),
/// row 7 the bottom (White's back rank); columns run left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Self {
        Square { row, col }
    }

    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The square reached by stepping (d_row, d_col), or `None` off-board.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Square> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;

        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Files a..h left to right, ranks 8..1 top to bottom. Off-board
        // coordinates (possible in caller-supplied input echoed back through
        // error messages) fall back to plain indices.
        if self.is_valid() {
            write!(
                f,
                "{}{}",
                (b'a' + self.col as u8) as char,
                BOARD_SIZE - self.row
            )
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}
