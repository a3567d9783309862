use std::fmt;

/// Classification of a position for the side to move. Always computed from
/// (board, side-to-move), never stored alongside them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Terminal positions accept no further moves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", s)
    }
}
