use crate::pieces::PieceType;
use crate::square::Square;
use thiserror::Error;

/// Failure modes of the move protocol. Every rejected request leaves the
/// game state untouched; the front end decides how to surface these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Shape-invalid, blocked, same-color destination, or the move would
    /// leave the mover's own king attacked.
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// Move attempted after checkmate or stalemate.
    #[error("game is over")]
    GameOver,

    /// Move attempted while a promotion choice is outstanding.
    #[error("a promotion choice is pending")]
    PromotionPending,

    /// Promotion choice supplied with no promotion pending.
    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// Promotion choice outside queen/rook/bishop/knight.
    #[error("invalid promotion choice: {0:?}")]
    InvalidPromotionChoice(PieceType),
}
