use crate::square::Square;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        const CAPTURE = 0b00000001;
        const DOUBLE_PUSH = 0b00000010;
        const EN_PASSANT = 0b00000100;
        const CASTLE = 0b00001000;
        const PROMOTION = 0b00010000;
    }
}

/// A shape-classified move: where it goes plus what the executor has to do
/// besides relocating the piece. Produced by the pseudo-legal rules, consumed
/// by the legality filter's simulation and by the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub flags: MoveFlags,
}

impl Move {
    pub fn new(from: Square, to: Square, flags: MoveFlags) -> Self {
        Move { from, to, flags }
    }

    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_flags() {
        let mv = Move::new(
            Square::new(6, 4),
            Square::new(4, 4),
            MoveFlags::DOUBLE_PUSH,
        );
        assert!(mv.flags.contains(MoveFlags::DOUBLE_PUSH));
        assert!(!mv.is_capture());

        let mv = Move::new(
            Square::new(3, 4),
            Square::new(2, 5),
            MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
        );
        assert!(mv.is_capture());
        assert!(mv.flags.contains(MoveFlags::EN_PASSANT));
    }

    #[test]
    fn test_move_display() {
        let mv = Move::new(Square::new(6, 4), Square::new(4, 4), MoveFlags::empty());
        assert_eq!(mv.to_string(), "e2e4");
    }
}
