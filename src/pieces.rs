use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// The piece types a pawn may promote to.
    pub const PROMOTION_CHOICES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn is_promotion_choice(&self) -> bool {
        Self::PROMOTION_CHOICES.contains(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// ASCII letter for board dumps, uppercase for White.
    pub fn to_char(&self) -> char {
        let c = match self.piece_type {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        };

        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn glyph(&self) -> char {
        match (self.color, self.piece_type) {
            (Color::White, PieceType::King) => '♔',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Pawn) => '♟',
        }
    }
}

/// Rendering contract for front ends: a square's occupant to a display
/// glyph, or `None` for an empty square. Holds no rules state.
pub fn display_glyph(piece: Option<Piece>) -> Option<char> {
    piece.map(|p| p.glyph())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_piece_creation() {
        let piece = Piece::new(PieceType::King, Color::White);
        assert_eq!(piece.piece_type, PieceType::King);
        assert_eq!(piece.color, Color::White);
    }

    #[rstest]
    #[case(PieceType::King, 'K', 'k')]
    #[case(PieceType::Queen, 'Q', 'q')]
    #[case(PieceType::Rook, 'R', 'r')]
    #[case(PieceType::Bishop, 'B', 'b')]
    #[case(PieceType::Knight, 'N', 'n')]
    #[case(PieceType::Pawn, 'P', 'p')]
    fn test_piece_to_char(#[case] pt: PieceType, #[case] white: char, #[case] black: char) {
        assert_eq!(Piece::new(pt, Color::White).to_char(), white);
        assert_eq!(Piece::new(pt, Color::Black).to_char(), black);
    }

    #[rstest]
    #[case(PieceType::King, '♔', '♚')]
    #[case(PieceType::Queen, '♕', '♛')]
    #[case(PieceType::Rook, '♖', '♜')]
    #[case(PieceType::Bishop, '♗', '♝')]
    #[case(PieceType::Knight, '♘', '♞')]
    #[case(PieceType::Pawn, '♙', '♟')]
    fn test_piece_glyph(#[case] pt: PieceType, #[case] white: char, #[case] black: char) {
        assert_eq!(Piece::new(pt, Color::White).glyph(), white);
        assert_eq!(Piece::new(pt, Color::Black).glyph(), black);
    }

    #[test]
    fn test_display_glyph_empty() {
        assert_eq!(display_glyph(None), None);
        assert_eq!(
            display_glyph(Some(Piece::new(PieceType::Queen, Color::Black))),
            Some('♛')
        );
    }

    #[test]
    fn test_promotion_choices() {
        assert!(PieceType::Queen.is_promotion_choice());
        assert!(PieceType::Rook.is_promotion_choice());
        assert!(PieceType::Bishop.is_promotion_choice());
        assert!(PieceType::Knight.is_promotion_choice());
        assert!(!PieceType::King.is_promotion_choice());
        assert!(!PieceType::Pawn.is_promotion_choice());
    }
}
