use arrayvec::ArrayVec;

use crate::board::{BOARD_SIZE, Board};
use crate::color::Color;
use crate::error::MoveError;
use crate::pieces::{Piece, PieceType};
use crate::r#move::{Move, MoveFlags};
use crate::square::Square;
use crate::status::GameStatus;

/// One independent flag per color and side. Flags only ever transition
/// true -> false over the course of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

impl CastlingRights {
    pub fn new() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn has_kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn has_queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn clear_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    fn clear_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }
}

/// A pawn that reached the last rank and left the board until the owner
/// picks its replacement. While this is set no other move is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PendingPromotion {
    pub square: Square,
    pub color: Color,
}

// A side can capture at most the opponent's fifteen non-king pieces.
const MAX_CAPTURES: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    captured_by_white: ArrayVec<PieceType, MAX_CAPTURES>,
    captured_by_black: ArrayVec<PieceType, MAX_CAPTURES>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_position(Board::standard(), Color::White, CastlingRights::new())
    }

    /// A game from an arbitrary position with no en-passant target and no
    /// capture history. The board must hold exactly one king per side.
    pub fn from_position(board: Board, turn: Color, castling_rights: CastlingRights) -> Self {
        Game {
            board,
            turn,
            castling_rights,
            en_passant: None,
            pending_promotion: None,
            captured_by_white: ArrayVec::new(),
            captured_by_black: ArrayVec::new(),
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// Pieces this color has captured, in capture order.
    pub fn captured_pieces(&self, color: Color) -> &[PieceType] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.board.find_king(color) {
            Some(king) => self.square_attacked(king, color.opposite()),
            None => false,
        }
    }

    /// Classification of the current position for the side to move. While a
    /// promotion choice is outstanding the ply is unfinished and the game
    /// reports `Ongoing`; the pending record itself is exposed through
    /// [`Game::pending_promotion`].
    pub fn status(&self) -> GameStatus {
        if self.pending_promotion.is_some() {
            return GameStatus::Ongoing;
        }

        let in_check = self.is_in_check(self.turn);
        let has_moves = self.has_any_legal_move();

        match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// All destinations from `from` that survive the king-safety filter.
    /// Empty when the square holds no piece of the side to move, or while a
    /// promotion choice is outstanding.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        let mut moves = Vec::new();

        if self.pending_promotion.is_some() {
            return moves;
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.turn => {}
            _ => return moves,
        }

        for to in Board::all_squares() {
            if let Some(mv) = self.classify_move(from, to) {
                if self.move_is_legal(&mv) {
                    moves.push(to);
                }
            }
        }

        moves
    }

    // -----------------------------------------------------------------------
    // Move protocol
    // -----------------------------------------------------------------------

    /// Apply a move for the side to move. On success the board, rights,
    /// en-passant target and turn are updated atomically and the new status
    /// is returned; on failure nothing changes.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<GameStatus, MoveError> {
        if self.pending_promotion.is_some() {
            return Err(MoveError::PromotionPending);
        }
        if self.status().is_terminal() {
            return Err(MoveError::GameOver);
        }

        let piece = match self.board.piece_at(from) {
            Some(p) if p.color == self.turn => p,
            _ => return Err(MoveError::IllegalMove { from, to }),
        };

        let mv = self
            .classify_move(from, to)
            .filter(|mv| self.move_is_legal(mv))
            .ok_or(MoveError::IllegalMove { from, to })?;

        self.execute(piece, mv);
        Ok(self.status())
    }

    /// Resolve an outstanding promotion. Places the chosen piece on the
    /// pending square, then runs the same rights/en-passant/turn tail as a
    /// regular ply: a pawn move never alters castling rights and cannot be
    /// a double push, so only the target is cleared and the turn flips.
    pub fn choose_promotion(&mut self, choice: PieceType) -> Result<GameStatus, MoveError> {
        let pending = self
            .pending_promotion
            .ok_or(MoveError::NoPendingPromotion)?;

        if !choice.is_promotion_choice() {
            return Err(MoveError::InvalidPromotionChoice(choice));
        }

        self.board
            .set_piece(pending.square, Some(Piece::new(choice, pending.color)));
        self.pending_promotion = None;
        self.finish_ply(None);

        Ok(self.status())
    }

    // -----------------------------------------------------------------------
    // Pseudo-legal move rules
    // -----------------------------------------------------------------------

    /// Shape-classify (from, to) ignoring king safety: movement pattern,
    /// blocking, and the special-rule preconditions. Same-color destinations
    /// are rejected here, before per-piece dispatch.
    fn classify_move(&self, from: Square, to: Square) -> Option<Move> {
        let piece = self.board.piece_at(from)?;

        if from == to || !to.is_valid() {
            return None;
        }
        if let Some(target) = self.board.piece_at(to) {
            if target.color == piece.color {
                return None;
            }
        }

        let flags = match piece.piece_type {
            PieceType::Pawn => self.pawn_flags(from, to, piece.color)?,
            PieceType::Rook => self.straight_flags(from, to)?,
            PieceType::Bishop => self.diagonal_flags(from, to)?,
            PieceType::Queen => self
                .straight_flags(from, to)
                .or_else(|| self.diagonal_flags(from, to))?,
            PieceType::Knight => self.knight_flags(from, to)?,
            PieceType::King => self.king_flags(from, to, piece.color)?,
        };

        Some(Move::new(from, to, flags))
    }

    fn capture_flag(&self, to: Square) -> MoveFlags {
        if self.board.piece_at(to).is_some() {
            MoveFlags::CAPTURE
        } else {
            MoveFlags::empty()
        }
    }

    fn pawn_flags(&self, from: Square, to: Square, color: Color) -> Option<MoveFlags> {
        let dir = color.forward();
        let d_row = to.row as i32 - from.row as i32;
        let d_col = to.col as i32 - from.col as i32;

        let mut flags = MoveFlags::empty();

        if d_col == 0 && d_row == dir && self.board.piece_at(to).is_none() {
            // Single push.
        } else if d_col == 0
            && d_row == 2 * dir
            && from.row == color.pawn_rank()
            && self.board.piece_at(to).is_none()
            && from
                .offset(dir, 0)
                .is_some_and(|mid| self.board.piece_at(mid).is_none())
        {
            flags |= MoveFlags::DOUBLE_PUSH;
        } else if d_col.abs() == 1 && d_row == dir {
            if self.board.piece_at(to).is_some() {
                flags |= MoveFlags::CAPTURE;
            } else if self.en_passant == Some(to) {
                flags |= MoveFlags::CAPTURE | MoveFlags::EN_PASSANT;
            } else {
                return None;
            }
        } else {
            return None;
        }

        if to.row == color.promotion_rank() {
            flags |= MoveFlags::PROMOTION;
        }

        Some(flags)
    }

    fn straight_flags(&self, from: Square, to: Square) -> Option<MoveFlags> {
        if self.straight_reaches(from, to) {
            Some(self.capture_flag(to))
        } else {
            None
        }
    }

    fn diagonal_flags(&self, from: Square, to: Square) -> Option<MoveFlags> {
        if self.diagonal_reaches(from, to) {
            Some(self.capture_flag(to))
        } else {
            None
        }
    }

    fn knight_flags(&self, from: Square, to: Square) -> Option<MoveFlags> {
        if knight_shape(from, to) {
            Some(self.capture_flag(to))
        } else {
            None
        }
    }

    fn king_flags(&self, from: Square, to: Square, color: Color) -> Option<MoveFlags> {
        let d_row = (to.row as i32 - from.row as i32).abs();
        let d_col = (to.col as i32 - from.col as i32).abs();

        if d_row <= 1 && d_col <= 1 {
            return Some(self.capture_flag(to));
        }

        // Castling: two columns sideways along the back rank.
        if d_row != 0 || d_col != 2 || from.row != color.back_rank() {
            return None;
        }

        let kingside = to.col > from.col;
        let allowed = if kingside {
            self.castling_rights.has_kingside(color)
        } else {
            self.castling_rights.has_queenside(color)
        };
        if !allowed {
            return None;
        }

        let rook_col = if kingside { BOARD_SIZE - 1 } else { 0 };
        let rook_home = Square::new(from.row, rook_col);
        if self.board.piece_at(rook_home) != Some(Piece::new(PieceType::Rook, color)) {
            return None;
        }

        // Every square strictly between king and rook must be empty.
        let step: i32 = if kingside { 1 } else { -1 };
        let mut col = from.col as i32 + step;
        while col != rook_col as i32 {
            if self.board.piece_at(Square::new(from.row, col as usize)).is_some() {
                return None;
            }
            col += step;
        }

        // The king may not stand on, pass through, or land on an attacked
        // square.
        let mut col = from.col as i32;
        loop {
            let transit = Square::new(from.row, col as usize);
            if self.square_attacked(transit, color.opposite()) {
                return None;
            }
            if col == to.col as i32 {
                break;
            }
            col += step;
        }

        Some(MoveFlags::CASTLE)
    }

    /// Straight-line reachability with a clear path; destination occupancy
    /// is not examined.
    fn straight_reaches(&self, from: Square, to: Square) -> bool {
        if from.row != to.row && from.col != to.col {
            return false;
        }
        let d_row = (to.row as i32 - from.row as i32).signum();
        let d_col = (to.col as i32 - from.col as i32).signum();
        self.ray_clear(from, to, d_row, d_col)
    }

    fn diagonal_reaches(&self, from: Square, to: Square) -> bool {
        let d_row = to.row as i32 - from.row as i32;
        let d_col = to.col as i32 - from.col as i32;
        if d_row.abs() != d_col.abs() || d_row == 0 {
            return false;
        }
        self.ray_clear(from, to, d_row.signum(), d_col.signum())
    }

    /// Walk from `from` one (d_row, d_col) step at a time; true iff `to` is
    /// reached before any occupied square.
    fn ray_clear(&self, from: Square, to: Square, d_row: i32, d_col: i32) -> bool {
        let mut current = from.offset(d_row, d_col);
        while let Some(square) = current {
            if square == to {
                return true;
            }
            if self.board.piece_at(square).is_some() {
                return false;
            }
            current = square.offset(d_row, d_col);
        }
        false
    }

    // -----------------------------------------------------------------------
    // Attack detector
    // -----------------------------------------------------------------------

    /// Whether any piece of `by` covers `target`. A strict leaf over the
    /// board alone: capture shapes only, so castling never counts as an
    /// attack and a pawn's forward push never threatens anything. Kings do
    /// cover their eight neighbours, which keeps adjacent enemy kings out
    /// of each other's castling transit.
    fn square_attacked(&self, target: Square, by: Color) -> bool {
        self.board
            .pieces(by)
            .iter()
            .any(|&(from, piece)| self.piece_attacks(from, piece, target))
    }

    fn piece_attacks(&self, from: Square, piece: Piece, target: Square) -> bool {
        let d_row = target.row as i32 - from.row as i32;
        let d_col = target.col as i32 - from.col as i32;

        match piece.piece_type {
            PieceType::Pawn => d_row == piece.color.forward() && d_col.abs() == 1,
            PieceType::Knight => knight_shape(from, target),
            PieceType::Bishop => self.diagonal_reaches(from, target),
            PieceType::Rook => self.straight_reaches(from, target),
            PieceType::Queen => {
                self.straight_reaches(from, target) || self.diagonal_reaches(from, target)
            }
            PieceType::King => {
                d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row != 0 || d_col != 0)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Legality filter
    // -----------------------------------------------------------------------

    /// King-safety gate: play the classified move out on a disposable copy
    /// (including the en-passant victim and the castling rook) and reject it
    /// if the mover's own king ends up attacked.
    fn move_is_legal(&self, mv: &Move) -> bool {
        let Some(piece) = self.board.piece_at(mv.from) else {
            return false;
        };

        let mut probe = self.clone();
        probe.board.set_piece(mv.from, None);
        probe.board.set_piece(mv.to, Some(piece));

        if mv.flags.contains(MoveFlags::EN_PASSANT) {
            probe
                .board
                .set_piece(Square::new(mv.from.row, mv.to.col), None);
        }
        if mv.flags.contains(MoveFlags::CASTLE) {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = probe.board.piece_at(rook_from);
            probe.board.set_piece(rook_from, None);
            probe.board.set_piece(rook_to, rook);
        }

        !probe.is_in_check(piece.color)
    }

    // -----------------------------------------------------------------------
    // Game status evaluator
    // -----------------------------------------------------------------------

    /// Brute-force scan of every (from, to) pair for the side to move,
    /// stopping at the first legal one.
    fn has_any_legal_move(&self) -> bool {
        for (from, _piece) in self.board.pieces(self.turn) {
            for to in Board::all_squares() {
                if let Some(mv) = self.classify_move(from, to) {
                    if self.move_is_legal(&mv) {
                        return true;
                    }
                }
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Move executor
    // -----------------------------------------------------------------------

    fn execute(&mut self, piece: Piece, mv: Move) {
        // Capture bookkeeping before the destination is overwritten.
        if let Some(captured) = self.board.piece_at(mv.to) {
            self.record_capture(piece.color, captured.piece_type);
        }

        if mv.flags.contains(MoveFlags::CASTLE) {
            let (rook_from, rook_to) = castle_rook_squares(&mv);
            let rook = self.board.piece_at(rook_from);
            self.board.set_piece(rook_from, None);
            self.board.set_piece(rook_to, rook);
        }

        // The en-passant victim sits beside the destination on the origin
        // rank, not on the destination square.
        if mv.flags.contains(MoveFlags::EN_PASSANT) {
            let victim = Square::new(mv.from.row, mv.to.col);
            if let Some(captured) = self.board.piece_at(victim) {
                self.record_capture(piece.color, captured.piece_type);
            }
            self.board.set_piece(victim, None);
        }

        self.board.set_piece(mv.from, None);
        self.board.set_piece(mv.to, Some(piece));

        // A pawn on the last rank leaves the board until its owner picks a
        // replacement; rights, en-passant target and turn wait with it.
        if mv.flags.contains(MoveFlags::PROMOTION) {
            self.board.set_piece(mv.to, None);
            self.pending_promotion = Some(PendingPromotion {
                square: mv.to,
                color: piece.color,
            });
            return;
        }

        self.update_castling_rights(piece, mv.from);

        let en_passant = if mv.flags.contains(MoveFlags::DOUBLE_PUSH) {
            // The square the pawn passed over.
            Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
        } else {
            None
        };
        self.finish_ply(en_passant);
    }

    fn finish_ply(&mut self, en_passant: Option<Square>) {
        self.en_passant = en_passant;
        self.turn = self.turn.opposite();
    }

    fn record_capture(&mut self, by: Color, piece_type: PieceType) {
        match by {
            Color::White => self.captured_by_white.push(piece_type),
            Color::Black => self.captured_by_black.push(piece_type),
        }
    }

    fn update_castling_rights(&mut self, piece: Piece, from: Square) {
        match piece.piece_type {
            PieceType::King => {
                self.castling_rights.clear_kingside(piece.color);
                self.castling_rights.clear_queenside(piece.color);
            }
            PieceType::Rook => {
                if from.col == 0 {
                    self.castling_rights.clear_queenside(piece.color);
                } else if from.col == BOARD_SIZE - 1 {
                    self.castling_rights.clear_kingside(piece.color);
                }
            }
            _ => {}
        }
    }
}

fn knight_shape(from: Square, to: Square) -> bool {
    let d_row = (to.row as i32 - from.row as i32).abs();
    let d_col = (to.col as i32 - from.col as i32).abs();
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}

/// Rook relocation for a two-column king move: corner rook to the column
/// the king crossed.
fn castle_rook_squares(mv: &Move) -> (Square, Square) {
    if mv.to.col > mv.from.col {
        (
            Square::new(mv.from.row, BOARD_SIZE - 1),
            Square::new(mv.from.row, mv.to.col - 1),
        )
    } else {
        (
            Square::new(mv.from.row, 0),
            Square::new(mv.from.row, mv.to.col + 1),
        )
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game(turn: {}, status: {})\n{}",
            self.turn,
            self.status(),
            self.board
        )
    }
}
