pub mod board;
pub mod color;
pub mod error;
pub mod game;
pub mod r#move;
pub mod pieces;
pub mod square;
pub mod status;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn lantern_chess(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use python_bindings::*;
    m.add_class::<PyGame>()?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::color::Color;
    use crate::game::Game;
    use crate::pieces::{PieceType, display_glyph};
    use crate::square::Square;

    fn parse_color(color: &str) -> PyResult<Color> {
        match color {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Invalid color: expected \"white\" or \"black\", got \"{}\"",
                color
            ))),
        }
    }

    fn parse_piece_type(piece_type: &str) -> PyResult<PieceType> {
        match piece_type {
            "queen" => Ok(PieceType::Queen),
            "rook" => Ok(PieceType::Rook),
            "bishop" => Ok(PieceType::Bishop),
            "knight" => Ok(PieceType::Knight),
            "king" => Ok(PieceType::King),
            "pawn" => Ok(PieceType::Pawn),
            _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Invalid piece type: \"{}\"",
                piece_type
            ))),
        }
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        pub fn new() -> Self {
            PyGame { game: Game::new() }
        }

        pub fn turn(&self) -> String {
            self.game.turn().to_string().to_lowercase()
        }

        pub fn status(&self) -> String {
            self.game.status().to_string()
        }

        pub fn is_in_check(&self, color: &str) -> PyResult<bool> {
            Ok(self.game.is_in_check(parse_color(color)?))
        }

        pub fn legal_moves(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
            self.game
                .legal_moves(Square::new(row, col))
                .into_iter()
                .map(|sq| (sq.row, sq.col))
                .collect()
        }

        pub fn apply_move(
            &mut self,
            from_row: usize,
            from_col: usize,
            to_row: usize,
            to_col: usize,
        ) -> PyResult<String> {
            self.game
                .apply_move(
                    Square::new(from_row, from_col),
                    Square::new(to_row, to_col),
                )
                .map(|status| status.to_string())
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
        }

        pub fn choose_promotion(&mut self, piece_type: &str) -> PyResult<String> {
            self.game
                .choose_promotion(parse_piece_type(piece_type)?)
                .map(|status| status.to_string())
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
        }

        pub fn pending_promotion(&self) -> Option<(usize, usize)> {
            self.game
                .pending_promotion()
                .map(|p| (p.square.row, p.square.col))
        }

        pub fn captured(&self, color: &str) -> PyResult<Vec<String>> {
            Ok(self
                .game
                .captured_pieces(parse_color(color)?)
                .iter()
                .map(|pt| format!("{:?}", pt).to_lowercase())
                .collect())
        }

        pub fn glyph_at(&self, row: usize, col: usize) -> Option<String> {
            display_glyph(self.game.board().piece_at(Square::new(row, col)))
                .map(|glyph| glyph.to_string())
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(turn={}, status={})",
                self.game.turn(),
                self.game.status()
            )
        }
    }
}
