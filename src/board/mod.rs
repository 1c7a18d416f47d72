// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Chess board supporting standard pieces and four variant pieces
//!
//! A _board_ represents the state of a two-player chess game and
//! provides the core mechanisms to play it, take moves back and
//! replay them. The following features are supported:
//!
//! [x] Standard piece movement (no castling, en passant or promotion)
//! [x] Variant pieces: Horizon, Centaur, Shapeshifter and Decoy
//! [x] Classic and custom starting layouts
//! [x] Boards taller or wider than 8x8
//! [x] Check, checkmate and stalemate
//! [x] Undo and redo
//! [ ] Repetition and fifty-move rules
//! [ ] Time Controls
//!
//! Some of the key abstractions include:
//!
//! * A `Square` names a single square by file and rank, counting
//!   from 0 at White's bottom-left corner (`"a1"`). A `Mask` is an
//!   ordered set of squares and is used for attack-sets and legal
//!   destinations.
//!
//! * `Material` is a `Piece` of a specific `Color`. There are ten
//!   kinds of piece. How each one moves is looked up in a static
//!   catalog (`Piece::geometry`) rather than coded per piece.
//!
//! * An `Occupant` is a piece instance standing on the board. It
//!   carries its square, the squares it attacks and the squares it may
//!   legally move to. A Decoy also carries its current disguise.
//!
//! * A `Position` owns the grid of occupants, whose turn it is, both
//!   check flags and the result. `relocate` moves a piece without any
//!   rule checking and `advance_turn` brings all derived state up to
//!   date afterwards, always in the same order: attack-sets, checks,
//!   turn, legal-sets, result. Legal-sets come from trying every
//!   candidate on a `snapshot` and rejecting those that leave the
//!   mover's own king attacked.
//!
//! * `History` turns a validated `Move` into a `MoveRecord` that can
//!   be undone and redone. Records hold the exact pieces involved so
//!   a Shapeshifter or Decoy comes back exactly as it was.
//!
//! * A `Board` ties a `Position` to its `History` and is what callers
//!   play on.
//!

use anyhow::Result;

mod backrank;
mod catalog;
mod config;
mod history;
mod material;
mod moves;
mod position;
mod square;
mod status;

pub use backrank::*;
pub use catalog::*;
pub use config::*;
pub use history::*;
pub use material::*;
pub use moves::*;
pub use position::*;
pub use square::*;
pub use status::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    position: Position,
    history: History,
}

impl Board {
    pub fn new(config: &BoardConfig) -> Result<Self> {
        Ok(Self::from_position(Position::new(config)?))
    }
    pub fn classic() -> Self {
        Self::default()
    }
    pub fn custom() -> Result<Self> {
        Self::new(&BoardConfig::custom())
    }
    pub(crate) fn from_position(position: Position) -> Self {
        Self {
            position,
            history: History::new(),
        }
    }

    /// Reconstruct a Board by replaying a sequence of moves.
    pub fn replay(config: &BoardConfig, moves: &[Move]) -> Result<Self> {
        let mut board = Self::new(config)?;
        for mv in moves {
            board.submit_move(*mv)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Where the piece on `from` may move right now. Empty when the
    /// square is vacant or it is the other side's turn.
    pub fn move_destinations(&self, from: Square) -> Mask {
        match self.position.side_of(from) {
            Some(color) if color == self.turn() && !self.position.is_game_ended() => {
                self.position.legal_moves(from)
            }
            _ => Mask::empty(),
        }
    }
    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        self.history.execute(&mut self.position, mv)?;
        Ok(())
    }
    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.position)
    }
    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.position)
    }
    #[inline]
    pub fn undo_available(&self) -> bool {
        self.history.undo_available()
    }
    #[inline]
    pub fn redo_available(&self) -> bool {
        self.history.redo_available()
    }
    #[inline]
    pub fn board_result(&self) -> Option<BoardResult> {
        self.position.result()
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for Board {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}
