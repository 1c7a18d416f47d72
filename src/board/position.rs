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

use anyhow::Result;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;

use super::backrank::Variant;
use super::catalog::{DEMOTIONS, DISGUISES};
use super::config::BoardConfig;
use super::material::{Color, Material, Occupant, Pair, Piece};
use super::moves;
use super::square::{Mask, Offset, Square};
use super::status::{self, BoardResult};
use super::Turn;

use Color::*;
use Piece::*;

/// What a square holds, including whether it exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    OffBoard,
    Vacant,
    Occupied(Color),
}

/// The grid of pieces together with whose turn it is, both check flags and
/// the game's result.
///
/// There are two ways to change a position. `relocate` is the only
/// primitive that moves a piece, and `advance_turn` brings every derived
/// field (attack-sets, checks, turn, legal-sets, result) up to date
/// afterwards. Everything else reads.
#[derive(Debug, Clone)]
pub struct Position {
    rows: u8,
    columns: u8,
    variant: Variant,
    grid: Vec<Option<Occupant>>,
    turn: Color,
    checks: Pair<bool>,
    result: Option<BoardResult>,
    rng: StdRng,
}

impl Default for Position {
    fn default() -> Self {
        Self::build(&BoardConfig::default())
    }
}

impl Position {
    pub fn new(config: &BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &BoardConfig) -> Self {
        let cells = config.rows as usize * config.columns as usize;
        let mut position = Self {
            rows: config.rows,
            columns: config.columns,
            variant: config.variant,
            grid: vec![None; cells],
            turn: White,
            checks: Pair::default(),
            result: None,
            rng: config.rng(),
        };
        position.init();
        position.refresh();
        debug!(
            "new {} position {}x{}\n{}",
            position.variant, position.rows, position.columns, position
        );
        position
    }

    fn init(&mut self) {
        let backrank = self.variant.backrank();
        for color in Color::iter() {
            let back = self.back_rank(color);
            for (file, piece) in backrank.iter() {
                self.place(Occupant::new(Material::new(color, piece), Square::new(file, back)));
            }
            let pawns = self.pawn_rank(color);
            for file in 0..self.columns {
                self.place(Occupant::new(Material::new(color, Pawn), Square::new(file, pawns)));
            }
        }
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }
    #[inline]
    pub fn columns(&self) -> u8 {
        self.columns
    }
    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Rank holding `color`'s pieces at the start.
    pub fn back_rank(&self, color: Color) -> u8 {
        match color {
            White => 0,
            Black => self.rows - 1,
        }
    }
    /// Rank holding `color`'s pawns at the start. Pawns may double-step from
    /// here.
    pub fn pawn_rank(&self, color: Color) -> u8 {
        match color {
            White => 1,
            Black => self.rows - 2,
        }
    }

    #[inline]
    pub fn is_check(&self, color: Color) -> bool {
        self.checks[color]
    }
    #[inline]
    pub fn checks(&self) -> Pair<bool> {
        self.checks
    }
    #[inline]
    pub fn result(&self) -> Option<BoardResult> {
        self.result
    }
    #[inline]
    pub fn is_game_ended(&self) -> bool {
        self.result.is_some()
    }
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        matches!(self.result, Some(BoardResult::StaleMate))
    }
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        match self.result {
            Some(BoardResult::CheckMate(color)) => Some(color),
            _ => None,
        }
    }

    #[inline]
    pub fn is_on_board(&self, square: Square) -> bool {
        square.file() < self.columns && square.rank() < self.rows
    }

    pub fn probe(&self, square: Square) -> Probe {
        if !self.is_on_board(square) {
            return Probe::OffBoard;
        }
        match &self.grid[self.cell(square)] {
            Some(occupant) => Probe::Occupied(occupant.color()),
            None => Probe::Vacant,
        }
    }

    pub fn occupant(&self, square: Square) -> Option<&Occupant> {
        if !self.is_on_board(square) {
            return None;
        }
        self.grid[self.cell(square)].as_ref()
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.occupant(square).map(|occupant| occupant.material())
    }

    #[inline]
    pub fn side_of(&self, square: Square) -> Option<Color> {
        self.occupant(square).map(|occupant| occupant.color())
    }

    /// Every piece on the board, rank by rank from White's side.
    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.grid.iter().flatten()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Occupant> {
        self.occupants().filter(move |occupant| occupant.color() == color)
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|occupant| occupant.piece().is_king())
            .map(|occupant| occupant.square())
    }

    /// The square `offset` away from `square`, if it is on this board.
    pub fn step(&self, square: Square, offset: Offset) -> Option<Square> {
        (square + offset).filter(|dest| self.is_on_board(*dest))
    }

    /// Squares `square`'s piece may legally move to. Empty for vacant or
    /// off-board squares.
    pub fn legal_moves(&self, square: Square) -> Mask {
        self.occupant(square)
            .map(|occupant| occupant.legal().clone())
            .unwrap_or_default()
    }

    /// Moves the piece on `from` to `to`, discarding whatever stood on `to`
    /// and handing it back. Nothing else is updated; call `advance_turn` to
    /// bring the derived state up to date.
    ///
    /// A Shapeshifter turns into one of its demotions here and a Decoy
    /// picks a new disguise.
    ///
    /// Does nothing when `from` is vacant, when `from == to`, or when either
    /// square is off the board.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Occupant> {
        if from == to || !self.is_on_board(from) || !self.is_on_board(to) {
            return None;
        }
        let from_cell = self.cell(from);
        let to_cell = self.cell(to);
        let mut occupant = self.grid[from_cell].take()?;
        occupant.set_square(to);
        self.transform(&mut occupant);
        self.grid[to_cell].replace(occupant)
    }

    fn transform(&mut self, occupant: &mut Occupant) {
        match occupant.piece() {
            Shapeshifter => {
                let piece = DEMOTIONS[self.rng.gen_range(0..DEMOTIONS.len())];
                occupant.set_piece(piece);
            }
            Decoy => {
                let disguise = DISGUISES[self.rng.gen_range(0..DISGUISES.len())];
                occupant.set_disguise(disguise);
            }
            _ => {}
        }
    }

    /// Puts `occupant` back on the square it names, returning whatever was
    /// there. Used to bring back captured pieces and exact identities on
    /// undo; it never moves a piece between squares.
    ///
    /// `restore` and `vacate` exist for undo, redo and the legality
    /// simulation only. Play always goes through `relocate`.
    pub(crate) fn restore(&mut self, occupant: Occupant) -> Option<Occupant> {
        let square = occupant.square();
        debug_assert!(self.is_on_board(square));
        if !self.is_on_board(square) {
            return None;
        }
        let cell = self.cell(square);
        self.grid[cell].replace(occupant)
    }

    /// Takes whatever stands on `square` off the board.
    pub(crate) fn vacate(&mut self, square: Square) -> Option<Occupant> {
        if !self.is_on_board(square) {
            return None;
        }
        let cell = self.cell(square);
        self.grid[cell].take()
    }

    fn place(&mut self, occupant: Occupant) {
        let _ = self.restore(occupant);
    }

    /// A fully independent copy for trying moves out. Changes to the copy,
    /// including the random draws it makes, never reach this position.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Brings the position up to date after a relocation. The order is
    /// fixed: checks read fresh attack-sets, legal-sets read the new turn
    /// and fresh attack-sets, and the result reads both.
    pub fn advance_turn(&mut self) {
        self.update_attacks();
        self.update_checks();
        self.turn = !self.turn;
        self.update_legal();
        self.update_result();
        trace!(
            "{} to move, checks {:?}, result {:?}",
            self.turn,
            self.checks,
            self.result
        );
    }

    /// The same pipeline as `advance_turn` without handing over the turn.
    pub(crate) fn refresh(&mut self) {
        self.update_attacks();
        self.update_checks();
        self.update_legal();
        self.update_result();
    }

    pub(crate) fn update_attacks(&mut self) {
        self.update_attacks_where(|_| true);
    }

    pub(crate) fn update_attacks_of(&mut self, color: Color) {
        self.update_attacks_where(|occupant| occupant.color() == color);
    }

    fn update_attacks_where<F>(&mut self, filter: F)
    where
        F: Fn(&Occupant) -> bool,
    {
        let updates: Vec<(Square, Mask)> = self
            .occupants()
            .filter(|occupant| filter(*occupant))
            .map(|occupant| (occupant.square(), moves::attacks(self, occupant.square())))
            .collect();
        for (square, attacks) in updates {
            let cell = self.cell(square);
            if let Some(occupant) = self.grid[cell].as_mut() {
                occupant.set_attacks(attacks);
            }
        }
    }

    pub(crate) fn update_checks(&mut self) {
        for color in Color::iter() {
            self.checks[color] = status::is_check(self, color);
        }
    }

    fn update_legal(&mut self) {
        let updates: Vec<(Square, Mask)> = self
            .occupants()
            .map(|occupant| (occupant.square(), moves::legal_destinations(self, occupant.square())))
            .collect();
        for (square, legal) in updates {
            let cell = self.cell(square);
            if let Some(occupant) = self.grid[cell].as_mut() {
                occupant.set_legal(legal);
            }
        }
    }

    fn update_result(&mut self) {
        self.result = status::evaluate(self);
    }

    #[inline]
    fn cell(&self, square: Square) -> usize {
        square.rank() as usize * self.columns as usize + square.file() as usize
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

static NONE: Option<Occupant> = None;

impl Index<Square> for Position {
    type Output = Option<Occupant>;
    /// Off-board squares read as empty.
    fn index(&self, index: Square) -> &Self::Output {
        if !self.is_on_board(index) {
            return &NONE;
        }
        &self.grid[self.cell(index)]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.rows).rev() {
            write!(f, "{:>2} ", rank as usize + 1)?;
            for file in 0..self.columns {
                let symbol = self
                    .contents(Square::new(file, rank))
                    .map(|material| material.symbol())
                    .unwrap_or('.');
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 0..self.columns {
            write!(f, "{}", (b'a' + file) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Position {
    pub(crate) fn seeded(seed: u64) -> Self {
        Self::build(&BoardConfig::default().with_seed(seed))
    }

    /// Removes every piece. Derived state is left stale until `refreshed`.
    pub(crate) fn cleared(mut self) -> Self {
        for cell in self.grid.iter_mut() {
            *cell = None;
        }
        self
    }

    pub(crate) fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        let cell = self.cell(square);
        self.grid[cell] = value.map(|material| Occupant::new(material, square));
        self
    }

    pub(crate) fn set_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub(crate) fn refreshed(mut self) -> Self {
        self.refresh();
        self
    }
}
