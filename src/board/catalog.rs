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

//! Static movement data for every kind of piece.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::square::{Direction, Offset};

use Color::*;
use Piece::*;

/// How a piece reaches the squares it attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Rays walked one square at a time until the edge or a blocker.
    Slide(&'static [Direction]),
    /// Fixed jumps, each tested on its own.
    Leap(&'static [Offset]),
    /// Forward-diagonal attacks plus non-capturing advances.
    Pawn,
}

impl Piece {
    #[inline]
    pub fn geometry(&self) -> Geometry {
        CATALOG[self.to_index()]
    }
}

pub const KNIGHT_LEAPS: [Offset; 8] = [
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(2, 1),
];

pub const CENTAUR_LEAPS: [Offset; 8] = [
    Offset::new(-1, -3),
    Offset::new(-1, 3),
    Offset::new(1, -3),
    Offset::new(1, 3),
    Offset::new(-3, -1),
    Offset::new(-3, 1),
    Offset::new(3, -1),
    Offset::new(3, 1),
];

static KING_LEAPS: Lazy<Vec<Offset>> = Lazy::new(|| Direction::iter().map(Offset::from).collect());

static CATALOG: Lazy<Vec<Geometry>> = Lazy::new(|| {
    Piece::iter()
        .map(|piece| match piece {
            Pawn => Geometry::Pawn,
            Rook => Geometry::Slide(&Direction::ORTHOGONALS),
            Knight => Geometry::Leap(&KNIGHT_LEAPS),
            Bishop => Geometry::Slide(&Direction::DIAGONALS),
            Queen | Shapeshifter | Decoy => Geometry::Slide(&Direction::ALL),
            King => Geometry::Leap(KING_LEAPS.as_slice()),
            Horizon => Geometry::Slide(&Direction::SIDEWAYS),
            Centaur => Geometry::Leap(&CENTAUR_LEAPS),
        })
        .collect()
});

/// Diagonal squares a pawn threatens. White pawns face up the board.
pub const fn pawn_attacks(color: Color) -> [Offset; 2] {
    match color {
        White => [Offset::new(-1, 1), Offset::new(1, 1)],
        Black => [Offset::new(-1, -1), Offset::new(1, -1)],
    }
}

/// Single step straight ahead for a pawn of `color`.
pub const fn pawn_advance(color: Color) -> Offset {
    match color {
        White => Offset::new(0, 1),
        Black => Offset::new(0, -1),
    }
}

/// What a Shapeshifter may turn into after its first move.
pub const DEMOTIONS: [Piece; 4] = [Rook, Pawn, Knight, Bishop];

/// Looks a Decoy may put on after moving. Color is part of the bluff.
pub const DISGUISES: [Material; 8] = [
    Material::WP,
    Material::WR,
    Material::WN,
    Material::WB,
    Material::BP,
    Material::BR,
    Material::BN,
    Material::BB,
];
