// Copyright 2026 Tobin Edwards
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

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

use super::square::{Mask, Square};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
}

impl Material {
    pub const WK: Self = Self::new(White, King);
    pub const WQ: Self = Self::new(White, Queen);
    pub const WR: Self = Self::new(White, Rook);
    pub const WB: Self = Self::new(White, Bishop);
    pub const WN: Self = Self::new(White, Knight);
    pub const WP: Self = Self::new(White, Pawn);

    pub const BK: Self = Self::new(Black, King);
    pub const BQ: Self = Self::new(Black, Queen);
    pub const BR: Self = Self::new(Black, Rook);
    pub const BB: Self = Self::new(Black, Bishop);
    pub const BN: Self = Self::new(Black, Knight);
    pub const BP: Self = Self::new(Black, Pawn);

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece
    }

    /// Single-letter symbol, uppercase for White.
    pub fn symbol(&self) -> char {
        let c = self.piece.letter();
        match self.color {
            White => c,
            Black => c.to_ascii_lowercase(),
        }
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
}

impl<T> Pair<T> {
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white().hash(state);
        self.black().hash(state);
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

/// The kinds of piece the engine knows. The last four are variant pieces:
///
/// * `Horizon` slides like a rook but only along its own rank.
/// * `Centaur` leaps like a knight with a longer reach, (±1,±3)/(±3,±1).
/// * `Shapeshifter` moves like a queen until its first move, after which it
///   becomes a rook, pawn, knight or bishop at random.
/// * `Decoy` moves like a queen forever but changes its disguise every
///   time it moves.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Horizon,
    Centaur,
    Shapeshifter,
    Decoy,
}
use Piece::{Bishop, Centaur, Decoy, Horizon, King, Knight, Pawn, Queen, Rook, Shapeshifter};

impl Piece {
    pub fn to_index(&self) -> usize {
        *self as usize
    }
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
    pub fn letter(&self) -> char {
        match *self {
            Pawn => 'P',
            Rook => 'R',
            Knight => 'N',
            Bishop => 'B',
            Queen => 'Q',
            King => 'K',
            Horizon => 'H',
            Centaur => 'C',
            Shapeshifter => 'S',
            Decoy => 'D',
        }
    }
}

/// A piece instance living on a `Position`'s grid. Its `square` always
/// names the cell that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    material: Material,
    square: Square,
    disguise: Option<Material>,
    attacks: Mask,
    legal: Mask,
}

impl Occupant {
    pub(crate) fn new(material: Material, square: Square) -> Self {
        Self {
            material,
            square,
            disguise: None,
            attacks: Mask::empty(),
            legal: Mask::empty(),
        }
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.material.color()
    }
    #[inline]
    pub fn piece(&self) -> Piece {
        self.material.piece()
    }
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }
    /// Squares this piece threatens, ignoring its own king's safety.
    #[inline]
    pub fn attacks(&self) -> &Mask {
        &self.attacks
    }
    /// Squares this piece may actually move to.
    #[inline]
    pub fn legal(&self) -> &Mask {
        &self.legal
    }
    /// How the piece presents itself. Only a Decoy that has moved wears
    /// something other than its own material.
    #[inline]
    pub fn appearance(&self) -> Material {
        self.disguise.unwrap_or(self.material)
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }
    pub(crate) fn set_piece(&mut self, piece: Piece) {
        self.material.set_piece(piece);
    }
    pub(crate) fn set_disguise(&mut self, disguise: Material) {
        self.disguise = Some(disguise);
    }
    pub(crate) fn set_attacks(&mut self, attacks: Mask) {
        self.attacks = attacks;
    }
    pub(crate) fn set_legal(&mut self, legal: Mask) {
        self.legal = legal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_not() {
        assert_eq!(!White, Black);
        assert_eq!(!Black, White);
    }
    #[test]
    fn test_pair_index() {
        let mut pair = Pair::new(1, 2);
        assert_eq!(pair[White], 1);
        assert_eq!(pair[Black], 2);
        pair[Black] = 5;
        assert_eq!(*pair.black(), 5);
    }
    #[test]
    fn test_symbols() {
        assert_eq!(Material::WK.symbol(), 'K');
        assert_eq!(Material::BN.symbol(), 'n');
        assert_eq!(Material::black(Centaur).symbol(), 'c');
        assert_eq!(Material::white(Horizon).symbol(), 'H');
    }
    #[test]
    fn test_decoy_appearance() {
        let mut occupant = Occupant::new(Material::white(Decoy), Square::new(3, 0));
        assert_eq!(occupant.appearance(), Material::white(Decoy));
        occupant.set_disguise(Material::BP);
        assert_eq!(occupant.appearance(), Material::BP);
        assert_eq!(occupant.piece(), Decoy);
    }
}
