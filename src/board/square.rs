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

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, BitOr};
use strum_macros::EnumIter;

/// Coordinates of a single square. Files count left to right from 0 and
/// ranks count up from White's back row at 0. A square knows nothing about
/// the board it sits on; `Position::is_on_board` is the bounds check.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { rank, file }
    }
    #[inline]
    pub fn from_string(name: &str) -> Self {
        Self::try_from_string(name).expect("Square::from_string: invalid format")
    }
    /// Parses algebraic names such as `"e4"`. Ranks may use more than one
    /// digit on tall boards (`"a12"`).
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let file = match f {
            'a'..='z' => f as u8 - b'a',
            'A'..='Z' => f as u8 - b'A',
            _ => return None,
        };
        let digits = chars.as_str();
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let rank: u8 = digits.parse().ok()?;
        if rank == 0 {
            return None;
        }
        Some(Self::new(file, rank - 1))
    }

    #[inline]
    pub const fn file(&self) -> u8 {
        self.file
    }
    #[inline]
    pub const fn rank(&self) -> u8 {
        self.rank
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file < 26 {
            write!(f, "{}{}", (b'a' + self.file) as char, self.rank as usize + 1)
        } else {
            write!(f, "({},{})", self.file, self.rank)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

/// Only guards against negative coordinates; the upper bound belongs to
/// the board.
impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = u8::try_from((self.file as isize).checked_add(rhs.x)?).ok()?;
        let rank = u8::try_from((self.rank as isize).checked_add(rhs.y)?).ok()?;
        Some(Square::new(file, rank))
    }
}

/// Compass directions as seen from White's side of the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub const ORTHOGONALS: [Direction; 4] = [Up, Left, Right, Down];
    pub const DIAGONALS: [Direction; 4] = [UpLeft, UpRight, DownLeft, DownRight];
    pub const SIDEWAYS: [Direction; 2] = [Left, Right];
    pub const ALL: [Direction; 8] = [UpLeft, Up, UpRight, Left, Right, DownLeft, Down, DownRight];
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, 1),
            Up => Self::new(0, 1),
            UpRight => Self::new(1, 1),
            Left => Self::new(-1, 0),
            Right => Self::new(1, 0),
            DownLeft => Self::new(-1, -1),
            Down => Self::new(0, -1),
            DownRight => Self::new(1, -1),
        }
    }
}

/// An ordered set of squares. Attack-sets and legal-sets are masks.
/// Iteration runs rank by rank from White's side, left to right.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Mask(BTreeSet<Square>);

impl Mask {
    #[inline]
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        Self(squares.into_iter().collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.0.contains(&square)
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0.insert(square);
    }

    #[inline]
    pub fn set_if(&mut self, square: Square, cond: bool) {
        if cond {
            self.0.insert(square);
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Square> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter().map(|s| s.to_string())).finish()
    }
}

impl FromIterator<Square> for Mask {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        Self::from_squares(iter)
    }
}

impl BitOr<&Mask> for Mask {
    type Output = Self;
    fn bitor(self, rhs: &Mask) -> Self {
        Self(&self.0 | &rhs.0)
    }
}
