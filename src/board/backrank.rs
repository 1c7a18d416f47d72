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
use std::fmt::Display;

use super::material::Piece;
use Piece::{Bishop, Centaur, Horizon, King, Knight, Queen, Rook};

/// Selects which pieces stand in the corners and beside them at the start.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Rooks and knights, as in standard chess.
    #[default]
    Classic,
    /// Horizons in the corners and Centaurs beside them.
    Custom,
}

impl Variant {
    pub fn backrank(&self) -> &'static BackRank {
        match self {
            Variant::Classic => &CLASSIC,
            Variant::Custom => &CUSTOM,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Classic => write!(f, "classic"),
            Variant::Custom => write!(f, "custom"),
        }
    }
}

/// The eight pieces placed on each side's back row, listed from file `a`.
/// Boards wider than eight files leave the remaining back-row cells empty.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackRank {
    pieces: [Piece; 8],
}

/// File of the king on either back row.
pub const KING_FILE: u8 = 4;

static CLASSIC: BackRank = BackRank {
    pieces: [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook],
};

static CUSTOM: BackRank = BackRank {
    pieces: [Horizon, Centaur, Bishop, Queen, King, Bishop, Centaur, Horizon],
};

impl BackRank {
    pub fn iter(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.pieces.iter().enumerate().map(|(file, piece)| (file as u8, *piece))
    }
}
