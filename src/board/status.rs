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

use log::info;
use serde::{Deserialize, Serialize};

use super::material::Color;
use super::position::Position;
use super::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardResult {
    /// The winner.
    CheckMate(Color),
    StaleMate,
}

impl BoardResult {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            BoardResult::CheckMate(color) => Some(color),
            BoardResult::StaleMate => None,
        }
    }
}

/// True when some piece of the other side currently attacks `color`'s
/// king. Reads attack-sets as they stand, so they must be fresh.
pub fn is_check(position: &Position, color: Color) -> bool {
    match position.king(color) {
        Some(king) => position
            .pieces(!color)
            .any(|occupant| occupant.attacks().contains(king)),
        None => false,
    }
}

/// True when no piece of `color` has a legal destination.
pub fn has_no_moves(position: &Position, color: Color) -> bool {
    position
        .pieces(color)
        .all(|occupant| occupant.legal().is_empty())
}

/// Decides the game for the side to move. Having a move available keeps
/// the game going even while in check.
pub fn evaluate(position: &Position) -> Option<BoardResult> {
    let side = position.turn();
    if !has_no_moves(position, side) {
        return None;
    }
    let result = if position.is_check(side) {
        BoardResult::CheckMate(!side)
    } else {
        BoardResult::StaleMate
    };
    info!("{} has no moves: {:?}", side, result);
    Some(result)
}
