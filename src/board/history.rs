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
use log::debug;
use thiserror::Error;

use super::material::Occupant;
use super::moves::{validate_move, Move, MoveError};
use super::position::Position;
use super::square::Square;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
}
use HistoryError::*;

/// Everything needed to play a move forwards or backwards again without
/// consulting the rules: the piece as it stood before the move, the piece
/// as it landed (a Shapeshifter or Decoy may have changed on the way) and
/// whatever it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    mover: Occupant,
    landed: Occupant,
    captured: Option<Occupant>,
}

impl MoveRecord {
    #[inline]
    pub fn from(&self) -> Square {
        self.mover.square()
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.landed.square()
    }
    #[inline]
    pub fn as_move(&self) -> Move {
        Move::new(self.from(), self.to())
    }
    #[inline]
    pub fn mover(&self) -> &Occupant {
        &self.mover
    }
    #[inline]
    pub fn landed(&self) -> &Occupant {
        &self.landed
    }
    #[inline]
    pub fn captured(&self) -> Option<&Occupant> {
        self.captured.as_ref()
    }
}

/// Applied moves that can be undone and undone moves that can be redone.
/// Playing a new move throws the redo stack away.
#[derive(Debug, Clone, Default)]
pub struct History {
    applied: Vec<MoveRecord>,
    reverted: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(&mut self, position: &mut Position, mv: Move) -> Result<&MoveRecord> {
        validate_move(position, mv)?;
        let mover = position.occupant(mv.from).cloned().ok_or(MoveError::Vacant(mv.from))?;
        let captured = position.relocate(mv.from, mv.to);
        let landed = position.occupant(mv.to).cloned().ok_or(MoveError::InvalidMove)?;
        position.advance_turn();
        debug!("executed {} ({:?})", mv, landed.material());

        self.reverted.clear();
        self.applied.push(MoveRecord {
            mover,
            landed,
            captured,
        });
        Ok(&self.applied[self.applied.len() - 1])
    }

    pub fn undo(&mut self, position: &mut Position) -> Result<()> {
        let record = self.applied.pop().ok_or(NothingToUndo)?;
        position.vacate(record.to());
        if let Some(captured) = record.captured.clone() {
            position.restore(captured);
        }
        position.restore(record.mover.clone());
        position.advance_turn();
        debug!("undid {}", record.as_move());
        self.reverted.push(record);
        Ok(())
    }

    pub fn redo(&mut self, position: &mut Position) -> Result<()> {
        let record = self.reverted.pop().ok_or(NothingToRedo)?;
        position.vacate(record.from());
        position.restore(record.landed.clone());
        position.advance_turn();
        debug!("redid {}", record.as_move());
        self.applied.push(record);
        Ok(())
    }

    #[inline]
    pub fn undo_available(&self) -> bool {
        !self.applied.is_empty()
    }
    #[inline]
    pub fn redo_available(&self) -> bool {
        !self.reverted.is_empty()
    }

    /// Moves played so far, oldest first.
    pub fn applied(&self) -> &[MoveRecord] {
        &self.applied
    }
    /// Undone moves, the next one to redo last.
    pub fn reverted(&self) -> &[MoveRecord] {
        &self.reverted
    }
    pub fn last(&self) -> Option<&MoveRecord> {
        self.applied.last()
    }
}
