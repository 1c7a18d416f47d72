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

use anyhow::Result;
use log::info;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Board, BoardConfig, BoardResult, Color, Move, Variant};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
    Resigned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
}

impl From<BoardResult> for GameResult {
    fn from(value: BoardResult) -> Self {
        match value {
            BoardResult::CheckMate(winner) => GameResult::Win(winner, WinReason::CheckMate),
            BoardResult::StaleMate => GameResult::Draw(DrawReason::StaleMate),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("The game has already been decided")]
    AlreadyDecided,
}
use GameError::*;

/// A game between two players: a board plus the things that happen
/// off the board, resigning and starting over.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    config: BoardConfig,
    board: Board,
    resigned: Option<Color>,
}

impl Game {
    pub fn new(id: GameId, config: BoardConfig) -> Result<Self> {
        let board = Board::new(&config)?;
        Ok(Self {
            id,
            config,
            board,
            resigned: None,
        })
    }

    #[inline]
    pub fn id(&self) -> GameId {
        self.id
    }
    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.resigned {
            Some(color) => Some(GameResult::Win(!color, WinReason::Resigned)),
            None => self.board.board_result().map(GameResult::from),
        }
    }
    #[inline]
    pub fn is_decided(&self) -> bool {
        self.result().is_some()
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        self.ensure_open()?;
        self.board.submit_move(mv)
    }
    pub fn undo(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.board.undo()
    }
    pub fn redo(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.board.redo()
    }

    /// `color` gives up and the other side wins.
    pub fn resign(&mut self, color: Color) -> Result<()> {
        self.ensure_open()?;
        info!("game {:?}: {} resigned", self.id, color);
        self.resigned = Some(color);
        Ok(())
    }

    /// Throws the board away and sets up a fresh one, optionally with a
    /// different starting layout.
    pub fn restart(&mut self, variant: Option<Variant>) -> Result<()> {
        let mut config = self.config;
        if let Some(variant) = variant {
            config.variant = variant;
        }
        self.board = Board::new(&config)?;
        self.config = config;
        self.resigned = None;
        info!("game {:?}: restarted as {}", self.id, config.variant);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_decided() {
            return Err(AlreadyDecided.into());
        }
        Ok(())
    }
}
