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
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::catalog::{pawn_advance, pawn_attacks, Geometry};
use super::material::Color;
use super::position::{Position, Probe};
use super::square::{Direction, Mask, Offset, Square};
use super::Turn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move")]
    InvalidMove,
    #[error("No piece on {0}")]
    Vacant(Square),
    #[error("It is not {0}'s turn")]
    OutOfTurn(Color),
    #[error("The game is over")]
    GameOver,
}
use MoveError::*;

/// A request to move whatever stands on `from` to `to`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Squares the piece on `from` threatens, regardless of whether moving
/// there would leave its own king in check. Friendly squares are never
/// included; the first enemy piece on a ray is.
pub fn attacks(position: &Position, from: Square) -> Mask {
    match position.occupant(from) {
        Some(occupant) => {
            let color = occupant.color();
            match occupant.piece().geometry() {
                Geometry::Slide(directions) => slide(position, from, color, directions),
                Geometry::Leap(offsets) => leap(position, from, color, offsets),
                Geometry::Pawn => leap(position, from, color, &pawn_attacks(color)),
            }
        }
        None => Mask::empty(),
    }
}

fn slide(position: &Position, from: Square, color: Color, directions: &[Direction]) -> Mask {
    let mut mask = Mask::empty();
    for direction in directions {
        let offset = Offset::from(*direction);
        let mut square = from;
        while let Some(next) = position.step(square, offset) {
            match position.probe(next) {
                Probe::Vacant => {
                    mask.set(next);
                    square = next;
                }
                Probe::Occupied(side) => {
                    mask.set_if(next, side != color);
                    break;
                }
                Probe::OffBoard => break,
            }
        }
    }
    mask
}

fn leap(position: &Position, from: Square, color: Color, offsets: &[Offset]) -> Mask {
    offsets
        .iter()
        .filter_map(|offset| position.step(from, *offset))
        .filter(|dest| position.probe(*dest) != Probe::Occupied(color))
        .collect()
}

/// Non-capturing forward moves for the pawn on `from`. These are never
/// part of a pawn's attack-set.
pub fn pawn_advances(position: &Position, from: Square) -> Mask {
    let mut mask = Mask::empty();
    let Some(color) = position.side_of(from) else {
        return mask;
    };
    let ahead = pawn_advance(color);
    if let Some(one) = position.step(from, ahead) {
        if position.probe(one) == Probe::Vacant {
            mask.set(one);
            if from.rank() == position.pawn_rank(color) {
                if let Some(two) = position.step(one, ahead) {
                    mask.set_if(two, position.probe(two) == Probe::Vacant);
                }
            }
        }
    }
    mask
}

/// Destinations the piece on `from` could reach before its own king's
/// safety is considered. A pawn only captures diagonally onto an enemy
/// piece and otherwise advances.
pub fn candidates(position: &Position, from: Square) -> Mask {
    let Some(occupant) = position.occupant(from) else {
        return Mask::empty();
    };
    let attacked = attacks(position, from);
    if occupant.piece().is_pawn() {
        let enemy = Probe::Occupied(!occupant.color());
        let captures: Mask = attacked
            .iter()
            .filter(|dest| position.probe(*dest) == enemy)
            .collect();
        captures | &pawn_advances(position, from)
    } else {
        attacked
    }
}

/// Candidates of the piece on `from` that do not leave its own side in
/// check. Each one is tried on a single scratch copy of the position,
/// which is put back after every attempt.
pub fn legal_destinations(position: &Position, from: Square) -> Mask {
    let Some(mover) = position.occupant(from).cloned() else {
        return Mask::empty();
    };
    let color = mover.color();
    let mut legal = Mask::empty();
    let mut scratch = position.snapshot();
    for to in candidates(position, from).iter() {
        let captured = scratch.relocate(from, to);
        // only the opponent's attacks can put our king in check
        scratch.update_attacks_of(!color);
        scratch.update_checks();
        legal.set_if(to, !scratch.is_check(color));

        scratch.vacate(to);
        if let Some(captured) = captured {
            scratch.restore(captured);
        }
        scratch.restore(mover.clone());
    }
    legal
}

/// Checks that `mv` may be played now: the game is still running, the
/// origin holds a piece of the side to move and the destination is in
/// that piece's legal-set.
pub fn validate_move(position: &Position, mv: Move) -> Result<()> {
    if position.is_game_ended() {
        return Err(GameOver.into());
    }
    let occupant = position.occupant(mv.from).ok_or(Vacant(mv.from))?;
    if occupant.color() != position.turn() {
        return Err(OutOfTurn(occupant.color()).into());
    }
    if !occupant.legal().contains(mv.to) {
        return Err(InvalidMove.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::config::BoardConfig;
    use crate::board::material::{Material, Piece};
    use Color::*;
    use Piece::*;

    fn sq(name: &str) -> Square {
        Square::from_string(name)
    }

    fn empty() -> Position {
        Position::default().cleared()
    }

    fn legal_count(position: &Position, color: Color) -> usize {
        position.pieces(color).map(|o| o.legal().len()).sum()
    }

    #[test]
    fn test_initial_attack_counts() {
        let position = Position::default();
        for occupant in position.occupants() {
            let expected = match occupant.piece() {
                Knight => 2,
                Pawn if matches!(occupant.square().file(), 0 | 7) => 1,
                Pawn => 2,
                _ => 0,
            };
            assert_eq!(
                occupant.attacks().len(),
                expected,
                "{:?} on {}",
                occupant.material(),
                occupant.square()
            );
        }
    }
    #[test]
    fn test_initial_attack_counts_custom() {
        let position = Position::new(&BoardConfig::custom()).unwrap();
        for occupant in position.occupants() {
            let expected = match occupant.piece() {
                Centaur => 2,
                Pawn if matches!(occupant.square().file(), 0 | 7) => 1,
                Pawn => 2,
                _ => 0,
            };
            assert_eq!(occupant.attacks().len(), expected, "{}", occupant.square());
        }
    }
    #[test]
    fn test_twenty_opening_moves_each() {
        for config in [BoardConfig::classic(), BoardConfig::custom()] {
            let position = Position::new(&config).unwrap();
            assert_eq!(legal_count(&position, White), 20, "{}", config.variant);
            assert_eq!(legal_count(&position, Black), 20, "{}", config.variant);
        }
    }
    #[test]
    fn test_white_can_move_first() {
        let position = Position::default();
        assert!(validate_move(&position, Move::new(sq("e2"), sq("e4"))).is_ok());
    }
    #[test]
    fn test_black_cannot_move_first() {
        let position = Position::default();
        let err = validate_move(&position, Move::new(sq("e7"), sq("e5"))).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&OutOfTurn(Black)));
    }
    #[test]
    fn test_vacant_origin() {
        let position = Position::default();
        let err = validate_move(&position, Move::new(sq("e4"), sq("e5"))).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&Vacant(sq("e4"))));
    }
    #[test]
    fn test_illegal_destination() {
        let position = Position::default();
        let err = validate_move(&position, Move::new(sq("e2"), sq("e5"))).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&InvalidMove));
    }
    #[test]
    fn test_white_pawn_advance() {
        let position = Position::default();
        let destinations = position.legal_moves(sq("e2"));
        assert!(destinations.contains(sq("e3")));
        assert!(destinations.contains(sq("e4")));
        assert_eq!(destinations.len(), 2);
    }
    #[test]
    fn test_black_pawn_advance() {
        let position = Position::default().set_turn(Black).refreshed();
        let destinations = position.legal_moves(sq("e7"));
        assert!(destinations.contains(sq("e6")));
        assert!(destinations.contains(sq("e5")));
    }
    #[test]
    fn test_white_pawn_advance_blocked() {
        let position = Position::default()
            .set_contents(sq("e3"), Some(Material::BB))
            .refreshed();
        let destinations = position.legal_moves(sq("e2"));
        assert!(!destinations.contains(sq("e3")));
        assert!(!destinations.contains(sq("e4")));
    }
    #[test]
    fn test_white_pawn_double_advance_blocked() {
        let position = Position::default()
            .set_contents(sq("e4"), Some(Material::BB))
            .refreshed();
        let destinations = position.legal_moves(sq("e2"));
        assert!(destinations.contains(sq("e3")));
        assert!(!destinations.contains(sq("e4")));
    }
    #[test]
    fn test_black_pawn_double_advance_blocked() {
        let position = Position::default()
            .set_turn(Black)
            .set_contents(sq("e5"), Some(Material::WB))
            .refreshed();
        let destinations = position.legal_moves(sq("e7"));
        assert!(destinations.contains(sq("e6")));
        assert!(!destinations.contains(sq("e5")));
    }
    #[test]
    fn test_no_double_advance_off_start_rank() {
        let position = Position::default()
            .set_contents(sq("e2"), None)
            .set_contents(sq("e3"), Some(Material::WP))
            .refreshed();
        let destinations = position.legal_moves(sq("e3"));
        assert!(destinations.contains(sq("e4")));
        assert!(!destinations.contains(sq("e5")));
    }
    #[test]
    fn test_pawn_on_far_rank_is_stuck() {
        let position = empty()
            .set_contents(sq("a1"), Some(Material::WK))
            .set_contents(sq("d8"), Some(Material::WP))
            .refreshed();
        assert!(position.legal_moves(sq("d8")).is_empty());
    }
    #[test]
    fn test_white_pawn_capture() {
        let position = Position::default()
            .set_contents(sq("d3"), Some(Material::BB))
            .set_contents(sq("f3"), Some(Material::WN))
            .refreshed();
        let destinations = position.legal_moves(sq("e2"));
        assert!(destinations.contains(sq("d3")));
        assert!(!destinations.contains(sq("f3")));
        // empty diagonals are attacked but cannot be moved to
        let pawn = position.occupant(sq("c2")).unwrap();
        assert!(pawn.attacks().contains(sq("b3")));
        assert!(!pawn.legal().contains(sq("b3")));
        assert!(pawn.legal().contains(sq("d3")));
    }
    #[test]
    fn test_pawn_attack_excludes_advance() {
        let position = empty()
            .set_contents(sq("d4"), Some(Material::WP))
            .set_contents(sq("d5"), Some(Material::BP))
            .refreshed();
        let pawn = position.occupant(sq("d4")).unwrap();
        assert!(!pawn.attacks().contains(sq("d5")));
        assert!(pawn.legal().is_empty());
    }
    #[test]
    fn test_knight_destinations() {
        let position = empty()
            .set_contents(sq("a1"), Some(Material::WN))
            .set_contents(sq("d4"), Some(Material::BN))
            .set_contents(sq("e6"), Some(Material::BP))
            .refreshed();
        assert_eq!(position.occupant(sq("a1")).unwrap().attacks().len(), 2);
        let attacks = position.occupant(sq("d4")).unwrap().attacks().clone();
        assert_eq!(attacks.len(), 7);
        assert!(!attacks.contains(sq("e6")));
    }
    #[test]
    fn test_centaur_destinations() {
        let position = empty()
            .set_contents(sq("d4"), Some(Material::white(Centaur)))
            .refreshed();
        let attacks = position.occupant(sq("d4")).unwrap().attacks().clone();
        assert_eq!(attacks.len(), 8);
        for name in ["c1", "e1", "c7", "e7", "a3", "a5", "g3", "g5"] {
            assert!(attacks.contains(sq(name)), "{name}");
        }
    }
    #[test]
    fn test_horizon_moves_along_rank_only() {
        let position = empty()
            .set_contents(sq("d4"), Some(Material::white(Horizon)))
            .set_contents(sq("g4"), Some(Material::BP))
            .set_contents(sq("b4"), Some(Material::WP))
            .refreshed();
        let attacks = position.occupant(sq("d4")).unwrap().attacks().clone();
        assert_eq!(
            attacks,
            Mask::from_squares([sq("c4"), sq("e4"), sq("f4"), sq("g4")])
        );
    }
    #[test]
    fn test_rook_destinations() {
        let position = empty()
            .set_contents(sq("d4"), Some(Material::WR))
            .set_contents(sq("d6"), Some(Material::BP))
            .set_contents(sq("f4"), Some(Material::WP))
            .refreshed();
        let attacks = position.occupant(sq("d4")).unwrap().attacks().clone();
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("d7")));
        assert!(attacks.contains(sq("e4")));
        assert!(!attacks.contains(sq("f4")));
        // d1..d3, d5, d6, a4..c4, e4
        assert_eq!(attacks.len(), 9);
    }
    #[test]
    fn test_bishop_destinations() {
        let position = empty()
            .set_contents(sq("c1"), Some(Material::WB))
            .refreshed();
        let attacks = position.occupant(sq("c1")).unwrap().attacks().clone();
        assert_eq!(attacks.len(), 7);
        assert!(attacks.contains(sq("h6")));
        assert!(attacks.contains(sq("a3")));
    }
    #[test]
    fn test_queen_like_pieces_share_reach() {
        let queen = empty()
            .set_contents(sq("d4"), Some(Material::WQ))
            .refreshed();
        let shapeshifter = empty()
            .set_contents(sq("d4"), Some(Material::white(Shapeshifter)))
            .refreshed();
        let decoy = empty()
            .set_contents(sq("d4"), Some(Material::white(Decoy)))
            .refreshed();
        let reach = queen.occupant(sq("d4")).unwrap().attacks().clone();
        assert_eq!(reach.len(), 27);
        assert_eq!(shapeshifter.occupant(sq("d4")).unwrap().attacks(), &reach);
        assert_eq!(decoy.occupant(sq("d4")).unwrap().attacks(), &reach);
    }
    #[test]
    fn test_discovered_check_pins_piece() {
        let position = empty()
            .set_contents(sq("e1"), Some(Material::WK))
            .set_contents(sq("e2"), Some(Material::WB))
            .set_contents(sq("e8"), Some(Material::BR))
            .refreshed();
        let bishop = position.occupant(sq("e2")).unwrap();
        assert!(!bishop.attacks().is_empty());
        assert!(bishop.legal().is_empty());
        assert!(!position.is_check(White));
    }
    #[test]
    fn test_pinned_rook_slides_along_pin() {
        let position = empty()
            .set_contents(sq("e1"), Some(Material::WK))
            .set_contents(sq("e2"), Some(Material::WR))
            .set_contents(sq("e8"), Some(Material::BR))
            .refreshed();
        let legal = position.legal_moves(sq("e2"));
        assert!(legal.contains(sq("e8")));
        assert!(legal.contains(sq("e5")));
        assert!(!legal.contains(sq("d2")));
        assert_eq!(legal.len(), 6);
    }
    #[test]
    fn test_king_avoids_attacked_squares() {
        let position = empty()
            .set_contents(sq("e1"), Some(Material::WK))
            .set_contents(sq("d8"), Some(Material::BR))
            .refreshed();
        let legal = position.legal_moves(sq("e1"));
        assert!(!legal.contains(sq("d1")));
        assert!(!legal.contains(sq("d2")));
        assert!(legal.contains(sq("e2")));
        assert!(legal.contains(sq("f1")));
        assert!(legal.contains(sq("f2")));
        assert_eq!(legal.len(), 3);
    }
    #[test]
    fn test_king_cannot_take_defended_piece() {
        let position = empty()
            .set_contents(sq("e1"), Some(Material::WK))
            .set_contents(sq("e2"), Some(Material::BQ))
            .set_contents(sq("e3"), Some(Material::BR))
            .refreshed();
        assert!(!position.legal_moves(sq("e1")).contains(sq("e2")));
        assert!(position.legal_moves(sq("e1")).is_empty());
    }
    #[test]
    fn test_check_must_be_answered() {
        let position = Position::default()
            .set_contents(sq("e2"), None)
            .set_contents(sq("e4"), Some(Material::BR))
            .refreshed();
        assert!(position.is_check(White));
        // blocking on e2 or e3 is possible, other pawn moves are not
        assert!(position.legal_moves(sq("a2")).is_empty());
        assert!(position.legal_moves(sq("d1")).contains(sq("e2")));
        assert!(position.legal_moves(sq("f1")).contains(sq("e2")));
        assert!(position.legal_moves(sq("g1")).contains(sq("e2")));
    }
    #[test]
    fn test_legal_filter_leaves_position_untouched() {
        let position = Position::seeded(9)
            .set_contents(sq("d4"), Some(Material::white(Shapeshifter)))
            .refreshed();
        let before = position.to_string();
        let legal = legal_destinations(&position, sq("d4"));
        assert!(!legal.is_empty());
        assert_eq!(position.to_string(), before);
        assert_eq!(position.contents(sq("d4")), Some(Material::white(Shapeshifter)));
    }
    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(sq("e2"), sq("e4")).to_string(), "e2e4");
    }
}
