//! The turn state machine: rolling, moving, game over.
//!
//! One [`Game`] owns the authoritative board and turn. Requests that arrive
//! in the wrong status (a stale click after a transition, a roll while
//! moving) are silent no-ops rather than errors; they are expected UI races,
//! not contract violations.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::dice::{self, DiceSet};
use crate::rules::{has_any_legal_move, legal_moves_from, MoveList};
use crate::types::{PieceColor, PieceKind};

/// Where the active player is in their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    /// Waiting for a dice roll.
    Rolling,
    /// Dice are out; waiting for a move or a forced skip.
    Moving,
    /// A king has been captured. Absorbing; only `reset` leaves it.
    GameOver,
}

/// Complete game state. Constructed at the standard start and replaced
/// wholesale on reset.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: PieceColor,
    dice: Option<DiceSet>,
    status: TurnStatus,
    winner: Option<PieceColor>,
    selected: Option<Square>,
    legal_moves: MoveList,
    can_move: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::standard_start(),
            turn: PieceColor::White,
            dice: None,
            status: TurnStatus::Rolling,
            winner: None,
            selected: None,
            legal_moves: MoveList::new(),
            can_move: true,
        }
    }

    /// A game over a custom position, for setting up test and study
    /// scenarios. Starts in `Rolling` with `to_move` active, unless a king
    /// is already missing, in which case the game begins over.
    pub fn from_position(board: Board, to_move: PieceColor) -> Self {
        let winner = board.missing_king_winner();
        Self {
            status: if winner.is_some() {
                TurnStatus::GameOver
            } else {
                TurnStatus::Rolling
            },
            winner,
            board,
            turn: to_move,
            dice: None,
            selected: None,
            legal_moves: MoveList::new(),
            can_move: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> PieceColor {
        self.turn
    }

    pub fn dice(&self) -> Option<&DiceSet> {
        self.dice.as_ref()
    }

    pub fn status(&self) -> TurnStatus {
        self.status
    }

    pub fn winner(&self) -> Option<PieceColor> {
        self.winner
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal destinations of the current selection. Empty when nothing is
    /// selected.
    pub fn legal_moves(&self) -> &[Square] {
        &self.legal_moves
    }

    /// False when the current dice leave the player with no legal move, in
    /// which case [`Game::skip_turn`] is the only way forward.
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Roll the dice for the active player. Only valid in `Rolling`; no-op
    /// in any other status. Leaves `Moving` status even when the roll
    /// produces no legal move, so the forced skip stays an explicit request.
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.status != TurnStatus::Rolling {
            return;
        }
        self.deal_dice(dice::roll(&self.board, self.turn, rng));
    }

    /// Enter `Moving` with a known dice set instead of rolling. Backs
    /// deterministic replays and scripted scenarios; same no-op rule as
    /// [`Game::roll_dice`].
    pub fn deal_dice(&mut self, dice: DiceSet) {
        if self.status != TurnStatus::Rolling {
            return;
        }
        self.can_move = has_any_legal_move(&self.board, self.turn, &dice);
        self.dice = Some(dice);
        self.status = TurnStatus::Moving;
    }

    /// Handle a square selection in `Moving` status.
    ///
    /// Selecting the already-selected square clears the selection; selecting
    /// a legal destination of the current selection performs the move;
    /// selecting another own, dice-unlocked piece re-selects; anything else
    /// clears (with a selection) or is ignored (without one).
    pub fn select_square(&mut self, square: Square) {
        if self.status != TurnStatus::Moving {
            return;
        }
        // Moving status always carries dice.
        let Some(dice) = self.dice else {
            return;
        };

        if self.selected == Some(square) {
            self.clear_selection();
            return;
        }

        if self.selected.is_some() && self.legal_moves.contains(&square) {
            self.move_to(square);
            return;
        }

        let own_unlocked = self
            .board
            .piece_at(square)
            .is_some_and(|p| p.color == self.turn && dice.contains(p.kind));
        if own_unlocked {
            self.legal_moves = legal_moves_from(&self.board, square, self.turn, &dice);
            self.selected = Some(square);
        } else if self.selected.is_some() {
            self.clear_selection();
        }
    }

    /// Move the selected piece to `to`. No-op unless in `Moving` status with
    /// an active selection and `to` in its legal set. Ends the game when the
    /// move captures the last enemy king; otherwise passes the turn.
    pub fn move_to(&mut self, to: Square) {
        if self.status != TurnStatus::Moving {
            return;
        }
        let Some(from) = self.selected else {
            return;
        };
        if !self.legal_moves.contains(&to) {
            return;
        }

        self.board.apply_move(from, to);
        self.clear_selection();

        if let Some(winner) = self.board.missing_king_winner() {
            // Dice stay on the table; they show the winning roll.
            self.winner = Some(winner);
            self.status = TurnStatus::GameOver;
            return;
        }

        self.pass_turn();
    }

    /// Explicit turn pass, allowed only when the roll produced no legal
    /// move. The board is untouched.
    pub fn skip_turn(&mut self) {
        if self.status != TurnStatus::Moving || self.can_move {
            return;
        }
        self.clear_selection();
        self.pass_turn();
    }

    /// Restart from the standard position. Valid in any status.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.dice = None;
        self.status = TurnStatus::Rolling;
        self.can_move = true;
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.legal_moves.clear();
    }

    /// Distinct kinds the active player may currently move, per the dice.
    /// Empty in `Rolling` and `GameOver`.
    pub fn unlocked_kinds(&self) -> Vec<PieceKind> {
        match (&self.dice, self.status) {
            (Some(dice), TurnStatus::Moving) => {
                let mut kinds: Vec<PieceKind> = Vec::new();
                for face in dice.faces() {
                    if !kinds.contains(&face) {
                        kinds.push(face);
                    }
                }
                kinds
            }
            _ => Vec::new(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
