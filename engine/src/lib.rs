//! Dice chess rules engine.
//!
//! A two-player chess variant: before moving, the active player rolls three
//! dice whose faces are piece kinds, and only pieces of rolled kinds may
//! move that turn. There is no check or checkmate; capturing the enemy king
//! wins outright. The crate is pure and synchronous; randomness is injected
//! through [`rand::Rng`] so every roll is reproducible. Hosts that need a
//! shared, multi-consumer game should use the `dicechess-session` actor
//! instead of sharing a [`Game`] directly.

pub mod attack;
pub mod board;
pub mod dice;
pub mod fen;
pub mod game;
pub mod rules;
pub mod types;

pub use attack::is_square_attacked;
pub use board::{Board, Square};
pub use dice::{roll, DiceSet};
pub use fen::{format_placement, parse_placement, FenError};
pub use game::{Game, TurnStatus};
pub use rules::{has_any_legal_move, is_legal_move, legal_moves_from, MoveList};
pub use types::{Piece, PieceColor, PieceKind};
