//! Read-only snapshots handed out to session consumers.

use serde::{Deserialize, Serialize};

use dicechess_engine::{format_placement, Game, PieceColor, PieceKind, Square, TurnStatus};

/// A full, self-contained view of one game state. Consumers never see the
/// live `Game`; they get one of these per change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// FEN-style piece placement of the current board.
    pub placement: String,
    pub turn: PieceColor,
    pub dice: Option<[PieceKind; 3]>,
    pub status: TurnStatus,
    pub winner: Option<PieceColor>,
    pub selected: Option<Square>,
    pub legal_moves: Vec<Square>,
    pub can_move: bool,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        Self {
            placement: format_placement(game.board()),
            turn: game.turn(),
            dice: game.dice().map(|d| d.faces()),
            status: game.status(),
            winner: game.winner(),
            selected: game.selected(),
            legal_moves: game.legal_moves().to_vec(),
            can_move: game.can_move(),
        }
    }
}
