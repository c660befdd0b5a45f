//! Square-attack detection for king-safety checks.
//!
//! Used exclusively to veto moves that would leave the mover's own king on
//! an attacked square. The caller passes a hypothetical board (the position
//! as it would look after the candidate move); nothing here mutates it.

use crate::board::{Board, Square};
use crate::types::{PieceColor, PieceKind};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// True if `square` is attacked by any piece of `defender`'s opponent.
///
/// Ray scans stop at the first occupied square in each direction: the first
/// piece encountered blocks the ray whether friend or foe, and scores a hit
/// only if it is an enemy slider matching the ray's geometry. Knights, pawns
/// and the enemy king are checked by fixed offsets. Kings attack adjacent
/// squares here even though two adjacent kings are unreachable through the
/// move rules; the check stays so a king move can never step next to the
/// enemy king.
pub fn is_square_attacked(board: &Board, square: Square, defender: PieceColor) -> bool {
    let attacker = defender.opponent();

    for &(dr, dc) in ORTHOGONAL.iter().chain(DIAGONAL.iter()) {
        let diagonal = dr != 0 && dc != 0;
        let mut cursor = square.offset(dr, dc);
        while let Some(sq) = cursor {
            if let Some(piece) = board.piece_at(sq) {
                if piece.color == attacker {
                    let hits = match piece.kind {
                        PieceKind::Queen => true,
                        PieceKind::Rook => !diagonal,
                        PieceKind::Bishop => diagonal,
                        _ => false,
                    };
                    if hits {
                        return true;
                    }
                }
                break;
            }
            cursor = sq.offset(dr, dc);
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(sq) = square.offset(dr, dc) {
            if let Some(piece) = board.piece_at(sq) {
                if piece.color == attacker && piece.kind == PieceKind::Knight {
                    return true;
                }
            }
        }
    }

    // Enemy pawns attack diagonally toward the defender: a white defender is
    // hit from row-1, a black one from row+1.
    let pawn_dr = match defender {
        PieceColor::White => -1,
        PieceColor::Black => 1,
    };
    for dc in [-1, 1] {
        if let Some(sq) = square.offset(pawn_dr, dc) {
            if let Some(piece) = board.piece_at(sq) {
                if piece.color == attacker && piece.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
    }

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(sq) = square.offset(dr, dc) {
                if let Some(piece) = board.piece_at(sq) {
                    if piece.color == attacker && piece.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }
    }

    false
}
