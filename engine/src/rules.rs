//! Move legality: per-kind geometry, dice constraints, and the king-safety
//! veto.
//!
//! Behavior is dispatched by a match over [`PieceKind`]; the six kinds are a
//! closed set and stay that way. There is no separate "in check" state: the
//! only safeguard is the post-hoc veto of any move whose resulting position
//! leaves the mover's king attacked.

use smallvec::SmallVec;

use crate::attack::is_square_attacked;
use crate::board::{Board, Square};
use crate::dice::DiceSet;
use crate::types::{PieceColor, PieceKind};

/// Destinations of a single piece; a queen tops out at 27.
pub type MoveList = SmallVec<[Square; 27]>;

/// Full legality check for one candidate move.
///
/// Rejections, in order: empty origin, wrong owner, kind not unlocked by the
/// dice, destination held by the mover's own piece, geometry failure, and
/// finally the king-safety veto on the simulated position.
pub fn is_legal_move(
    board: &Board,
    from: Square,
    to: Square,
    turn: PieceColor,
    dice: &DiceSet,
) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color != turn {
        return false;
    }
    if !dice.contains(piece.kind) {
        return false;
    }

    let target = board.piece_at(to);
    if target.is_some_and(|t| t.color == turn) {
        return false;
    }

    let dy = to.row() as i8 - from.row() as i8;
    let dx = to.col() as i8 - from.col() as i8;
    let (abs_dy, abs_dx) = (dy.abs(), dx.abs());

    let geometry_ok = match piece.kind {
        PieceKind::Pawn => {
            let direction: i8 = match turn {
                PieceColor::White => -1,
                PieceColor::Black => 1,
            };
            let start_row = match turn {
                PieceColor::White => 6,
                PieceColor::Black => 1,
            };

            if dx == 0 && dy == direction && target.is_none() {
                true
            } else if dx == 0
                && dy == 2 * direction
                && from.row() == start_row
                && target.is_none()
            {
                // Both the intermediate and the destination square must be
                // empty, even of enemy pieces.
                let intermediate = Square::new((from.row() as i8 + direction) as usize, from.col());
                board.piece_at(intermediate).is_none()
            } else {
                // Diagonal capture only; no quiet diagonals, no en passant.
                abs_dx == 1 && dy == direction && target.is_some()
            }
        }
        PieceKind::Rook => (dy == 0 || dx == 0) && path_clear(board, from, to),
        PieceKind::Knight => (abs_dy == 2 && abs_dx == 1) || (abs_dy == 1 && abs_dx == 2),
        PieceKind::Bishop => abs_dy == abs_dx && path_clear(board, from, to),
        PieceKind::Queen => {
            (dy == 0 || dx == 0 || abs_dy == abs_dx) && path_clear(board, from, to)
        }
        PieceKind::King => abs_dy <= 1 && abs_dx <= 1,
    };
    if !geometry_ok {
        return false;
    }

    !would_expose_king(board, from, to, turn)
}

/// Simulate the move and report whether the mover's own king ends up
/// attacked. If the king itself moves, its safety is checked at the
/// destination. A mover with no king on the board is never vetoed.
fn would_expose_king(board: &Board, from: Square, to: Square, turn: PieceColor) -> bool {
    let moving_king = board
        .piece_at(from)
        .is_some_and(|p| p.kind == PieceKind::King);
    let king_square = if moving_king {
        Some(to)
    } else {
        board.king_square(turn)
    };
    let Some(king_square) = king_square else {
        return false;
    };

    let mut simulated = board.clone();
    simulated.apply_move(from, to);
    is_square_attacked(&simulated, king_square, turn)
}

/// All legal destinations of the piece at `from`, in row-major order.
/// Recomputed on every call; nothing is cached here.
pub fn legal_moves_from(
    board: &Board,
    from: Square,
    turn: PieceColor,
    dice: &DiceSet,
) -> MoveList {
    let mut moves = MoveList::new();
    for row in 0..8 {
        for col in 0..8 {
            let to = Square::new(row, col);
            if is_legal_move(board, from, to, turn, dice) {
                moves.push(to);
            }
        }
    }
    moves
}

/// Whether `turn` has at least one legal move under `dice`. Short-circuits
/// on the first hit; a false result is a forced skip.
pub fn has_any_legal_move(board: &Board, turn: PieceColor, dice: &DiceSet) -> bool {
    for (from, piece) in board.pieces() {
        if piece.color != turn || !dice.contains(piece.kind) {
            continue;
        }
        for row in 0..8 {
            for col in 0..8 {
                if is_legal_move(board, from, Square::new(row, col), turn, dice) {
                    return true;
                }
            }
        }
    }
    false
}

fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dy = (to.row() as i8 - from.row() as i8).signum();
    let dx = (to.col() as i8 - from.col() as i8).signum();
    let mut cursor = from.offset(dy, dx);
    while let Some(sq) = cursor {
        if sq == to {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        cursor = sq.offset(dy, dx);
    }
    // Only reachable if from/to are not actually ray-aligned; geometry
    // checks rule that out before we get here.
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_placement;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn all_kinds() -> DiceSet {
        DiceSet::new([PieceKind::Queen, PieceKind::King, PieceKind::Pawn])
    }

    fn dice(kinds: [PieceKind; 3]) -> DiceSet {
        DiceSet::new(kinds)
    }

    #[test]
    fn rejects_empty_origin_wrong_owner_and_locked_kind() {
        let board = Board::standard_start();
        let pawn_dice = dice([PieceKind::Pawn; 3]);
        // Empty origin.
        assert!(!is_legal_move(&board, sq("e4"), sq("e5"), PieceColor::White, &pawn_dice));
        // Black pawn, white to move.
        assert!(!is_legal_move(&board, sq("e7"), sq("e6"), PieceColor::White, &pawn_dice));
        // Knight move with only pawns unlocked.
        assert!(!is_legal_move(&board, sq("g1"), sq("f3"), PieceColor::White, &pawn_dice));
        // Same move once knights are unlocked.
        let knight_dice = dice([PieceKind::Knight; 3]);
        assert!(is_legal_move(&board, sq("g1"), sq("f3"), PieceColor::White, &knight_dice));
    }

    #[test]
    fn cannot_capture_own_piece() {
        let board = Board::standard_start();
        let rook_dice = dice([PieceKind::Rook; 3]);
        assert!(!is_legal_move(&board, sq("a1"), sq("a2"), PieceColor::White, &rook_dice));
    }

    #[test]
    fn pawn_single_and_double_step() {
        let board = Board::standard_start();
        let pawn_dice = dice([PieceKind::Pawn; 3]);
        assert!(is_legal_move(&board, sq("e2"), sq("e3"), PieceColor::White, &pawn_dice));
        assert!(is_legal_move(&board, sq("e2"), sq("e4"), PieceColor::White, &pawn_dice));
        assert!(!is_legal_move(&board, sq("e2"), sq("e5"), PieceColor::White, &pawn_dice));
        assert!(is_legal_move(&board, sq("e7"), sq("e5"), PieceColor::Black, &pawn_dice));
        // Off the home rank the double step is gone.
        let board = parse_placement("4k3/8/8/8/8/4P3/8/4K3").unwrap();
        assert!(is_legal_move(&board, sq("e3"), sq("e4"), PieceColor::White, &pawn_dice));
        assert!(!is_legal_move(&board, sq("e3"), sq("e5"), PieceColor::White, &pawn_dice));
    }

    #[test]
    fn pawn_double_step_blocked_by_any_piece() {
        let pawn_dice = dice([PieceKind::Pawn; 3]);
        // Enemy piece on the intermediate square.
        let board = parse_placement("4k3/8/8/8/8/4n3/4P3/4K3").unwrap();
        assert!(!is_legal_move(&board, sq("e2"), sq("e4"), PieceColor::White, &pawn_dice));
        // Enemy piece on the destination square blocks too, even though it
        // would be capturable elsewhere.
        let board = parse_placement("4k3/8/8/8/4n3/8/4P3/4K3").unwrap();
        assert!(!is_legal_move(&board, sq("e2"), sq("e4"), PieceColor::White, &pawn_dice));
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let board = parse_placement("4k3/8/8/8/3n4/4P3/8/4K3").unwrap();
        let pawn_dice = dice([PieceKind::Pawn; 3]);
        assert!(is_legal_move(&board, sq("e3"), sq("d4"), PieceColor::White, &pawn_dice));
        // No quiet diagonal.
        assert!(!is_legal_move(&board, sq("e3"), sq("f4"), PieceColor::White, &pawn_dice));
        // No forward capture.
        let board = parse_placement("4k3/8/8/8/4n3/4P3/8/4K3").unwrap();
        assert!(!is_legal_move(&board, sq("e3"), sq("e4"), PieceColor::White, &pawn_dice));
    }

    #[test]
    fn sliders_need_a_clear_path() {
        let board = Board::standard_start();
        let d = dice([PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen]);
        assert!(!is_legal_move(&board, sq("a1"), sq("a5"), PieceColor::White, &d));
        assert!(!is_legal_move(&board, sq("c1"), sq("g5"), PieceColor::White, &d));
        assert!(!is_legal_move(&board, sq("d1"), sq("d4"), PieceColor::White, &d));

        let board = parse_placement("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let rook_dice = dice([PieceKind::Rook; 3]);
        assert!(is_legal_move(&board, sq("a1"), sq("a8"), PieceColor::White, &rook_dice));
        assert!(!is_legal_move(&board, sq("a1"), sq("b2"), PieceColor::White, &rook_dice));
    }

    #[test]
    fn queen_unions_rook_and_bishop() {
        let board = parse_placement("4k3/8/8/8/3Q4/8/8/4K3").unwrap();
        let queen_dice = dice([PieceKind::Queen; 3]);
        assert!(is_legal_move(&board, sq("d4"), sq("d8"), PieceColor::White, &queen_dice));
        assert!(is_legal_move(&board, sq("d4"), sq("h8"), PieceColor::White, &queen_dice));
        assert!(is_legal_move(&board, sq("d4"), sq("a4"), PieceColor::White, &queen_dice));
        assert!(!is_legal_move(&board, sq("d4"), sq("e6"), PieceColor::White, &queen_dice));
    }

    #[test]
    fn king_moves_one_square_any_direction() {
        let board = parse_placement("4k3/8/8/8/3K4/8/8/8").unwrap();
        let king_dice = dice([PieceKind::King; 3]);
        for to in ["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"] {
            assert!(
                is_legal_move(&board, sq("d4"), sq(to), PieceColor::White, &king_dice),
                "expected d4 -> {to} to be legal"
            );
        }
        assert!(!is_legal_move(&board, sq("d4"), sq("d6"), PieceColor::White, &king_dice));
    }

    #[test]
    fn king_safety_veto_blocks_pinned_piece() {
        // White bishop on e2 is pinned to the king by the black rook on e8.
        let board = parse_placement("4r3/8/8/8/8/8/4B3/4K3").unwrap();
        let d = dice([PieceKind::Bishop, PieceKind::King, PieceKind::Pawn]);
        assert!(!is_legal_move(&board, sq("e2"), sq("d3"), PieceColor::White, &d));
        // The king can still step off the file.
        assert!(is_legal_move(&board, sq("e1"), sq("d1"), PieceColor::White, &d));
    }

    #[test]
    fn kings_may_not_become_adjacent() {
        let board = parse_placement("8/8/8/3k4/8/3K4/8/8").unwrap();
        let king_dice = dice([PieceKind::King; 3]);
        assert!(!is_legal_move(&board, sq("d3"), sq("d4"), PieceColor::White, &king_dice));
        assert!(!is_legal_move(&board, sq("d3"), sq("c4"), PieceColor::White, &king_dice));
        assert!(!is_legal_move(&board, sq("d3"), sq("e4"), PieceColor::White, &king_dice));
        assert!(is_legal_move(&board, sq("d3"), sq("d2"), PieceColor::White, &king_dice));
    }

    #[test]
    fn capturing_the_king_is_legal() {
        // No forced-response rule: a rook may take the enemy king outright.
        let board = parse_placement("4k3/8/8/8/8/8/8/4R2K").unwrap();
        let rook_dice = dice([PieceKind::Rook; 3]);
        assert!(is_legal_move(&board, sq("e1"), sq("e8"), PieceColor::White, &rook_dice));
    }

    #[test]
    fn kingless_side_is_never_vetoed() {
        // Degenerate board: white has no king, so nothing to expose.
        let board = parse_placement("4k3/8/8/8/8/8/8/R7").unwrap();
        let rook_dice = dice([PieceKind::Rook; 3]);
        assert!(is_legal_move(&board, sq("a1"), sq("a4"), PieceColor::White, &rook_dice));
    }

    #[test]
    fn legal_moves_from_matches_per_square_checks() {
        let board = Board::standard_start();
        let d = dice([PieceKind::Pawn, PieceKind::Pawn, PieceKind::Rook]);
        let moves = legal_moves_from(&board, sq("e2"), PieceColor::White, &d);
        assert_eq!(moves.as_slice(), &[sq("e4"), sq("e3")]);
    }

    #[test]
    fn has_any_legal_move_detects_forced_skip() {
        // White's only unlocked kind is the rook, and the rook is boxed in.
        let board = parse_placement("4k3/8/8/8/8/8/PP6/RP5K").unwrap();
        let rook_dice = dice([PieceKind::Rook; 3]);
        assert!(!has_any_legal_move(&board, PieceColor::White, &rook_dice));
        let pawn_dice = dice([PieceKind::Pawn; 3]);
        assert!(has_any_legal_move(&board, PieceColor::White, &pawn_dice));
    }

    #[test]
    fn is_legal_move_leaves_the_board_unchanged() {
        let board = Board::standard_start();
        let snapshot = board.clone();
        let d = all_kinds();
        for row in 0..8 {
            for col in 0..8 {
                let _ = is_legal_move(&board, sq("e2"), Square::new(row, col), PieceColor::White, &d);
            }
        }
        assert_eq!(board, snapshot);
    }
}
