//! The 8x8 board: squares, piece placement, and the standard start.
//!
//! The board is a plain mailbox array with no legality knowledge of its own.
//! Rule checks live in [`crate::rules`]; this module only stores and moves
//! pieces. Row 0 is black's back rank (rank 8 in algebraic terms), row 7 is
//! white's.

use serde::{Deserialize, Serialize};

use crate::types::{Piece, PieceColor, PieceKind};

/// A board coordinate. Both components are always in `[0, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    /// Build a square, panicking on out-of-range coordinates. An off-board
    /// coordinate here is a caller bug, not a game-rule outcome.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
        Self { row, col }
    }

    /// Build a square, returning `None` for off-board coordinates.
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Offset by a signed delta, `None` if the result leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Parse an algebraic coordinate like "e2".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = (file as i8) - ('a' as i8);
        let rank = rank.to_digit(10)? as i8;
        if !(1..=8).contains(&rank) {
            return None;
        }
        Self::try_new(8 - rank, col)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.col as u8) as char;
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")
    }
}

/// 8x8 mailbox board. At most one piece per square by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// An empty board. Test positions are usually built from this or from
    /// [`crate::fen::parse_placement`].
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard chess starting arrangement: black on rows 0-1, white on
    /// rows 6-7.
    pub fn standard_start() -> Self {
        use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for (col, &kind) in back_rank.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(kind, PieceColor::Black));
            board.squares[7][col] = Some(Piece::new(kind, PieceColor::White));
        }
        for col in 0..8 {
            board.squares[1][col] = Some(Piece::new(Pawn, PieceColor::Black));
            board.squares[6][col] = Some(Piece::new(Pawn, PieceColor::White));
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row][square.col]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row][square.col] = piece;
    }

    /// Relocate the piece at `from` to `to`, overwriting whatever stood
    /// there. No legality checking; callers validate first. `from` must be
    /// occupied.
    pub fn apply_move(&mut self, from: Square, to: Square) {
        let piece = self.squares[from.row][from.col];
        assert!(piece.is_some(), "apply_move from empty square {from}");
        self.squares[to.row][to.col] = piece;
        self.squares[from.row][from.col] = None;
    }

    /// All occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8).flat_map(move |row| {
            (0..8).filter_map(move |col| {
                self.squares[row][col].map(|p| (Square { row, col }, p))
            })
        })
    }

    /// The square of `color`'s king, if that king is still on the board.
    pub fn king_square(&self, color: PieceColor) -> Option<Square> {
        self.pieces()
            .find(|&(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Scan both kings; if one side's king is absent the game is over and
    /// the *other* side is the winner.
    pub fn missing_king_winner(&self) -> Option<PieceColor> {
        let mut white_king = false;
        let mut black_king = false;
        for (_, piece) in self.pieces() {
            if piece.kind == PieceKind::King {
                match piece.color {
                    PieceColor::White => white_king = true,
                    PieceColor::Black => black_king = true,
                }
            }
        }
        if !white_king {
            Some(PieceColor::Black)
        } else if !black_king {
            Some(PieceColor::White)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard_start()
    }
}
