//! Piece-placement strings (the first field of a FEN record).
//!
//! Dice chess carries none of the rest of FEN (castling and en passant do
//! not exist in this variant, and the side to move lives in [`crate::Game`]),
//! so only the placement field is parsed and formatted. Ranks run 8 to 1,
//! `/`-separated, digits encode empty runs, uppercase is white.

use crate::board::{Board, Square};
use crate::types::{Piece, PieceColor, PieceKind};

#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("rank {0} does not describe 8 files")]
    WrongFileCount(usize),
    #[error("invalid character {0:?} in placement")]
    InvalidChar(char),
}

/// Parse a placement string like
/// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR` into a board.
pub fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
            } else {
                let kind = PieceKind::from_char(c).ok_or(FenError::InvalidChar(c))?;
                let color = if c.is_ascii_uppercase() {
                    PieceColor::White
                } else {
                    PieceColor::Black
                };
                if col >= 8 {
                    return Err(FenError::WrongFileCount(8 - row));
                }
                board.set_piece(Square::new(row, col), Some(Piece::new(kind, color)));
                col += 1;
            }
        }
        if col != 8 {
            return Err(FenError::WrongFileCount(8 - row));
        }
    }
    Ok(board)
}

/// Format a board as a placement string.
pub fn format_placement(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..8 {
        if row > 0 {
            out.push('/');
        }
        let mut empty_run = 0u8;
        for col in 0..8 {
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    out.push(match piece.color {
                        PieceColor::White => piece.kind.to_char_upper(),
                        PieceColor::Black => piece.kind.to_char_lower(),
                    });
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push((b'0' + empty_run) as char);
        }
    }
    out
}
