//! Dice rolling: three draws from the active player's surviving piece kinds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{PieceColor, PieceKind};

/// One roll: three kinds, independently sampled, duplicates expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet([PieceKind; 3]);

impl DiceSet {
    pub fn new(faces: [PieceKind; 3]) -> Self {
        Self(faces)
    }

    pub fn faces(&self) -> [PieceKind; 3] {
        self.0
    }

    /// Whether `kind` is unlocked by this roll.
    pub fn contains(&self, kind: PieceKind) -> bool {
        self.0.contains(&kind)
    }
}

impl std::fmt::Display for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {} {}]", self.0[0], self.0[1], self.0[2])
    }
}

/// Roll three dice for `turn`.
///
/// The pool is the set of distinct kinds the player still owns, collected in
/// [`PieceKind::ALL`] order so a given RNG sequence always produces the same
/// roll. A player with no pieces at all cannot arise in normal play (losing
/// the king ends the game first), but the full six-kind pool covers it.
pub fn roll<R: Rng + ?Sized>(board: &Board, turn: PieceColor, rng: &mut R) -> DiceSet {
    let mut pool: Vec<PieceKind> = Vec::with_capacity(6);
    for kind in PieceKind::ALL {
        let owned = board
            .pieces()
            .any(|(_, p)| p.color == turn && p.kind == kind);
        if owned {
            pool.push(kind);
        }
    }
    if pool.is_empty() {
        pool.extend(PieceKind::ALL);
    }

    let mut draw = || pool[rng.random_range(0..pool.len())];
    DiceSet([draw(), draw(), draw()])
}
