//! Commands sent to the session actor. Each embeds a oneshot for the reply.

use tokio::sync::{broadcast, oneshot};

use dicechess_engine::Square;

use crate::events::SessionEvent;
use crate::snapshot::GameSnapshot;

/// Session-level failures. Game-rule misuse is not an error: the engine
/// no-ops and the reply carries the unchanged snapshot. These cover the
/// plumbing only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("session actor closed")]
    ActorClosed,
    #[error("reply dropped")]
    ReplyDropped,
}

pub(crate) enum SessionCommand {
    RollDice {
        reply: oneshot::Sender<GameSnapshot>,
    },
    SelectSquare {
        square: Square,
        reply: oneshot::Sender<GameSnapshot>,
    },
    MoveTo {
        square: Square,
        reply: oneshot::Sender<GameSnapshot>,
    },
    SkipTurn {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<GameSnapshot>,
    },
    GetSnapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    LegalMovesFrom {
        from: Square,
        reply: oneshot::Sender<Vec<Square>>,
    },
    Subscribe {
        reply: oneshot::Sender<(GameSnapshot, broadcast::Receiver<SessionEvent>)>,
    },
    Shutdown,
}
