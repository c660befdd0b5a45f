//! Cheap, cloneable handle to a running session actor.

use tokio::sync::{broadcast, mpsc, oneshot};

use dicechess_engine::Square;

use crate::actor::{run_session_actor, SessionState};
use crate::commands::{SessionCommand, SessionError};
use crate::events::SessionEvent;
use crate::snapshot::GameSnapshot;

const COMMAND_QUEUE_DEPTH: usize = 32;
const EVENT_QUEUE_DEPTH: usize = 64;

#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Spawn a fresh game with OS-seeded dice.
    pub fn spawn() -> Self {
        Self::spawn_inner(None)
    }

    /// Spawn with a fixed dice seed, for deterministic replay.
    pub fn spawn_seeded(seed: u64) -> Self {
        Self::spawn_inner(Some(seed))
    }

    fn spawn_inner(seed: Option<u64>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (event_tx, _) = broadcast::channel(EVENT_QUEUE_DEPTH);
        tokio::spawn(run_session_actor(SessionState::new(seed), cmd_rx, event_tx));
        Self { cmd_tx }
    }

    pub async fn roll_dice(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::RollDice { reply }).await
    }

    pub async fn select_square(&self, square: Square) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::SelectSquare { square, reply })
            .await
    }

    pub async fn move_to(&self, square: Square) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::MoveTo { square, reply })
            .await
    }

    pub async fn skip_turn(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::SkipTurn { reply }).await
    }

    pub async fn reset(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::Reset { reply }).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::GetSnapshot { reply })
            .await
    }

    /// Legal destinations of the piece on `from` under the current dice;
    /// empty outside the moving phase.
    pub async fn legal_moves_from(&self, from: Square) -> Result<Vec<Square>, SessionError> {
        self.request(|reply| SessionCommand::LegalMovesFrom { from, reply })
            .await
    }

    /// Current snapshot plus a live event stream.
    pub async fn subscribe(
        &self,
    ) -> Result<(GameSnapshot, broadcast::Receiver<SessionEvent>), SessionError> {
        self.request(|reply| SessionCommand::Subscribe { reply })
            .await
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Shutdown).await;
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(build(tx))
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        rx.await.map_err(|_| SessionError::ReplyDropped)
    }
}
