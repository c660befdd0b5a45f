//! The session actor loop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, mpsc};
use tracing::Instrument;

use dicechess_engine::{legal_moves_from, Game, TurnStatus};

use crate::commands::SessionCommand;
use crate::events::SessionEvent;
use crate::snapshot::GameSnapshot;

/// Mutable state owned entirely by the actor task. No locks.
pub(crate) struct SessionState {
    pub game: Game,
    pub rng: StdRng,
    /// Snapshot of the last broadcast state, so no-op commands stay silent.
    last_broadcast: Option<GameSnapshot>,
}

impl SessionState {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let game = Game::new();
        let last_broadcast = Some(GameSnapshot::from_game(&game));
        Self {
            game,
            rng,
            last_broadcast,
        }
    }
}

pub(crate) async fn run_session_actor(
    state: SessionState,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    run_session_actor_inner(state, cmd_rx, event_tx)
        .instrument(tracing::info_span!("dicechess_session"))
        .await;
}

async fn run_session_actor_inner(
    mut state: SessionState,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    tracing::info!("session actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SessionCommand::Shutdown => break,
            cmd => handle_command(&mut state, cmd, &event_tx),
        }
    }

    tracing::info!("session actor exited");
}

fn handle_command(
    state: &mut SessionState,
    cmd: SessionCommand,
    event_tx: &broadcast::Sender<SessionEvent>,
) {
    match cmd {
        SessionCommand::RollDice { reply } => {
            state.game.roll_dice(&mut state.rng);
            if let Some(dice) = state.game.dice() {
                tracing::debug!(turn = %state.game.turn(), dice = %dice, "rolled");
            }
            let _ = reply.send(broadcast_if_changed(state, event_tx));
        }
        SessionCommand::SelectSquare { square, reply } => {
            state.game.select_square(square);
            let _ = reply.send(broadcast_if_changed(state, event_tx));
        }
        SessionCommand::MoveTo { square, reply } => {
            state.game.move_to(square);
            if state.game.status() == TurnStatus::GameOver {
                tracing::info!(winner = ?state.game.winner(), "game over");
            }
            let _ = reply.send(broadcast_if_changed(state, event_tx));
        }
        SessionCommand::SkipTurn { reply } => {
            state.game.skip_turn();
            let _ = reply.send(broadcast_if_changed(state, event_tx));
        }
        SessionCommand::Reset { reply } => {
            state.game.reset();
            tracing::info!("game reset");
            let _ = reply.send(broadcast_if_changed(state, event_tx));
        }
        SessionCommand::GetSnapshot { reply } => {
            let _ = reply.send(GameSnapshot::from_game(&state.game));
        }
        SessionCommand::LegalMovesFrom { from, reply } => {
            let moves = match (state.game.status(), state.game.dice()) {
                (TurnStatus::Moving, Some(dice)) => {
                    legal_moves_from(state.game.board(), from, state.game.turn(), dice).to_vec()
                }
                _ => Vec::new(),
            };
            let _ = reply.send(moves);
        }
        SessionCommand::Subscribe { reply } => {
            let snapshot = GameSnapshot::from_game(&state.game);
            let rx = event_tx.subscribe();
            let _ = reply.send((snapshot, rx));
        }
        SessionCommand::Shutdown => unreachable!("handled by the actor loop"),
    }
}

/// Snapshot the game and notify subscribers. Mutating commands go through
/// here; the reply always carries the snapshot, changed or not, but only
/// actual changes are broadcast.
fn broadcast_if_changed(
    state: &mut SessionState,
    event_tx: &broadcast::Sender<SessionEvent>,
) -> GameSnapshot {
    let snapshot = GameSnapshot::from_game(&state.game);
    let changed = state
        .last_broadcast
        .as_ref()
        .is_none_or(|last| *last != snapshot);
    if changed {
        state.last_broadcast = Some(snapshot.clone());
        let _ = event_tx.send(SessionEvent::StateChanged(snapshot.clone()));
    }
    snapshot
}
