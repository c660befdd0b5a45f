//! Random-selfplay harness: drives whole games through the session actor.
//!
//! Useful for soak-testing the rules engine and the actor plumbing together.
//! With a fixed `--seed`, game N always plays out identically.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dicechess_engine::{parse_placement, PieceColor, Square, TurnStatus};
use dicechess_session::{SessionError, SessionHandle};

#[derive(Parser)]
#[command(name = "selfplay", about = "Play random dice chess games against itself")]
struct Cli {
    /// Number of games to play.
    #[arg(long, default_value_t = 10)]
    games: u64,

    /// Base dice seed; game N uses seed + N.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Safety cap on turns per game before declaring it unfinished.
    #[arg(long, default_value_t = 2000)]
    max_turns: u32,

    /// Print the final snapshot of every game as a JSON line.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SessionError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut white_wins = 0u64;
    let mut black_wins = 0u64;
    let mut unfinished = 0u64;

    for game_index in 0..cli.games {
        let session = SessionHandle::spawn_seeded(cli.seed + game_index);
        let outcome = play_one(&session, cli.max_turns).await?;

        match outcome.winner {
            Some(PieceColor::White) => white_wins += 1,
            Some(PieceColor::Black) => black_wins += 1,
            None => unfinished += 1,
        }

        if cli.json {
            let snapshot = session.snapshot().await?;
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::warn!(%err, "snapshot serialization failed"),
            }
        } else {
            println!(
                "game {}: {} in {} turns",
                game_index,
                outcome
                    .winner
                    .map_or("unfinished".to_string(), |w| format!("{w} wins")),
                outcome.turns
            );
        }
        session.shutdown().await;
    }

    println!("white {white_wins} / black {black_wins} / unfinished {unfinished}");
    Ok(())
}

struct Outcome {
    winner: Option<PieceColor>,
    turns: u32,
}

async fn play_one(session: &SessionHandle, max_turns: u32) -> Result<Outcome, SessionError> {
    for turn in 0..max_turns {
        let snapshot = session.roll_dice().await?;
        if snapshot.status == TurnStatus::GameOver {
            return Ok(Outcome {
                winner: snapshot.winner,
                turns: turn,
            });
        }

        if !snapshot.can_move {
            session.skip_turn().await?;
            continue;
        }

        let mover = find_mover(session, &snapshot).await?;
        let Some((from, to)) = mover else {
            // can_move promised otherwise; treat as a stuck game.
            tracing::warn!("no mover found despite can_move");
            return Ok(Outcome {
                winner: None,
                turns: turn,
            });
        };

        session.select_square(from).await?;
        let after = session.move_to(to).await?;
        if after.status == TurnStatus::GameOver {
            return Ok(Outcome {
                winner: after.winner,
                turns: turn + 1,
            });
        }
    }

    Ok(Outcome {
        winner: None,
        turns: max_turns,
    })
}

/// First own piece (row-major) with a legal destination, and that
/// destination.
async fn find_mover(
    session: &SessionHandle,
    snapshot: &dicechess_session::GameSnapshot,
) -> Result<Option<(Square, Square)>, SessionError> {
    let board = match parse_placement(&snapshot.placement) {
        Ok(board) => board,
        Err(err) => {
            tracing::error!(%err, "unparseable snapshot placement");
            return Ok(None);
        }
    };
    let Some(unlocked) = snapshot.dice else {
        return Ok(None);
    };

    for (from, piece) in board.pieces() {
        if piece.color != snapshot.turn || !unlocked.contains(&piece.kind) {
            continue;
        }
        let moves = session.legal_moves_from(from).await?;
        if let Some(&to) = moves.first() {
            return Ok(Some((from, to)));
        }
    }
    Ok(None)
}
