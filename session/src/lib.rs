//! Single-writer actor wrapper around a dice chess [`Game`].
//!
//! The engine itself has no internal synchronization; a game shared by
//! several consumers (UI task, logger, spectator feed) must serialize every
//! request. This crate runs one `Game` inside a tokio task that processes
//! commands sequentially from an mpsc queue and broadcasts a snapshot
//! whenever the state changes. Handles are cheap clones.
//!
//! [`Game`]: dicechess_engine::Game

mod actor;
mod commands;
mod events;
mod handle;
mod snapshot;

pub use commands::SessionError;
pub use events::SessionEvent;
pub use handle::SessionHandle;
pub use snapshot::GameSnapshot;
