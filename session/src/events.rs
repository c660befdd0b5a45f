//! Events broadcast to session subscribers.

use crate::snapshot::GameSnapshot;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The game state changed; here is the new view.
    StateChanged(GameSnapshot),
}
