//! Wire protocol between the engine and a presentation adapter
//!
//! Uses postcard for compact binary serialization

use game_core::{Intent, MenuSelection, Snapshot, TickInput};
use postcard::{from_bytes, to_allocvec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("failed to encode message: {0}")]
    Encode(#[source] postcard::Error),
    #[error("failed to decode message: {0}")]
    Decode(#[source] postcard::Error),
}

// ============================================================================
// Commands (adapter to engine)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    /// Held paddle intent: 0 = idle, 1 = up, 2 = down, 3 = left, 4 = right.
    /// Other codes are treated as idle.
    Intent { player: u8, code: u8 },

    /// Menu selection, with the roster for a tournament
    Select(MenuSelection),

    /// Escape / acknowledge: back to the menu
    Dismiss,
}

impl Command {
    pub fn intent(player: u8, intent: Intent) -> Self {
        Command::Intent {
            player,
            code: intent.code(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        to_allocvec(self).map_err(ProtoError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        from_bytes(bytes).map_err(ProtoError::Decode)
    }
}

/// Fold one frame's worth of commands into engine input.
///
/// Intents accumulate; when several menu commands arrive the last one wins.
pub fn tick_input<I>(commands: I) -> TickInput
where
    I: IntoIterator<Item = Command>,
{
    commands
        .into_iter()
        .fold(TickInput::new(), |input, command| match command {
            Command::Intent { player, code } => input.intent(player, Intent::from_code(code)),
            Command::Select(selection) => input.command(game_core::Command::Select(selection)),
            Command::Dismiss => input.command(game_core::Command::Dismiss),
        })
}

// ============================================================================
// Frames (engine to adapter)
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub seq: u32,
    pub snapshot: Snapshot,
}

impl Frame {
    pub fn new(seq: u32, snapshot: Snapshot) -> Self {
        Self { seq, snapshot }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        to_allocvec(self).map_err(ProtoError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        from_bytes(bytes).map_err(ProtoError::Decode)
    }
}
