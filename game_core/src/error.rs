//! Errors for the few fallible operations at the engine boundary.
//!
//! The per-frame path never fails; these cover configuration loading and
//! bracket bookkeeping misuse.

use crate::tournament::Round;

/// Rejected engine configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("base ball speed {base} exceeds max speed {max}")]
    SpeedRange { base: f32, max: f32 },

    #[error("winning score must be at least 1")]
    ZeroWinScore,

    #[error("paddle length {length} does not fit the court")]
    PaddleTooLong { length: f32 },

    #[error("paddle inset {inset} places a paddle outside the court")]
    InsetOutOfCourt { inset: f32 },
}

/// Rejected tournament bracket operation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BracketError {
    #[error("{round:?} already has a recorded winner")]
    AlreadyDecided { round: Round },

    #[error("player {player} is not contesting {round:?}")]
    NotContestant { player: u8, round: Round },

    #[error("{round:?} has no winner yet")]
    Undecided { round: Round },

    #[error("the tournament is complete")]
    Complete,
}
