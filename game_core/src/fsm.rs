//! Match State Machine
//!
//! Manages MENU / PLAYING / ROUND_END / GAME_OVER transitions.

use serde::{Deserialize, Serialize};

/// Match states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    Menu,
    Playing,
    RoundEnd,
    GameOver,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Select,
    RoundWon,
    CountdownDone,
    MatchWon,
    Dismiss,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: MatchState,
    pub to_state: MatchState,
    pub action: MatchAction,
}

/// Match Finite State Machine
#[derive(Debug, Clone)]
pub struct MatchFsm {
    state: MatchState,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self {
            state: MatchState::Menu,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn get_next_state(&self, action: MatchAction) -> Option<MatchState> {
        match (self.state, action) {
            (MatchState::Menu, MatchAction::Select) => Some(MatchState::Playing),

            (MatchState::Playing, MatchAction::RoundWon) => Some(MatchState::RoundEnd),
            (MatchState::Playing, MatchAction::MatchWon) => Some(MatchState::GameOver),
            // Escape during play abandons the match
            (MatchState::Playing, MatchAction::Dismiss) => Some(MatchState::Menu),

            (MatchState::RoundEnd, MatchAction::CountdownDone) => Some(MatchState::Playing),
            (MatchState::RoundEnd, MatchAction::Dismiss) => Some(MatchState::Menu),

            (MatchState::GameOver, MatchAction::Dismiss) => Some(MatchState::Menu),

            _ => None,
        }
    }

    /// Check if physics and scoring run
    pub fn is_playing(&self) -> bool {
        self.state == MatchState::Playing
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}
