use serde::{Deserialize, Serialize};

use crate::components::Side;

/// Play mode, fixed for the lifetime of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
    ThreePlayer,
    Tournament,
}

impl GameMode {
    /// Initial seating: (player, slot, active)
    pub fn lineup(self) -> &'static [(u8, Side, bool)] {
        match self {
            GameMode::SinglePlayer | GameMode::TwoPlayer => {
                &[(1, Side::Left, true), (2, Side::Right, true)]
            }
            GameMode::ThreePlayer => &[
                (1, Side::Left, true),
                (2, Side::Right, true),
                (3, Side::Bottom, true),
            ],
            // Round 1 is player 1 against player 3
            GameMode::Tournament => &[
                (1, Side::Left, true),
                (2, Side::Left, false),
                (3, Side::Right, true),
                (4, Side::Right, false),
            ],
        }
    }

    /// Whether the bottom wall is a goal line
    pub fn is_triangle(self) -> bool {
        self == GameMode::ThreePlayer
    }
}
