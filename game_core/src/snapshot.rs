//! Read-only view of the engine handed to the renderer after every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{Ball, Paddle, Side};
use crate::config::Config;
use crate::fsm::MatchState;
use crate::mode::GameMode;
use crate::tournament::{Bracket, Round};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub player: u8,
    pub side: Side,
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u32,
    pub active: bool,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            player: paddle.player,
            side: paddle.side,
            pos: paddle.pos,
            size: paddle.size,
            score: paddle.score,
            active: paddle.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hue: f32, // degrees, 0 = red, 120 = green
}

impl BallView {
    pub fn new(ball: &Ball, config: &Config) -> Self {
        Self {
            pos: ball.pos,
            size: ball.size,
            speed: ball.speed,
            hue: ball.hue(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub round: Round,
    pub round_text: String,
    pub names: Vec<String>,
    pub winners: [Option<u8>; 3],
    pub result: Option<String>,
    pub countdown: Option<u32>, // whole seconds left in ROUND_END
}

impl BracketView {
    pub fn new(bracket: &Bracket, countdown: Option<u32>) -> Self {
        Self {
            round: bracket.round(),
            round_text: bracket.round_text(),
            names: bracket.roster().names().to_vec(),
            winners: *bracket.winners(),
            result: bracket.result_text(),
            countdown,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: MatchState,
    pub mode: Option<GameMode>, // None while in the menu
    pub paddles: Vec<PaddleView>,
    pub ball: Option<BallView>,
    pub server: Option<u8>,
    pub bracket: Option<BracketView>,
    pub message: Option<String>,
    pub winners: Vec<u8>,
    pub palette: u8,
    pub time: f64,
}

impl Snapshot {
    /// The idle menu frame
    pub fn menu(palette: u8, time: f64) -> Self {
        Self {
            state: MatchState::Menu,
            mode: None,
            paddles: Vec::new(),
            ball: None,
            server: None,
            bracket: None,
            message: None,
            winners: Vec::new(),
            palette,
            time,
        }
    }

    pub fn paddle(&self, player: u8) -> Option<&PaddleView> {
        self.paddles.iter().find(|p| p.player == player)
    }

    pub fn score(&self, player: u8) -> u32 {
        self.paddle(player).map_or(0, |p| p.score)
    }

    pub fn total_score(&self) -> u32 {
        self.paddles.iter().map(|p| p.score).sum()
    }
}
