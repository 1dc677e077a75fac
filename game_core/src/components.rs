use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::geometry::{clamp, Rect};

/// Vertical travel of the ball or a vertical paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalDir {
    #[default]
    Idle,
    Up,
    Down,
}

impl VerticalDir {
    /// -1 = up, 0 = idle, 1 = down (screen coordinates grow downward)
    pub fn sign(self) -> f32 {
        match self {
            VerticalDir::Idle => 0.0,
            VerticalDir::Up => -1.0,
            VerticalDir::Down => 1.0,
        }
    }
}

/// Horizontal travel of the ball or the bottom paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalDir {
    #[default]
    Idle,
    Left,
    Right,
}

impl HorizontalDir {
    pub fn sign(self) -> f32 {
        match self {
            HorizontalDir::Idle => 0.0,
            HorizontalDir::Left => -1.0,
            HorizontalDir::Right => 1.0,
        }
    }
}

/// Raw movement request from the input layer. It is resolved against the
/// paddle's axis of freedom; a request along the wrong axis means idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[default]
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl Intent {
    /// Decode a wire code (0 = idle, 1 = up, 2 = down, 3 = left, 4 = right).
    /// Unknown codes are idle.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Intent::Up,
            2 => Intent::Down,
            3 => Intent::Left,
            4 => Intent::Right,
            _ => Intent::Idle,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Intent::Idle => 0,
            Intent::Up => 1,
            Intent::Down => 2,
            Intent::Left => 3,
            Intent::Right => 4,
        }
    }
}

/// Court slot a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Bottom,
}

impl Side {
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// Unit normal of the paddle's hitting face, pointing into the court
    pub fn face(self) -> Vec2 {
        match self {
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
            Side::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub size: Vec2,
    pub dir_x: HorizontalDir,
    pub dir_y: VerticalDir,
    pub speed: f32,
}

impl Ball {
    /// A resting ball at the centre of the court, at base speed
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.ball_spawn(),
            size: Vec2::splat(config.ball_size),
            dir_x: HorizontalDir::Idle,
            dir_y: VerticalDir::Idle,
            speed: config.ball_speed_base,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Per-axis sign of travel
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.dir_x.sign(), self.dir_y.sign())
    }

    pub fn is_resting(&self) -> bool {
        self.dir_x == HorizontalDir::Idle && self.dir_y == VerticalDir::Idle
    }

    /// Escalate after a paddle hit, never past the cap
    pub fn speed_up(&mut self, config: &Config) {
        self.speed = (self.speed + config.ball_speed_increment).min(config.ball_speed_max);
    }

    /// Display hue in degrees, proportional to speed; 120 at the cap
    pub fn hue(&self, config: &Config) -> f32 {
        self.speed / config.ball_speed_max * 120.0
    }
}

/// Paddle component - one player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub player: u8, // 1..=4
    pub side: Side,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub score: u32,
    pub active: bool,
}

impl Paddle {
    pub fn new(player: u8, side: Side, config: &Config) -> Self {
        Self {
            player,
            side,
            pos: config.paddle_spawn(side),
            size: config.paddle_size(side),
            speed: config.paddle_speed,
            score: 0,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Move to a (possibly different) slot's starting position
    pub fn seat(&mut self, side: Side, config: &Config) {
        self.side = side;
        self.pos = config.paddle_spawn(side);
        self.size = config.paddle_size(side);
    }

    /// Shift along the axis of freedom, then clamp to
    /// `[0, court - size]` on that axis only
    pub fn shift(&mut self, delta: f32, court: Vec2) {
        if self.side.is_vertical() {
            self.pos.y = clamp(self.pos.y + delta, 0.0, court.y - self.size.y);
        } else {
            self.pos.x = clamp(self.pos.x + delta, 0.0, court.x - self.size.x);
        }
    }
}

/// Movement intent for a paddle, already resolved to its axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddleIntent {
    #[default]
    Idle,
    Vertical(VerticalDir),
    Horizontal(HorizontalDir),
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a raw intent for a paddle in `side`; off-axis requests idle.
    pub fn resolve(intent: Intent, side: Side) -> Self {
        match (side.is_vertical(), intent) {
            (true, Intent::Up) => PaddleIntent::Vertical(VerticalDir::Up),
            (true, Intent::Down) => PaddleIntent::Vertical(VerticalDir::Down),
            (false, Intent::Left) => PaddleIntent::Horizontal(HorizontalDir::Left),
            (false, Intent::Right) => PaddleIntent::Horizontal(HorizontalDir::Right),
            _ => PaddleIntent::Idle,
        }
    }

    /// -1, 0 or 1 along the paddle's axis
    pub fn sign(self) -> f32 {
        match self {
            PaddleIntent::Idle => 0.0,
            PaddleIntent::Vertical(dir) => dir.sign(),
            PaddleIntent::Horizontal(dir) => dir.sign(),
        }
    }
}

/// Marker for the computer-driven paddle in single player
#[derive(Debug, Clone, Copy, Default)]
pub struct AiControlled;
