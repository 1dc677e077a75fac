use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::error::ConfigError;
use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub court_width: f32,
    pub court_height: f32,
    pub paddle_thickness: f32,
    pub paddle_length: f32,
    pub paddle_speed: f32,
    pub paddle_inset: f32,
    pub ball_size: f32,
    pub ball_speed_base: f32,
    pub ball_speed_increment: f32,
    pub ball_speed_max: f32,
    pub win_score: u32,
    pub serve_delay: f32,
    pub round_end_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            court_width: Params::COURT_WIDTH,
            court_height: Params::COURT_HEIGHT,
            paddle_thickness: Params::PADDLE_THICKNESS,
            paddle_length: Params::PADDLE_LENGTH,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_inset: Params::PADDLE_INSET,
            ball_size: Params::BALL_SIZE,
            ball_speed_base: Params::BALL_SPEED_BASE,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            ball_speed_max: Params::BALL_SPEED_MAX,
            win_score: Params::WIN_SCORE,
            serve_delay: Params::SERVE_DELAY,
            round_end_delay: Params::ROUND_END_DELAY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields fall back to [`Params`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("paddle_thickness", self.paddle_thickness),
            ("paddle_length", self.paddle_length),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed_base", self.ball_speed_base),
            ("ball_speed_max", self.ball_speed_max),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("paddle_inset", self.paddle_inset),
            ("ball_speed_increment", self.ball_speed_increment),
            ("serve_delay", self.serve_delay),
            ("round_end_delay", self.round_end_delay),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.ball_speed_base > self.ball_speed_max {
            return Err(ConfigError::SpeedRange {
                base: self.ball_speed_base,
                max: self.ball_speed_max,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if self.paddle_length >= self.court_height || self.paddle_length >= self.court_width {
            return Err(ConfigError::PaddleTooLong {
                length: self.paddle_length,
            });
        }
        // The right and bottom paddles hang `inset` in from the far wall, so
        // the inset must cover a paddle's thickness; the side paddles must
        // not cross each other.
        let inset = self.paddle_inset;
        if inset < self.paddle_thickness
            || 2.0 * inset + self.paddle_thickness > self.court_width
            || inset > self.court_height
        {
            return Err(ConfigError::InsetOutOfCourt { inset });
        }
        Ok(())
    }

    pub fn court_size(&self) -> Vec2 {
        Vec2::new(self.court_width, self.court_height)
    }

    /// Paddle extent for a slot: vertical paddles are thin and tall, the
    /// bottom paddle is wide and flat.
    pub fn paddle_size(&self, side: Side) -> Vec2 {
        match side {
            Side::Left | Side::Right => Vec2::new(self.paddle_thickness, self.paddle_length),
            Side::Bottom => Vec2::new(self.paddle_length, self.paddle_thickness),
        }
    }

    /// Starting top-left corner of the paddle in a slot
    pub fn paddle_spawn(&self, side: Side) -> Vec2 {
        let half = self.paddle_length / 2.0;
        match side {
            Side::Left => Vec2::new(self.paddle_inset, self.court_height / 2.0 - half),
            Side::Right => Vec2::new(
                self.court_width - self.paddle_inset,
                self.court_height / 2.0 - half,
            ),
            Side::Bottom => Vec2::new(
                self.court_width / 2.0 - half,
                self.court_height - self.paddle_inset,
            ),
        }
    }

    /// Ball resting spot: the centre of the court
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            self.court_width / 2.0 - self.ball_size / 2.0,
            self.court_height / 2.0 - self.ball_size / 2.0,
        )
    }
}
