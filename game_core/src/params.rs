/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Court
    pub const COURT_WIDTH: f32 = 1400.0;
    pub const COURT_HEIGHT: f32 = 1000.0;

    // Paddle
    pub const PADDLE_THICKNESS: f32 = 18.0;
    pub const PADDLE_LENGTH: f32 = 180.0;
    pub const PADDLE_SPEED: f32 = 8.0; // units per frame
    pub const PADDLE_INSET: f32 = 150.0; // distance from the paddle's own wall

    // Ball
    pub const BALL_SIZE: f32 = 18.0;
    pub const BALL_SPEED_BASE: f32 = 7.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.2; // added on every paddle hit
    pub const BALL_SPEED_MAX: f32 = 15.0;
    pub const BALL_VERTICAL_DIVISOR: f32 = 1.5; // flatter trajectory

    // AI
    pub const AI_APPROACH_DIVISOR: f32 = 1.5;
    pub const AI_RECEDE_DIVISOR: f32 = 4.0;

    // Score
    pub const WIN_SCORE: u32 = 2; // First to 2 wins

    // Timing (seconds)
    pub const SERVE_DELAY: f32 = 1.0;
    pub const ROUND_END_DELAY: f32 = 3.0;
    pub const MAX_DT: f32 = 0.25; // Clamp to prevent large clock jumps

    // Serve placement margins
    pub const SERVE_MARGIN: f32 = 100.0;
    pub const SERVE_MARGIN_TRIANGLE: f32 = 150.0;

    // Tournament
    pub const MAX_NAME_LEN: usize = 8;

    // Background palette entries
    pub const PALETTE_SIZE: u8 = 5;
}
