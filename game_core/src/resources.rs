use crate::components::Intent;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f64, // Total elapsed seconds
}

impl Time {
    pub fn new(dt: f32, now: f64) -> Self {
        Self { dt, now }
    }

    /// Advance the clock; negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32, max_dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 };
        self.dt = dt;
        self.now += f64::from(dt);
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub scored: Vec<u8>, // player numbers awarded a point
    pub ball_hit_paddle: Option<u8>,
    pub ball_hit_wall: bool,
    pub served: Option<u8>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.scored.clear();
        self.ball_hit_paddle = None;
        self.ball_hit_wall = false;
        self.served = None;
    }
}

/// Serve turn: who serves next and when the pending serve was scheduled
#[derive(Debug, Clone, Copy, Default)]
pub struct ServeState {
    pub server: Option<u8>,      // None while a rally is live
    pub last_server: Option<u8>, // For strict alternation
    pub scheduled_at: f64,
}

impl ServeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, server: u8, now: f64) {
        self.server = Some(server);
        self.scheduled_at = now;
    }

    /// The pending server, once `delay` has elapsed since scheduling
    pub fn due(&self, now: f64, delay: f32) -> Option<u8> {
        self.server.filter(|_| now - self.scheduled_at >= f64::from(delay))
    }

    /// Mark the pending serve as executed
    pub fn complete(&mut self) {
        if let Some(server) = self.server.take() {
            self.last_server = Some(server);
        }
    }
}

/// Input queue: paddle intents gathered for the next step
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(u8, Intent)>, // (player, intent)
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push_input(&mut self, player: u8, intent: Intent) {
        self.inputs.push((player, intent));
    }
}
