use hecs::World;

use crate::components::*;
use crate::config::Config;
use crate::params::Params;

/// One frame of AI travel for a vertical paddle chasing `ball.y - height/2`.
///
/// The paddle moves at speed / 1.5 while the ball heads toward its face and
/// at speed / 4 while the ball recedes. An upward step that overshoots the
/// target is taken back within the same frame.
pub fn ai_offset(paddle: &Paddle, ball: &Ball) -> f32 {
    let target = ball.pos.y - paddle.size.y / 2.0;
    let approaching = ball.heading().dot(paddle.side.face()) < 0.0;
    let step = if approaching {
        paddle.speed / Params::AI_APPROACH_DIVISOR
    } else {
        paddle.speed / Params::AI_RECEDE_DIVISOR
    };

    let mut y = paddle.pos.y;
    if y > target {
        y -= step;
    }
    if y < target {
        y += step;
    }
    y - paddle.pos.y
}

/// Move every AI-controlled paddle toward the ball
pub fn drive_ai(world: &mut World, config: &Config) {
    let ball = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => *ball,
        None => return,
    };
    let court = config.court_size();

    for (_entity, (paddle, _ai)) in world.query_mut::<(&mut Paddle, &AiControlled)>() {
        if paddle.active && paddle.side.is_vertical() {
            let delta = ai_offset(paddle, &ball);
            paddle.shift(delta, court);
        }
    }
}
