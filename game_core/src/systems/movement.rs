use crate::{Ball, Config, Paddle, PaddleIntent, Params};
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, config: &Config) {
    let court = config.court_size();
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        if paddle.active && *intent != PaddleIntent::Idle {
            let delta = intent.sign() * paddle.speed;
            paddle.shift(delta, court);
        }
    }
}

/// Move ball one frame along its discrete directions; the vertical step is
/// flattened by `BALL_VERTICAL_DIVISOR`.
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos.y += ball.dir_y.sign() * ball.speed / Params::BALL_VERTICAL_DIVISOR;
        ball.pos.x += ball.dir_x.sign() * ball.speed;
    }
}
