use hecs::World;
use rand::Rng;

use crate::components::*;
use crate::config::Config;
use crate::mode::GameMode;
use crate::params::Params;
use crate::resources::*;

/// Replace the ball with a fresh resting one at base speed.
///
/// The old ball entity is despawned rather than edited, so nothing from the
/// finished rally (speed, direction) can leak into the next one.
pub fn reset_ball(world: &mut World, config: &Config) -> hecs::Entity {
    let stale: Vec<hecs::Entity> = world.query::<&Ball>().iter().map(|(e, _)| e).collect();
    for entity in stale {
        let _ = world.despawn(entity);
    }
    world.spawn((Ball::new(config),))
}

/// Pick who serves next.
///
/// Three-player mode draws uniformly among the active paddles. Every other
/// mode alternates strictly between the two active paddles; with no
/// previous server on record the first server is drawn at random.
pub fn next_server(
    world: &World,
    mode: GameMode,
    serve: &ServeState,
    rng: &mut GameRng,
) -> Option<u8> {
    let mut active: Vec<u8> = world
        .query::<&Paddle>()
        .iter()
        .filter(|(_e, p)| p.active)
        .map(|(_e, p)| p.player)
        .collect();
    active.sort_unstable();

    if active.is_empty() {
        return None;
    }
    if !mode.is_triangle() {
        if let Some(last) = serve.last_server.filter(|p| active.contains(p)) {
            return active.iter().copied().find(|&p| p != last).or(Some(last));
        }
    }
    Some(active[rng.0.gen_range(0..active.len())])
}

/// Launch the resting ball for `server`.
///
/// Three-player serves drop the ball anywhere inside a 150-unit margin;
/// other modes serve from the centre line at a random height. The ball heads
/// toward the server's wall (a bottom server sends it away from the half it
/// sits in) with a random vertical direction.
pub fn serve_ball(world: &mut World, config: &Config, mode: GameMode, server: u8, rng: &mut GameRng) {
    let side = world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, p)| p.player == server)
        .map(|(_e, p)| p.side);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if mode.is_triangle() {
            let m = Params::SERVE_MARGIN_TRIANGLE;
            ball.pos.x = serve_coord(rng, m, config.court_width);
            ball.pos.y = serve_coord(rng, m, config.court_height);
        } else {
            ball.pos.x = config.court_width / 2.0;
            ball.pos.y = serve_coord(rng, Params::SERVE_MARGIN, config.court_height);
        }

        ball.dir_x = match side {
            Some(Side::Left) => HorizontalDir::Left,
            Some(Side::Right) => HorizontalDir::Right,
            Some(Side::Bottom) if ball.pos.x < config.court_width / 2.0 => HorizontalDir::Right,
            Some(Side::Bottom) => HorizontalDir::Left,
            None if rng.0.gen_bool(0.5) => HorizontalDir::Left,
            None => HorizontalDir::Right,
        };
        ball.dir_y = if rng.0.gen_bool(0.5) {
            VerticalDir::Up
        } else {
            VerticalDir::Down
        };
        log::debug!("player {server} serves: ball at {} heading {:?}", ball.pos, ball.dir_x);
    }
}

/// Whole-unit coordinate in `[margin, extent - margin)`, or the midpoint when
/// the court is too small for the margin
fn serve_coord(rng: &mut GameRng, margin: f32, extent: f32) -> f32 {
    if extent - margin > margin {
        rng.0.gen_range(margin..extent - margin).floor()
    } else {
        (extent / 2.0).floor()
    }
}
