use crate::{Ball, Config, Events, GameMode, Paddle, Side};
use hecs::World;

/// Check if the ball crossed a goal line; returns the wall it crossed.
///
/// The left and right walls are always goal lines. In three-player mode the
/// bottom wall is one too, except where the ball's horizontal extent still
/// overlaps the bottom paddle.
pub fn check_scoring(world: &World, config: &Config, mode: GameMode) -> Option<Side> {
    let ball = world.query::<&Ball>().iter().next().map(|(_e, b)| *b)?;

    if ball.pos.x <= 0.0 {
        return Some(Side::Left);
    }
    if ball.pos.x >= config.court_width - ball.size.x {
        return Some(Side::Right);
    }
    if mode.is_triangle() && ball.pos.y >= config.court_height - ball.size.y {
        let guarded = world
            .query::<&Paddle>()
            .iter()
            .any(|(_e, p)| {
                p.active && p.side == Side::Bottom && p.rect().overlaps_x(&ball.rect())
            });
        if !guarded {
            return Some(Side::Bottom);
        }
    }
    None
}

/// Award a point to every active paddle not defending the crossed wall.
///
/// Two-player style modes award exactly one point; three-player mode awards
/// two. Returns the awarded players in player order.
pub fn award_points(world: &mut World, wall: Side, events: &mut Events) -> Vec<u8> {
    let mut awarded = Vec::new();
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.active && paddle.side != wall {
            paddle.score += 1;
            awarded.push(paddle.player);
        }
    }
    awarded.sort_unstable();
    events.scored.extend_from_slice(&awarded);
    log::debug!("ball crossed {wall:?} wall, point to {awarded:?}");
    awarded
}
