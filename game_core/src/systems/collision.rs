use crate::geometry::approach_contact;
use crate::{Ball, Config, Events, HorizontalDir, Paddle, Side, VerticalDir};
use hecs::World;

/// Bounce the ball off the top and bottom walls.
///
/// Goal lines are handled by scoring before this runs, so any bottom-wall
/// contact that reaches here is a bounce.
pub fn bounce_off_walls(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.y <= 0.0 {
            ball.dir_y = VerticalDir::Down;
            events.ball_hit_wall = true;
        }
        if ball.pos.y >= config.court_height - ball.size.y {
            ball.dir_y = VerticalDir::Up;
            events.ball_hit_wall = true;
        }
    }
}

/// Check ball collisions with active paddles.
///
/// On contact the ball is snapped to the paddle's outer face, sent back
/// into the court and sped up. At most one paddle is hit per frame.
pub fn bounce_off_paddles(world: &mut World, config: &Config, events: &mut Events) {
    // First, collect paddle data without holding borrows (deterministic: by player)
    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .filter(|(_e, p)| p.active)
        .map(|(_e, p)| *p)
        .collect();
    paddles.sort_by_key(|p| p.player);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let hit = paddles.iter().find(|paddle| {
            approach_contact(
                &ball.rect(),
                ball.heading(),
                &paddle.rect(),
                paddle.side.face(),
            )
        });

        let Some(paddle) = hit else { continue };
        match paddle.side {
            Side::Left => {
                ball.pos.x = paddle.pos.x + paddle.size.x;
                ball.dir_x = HorizontalDir::Right;
            }
            Side::Right => {
                ball.pos.x = paddle.pos.x - ball.size.x;
                ball.dir_x = HorizontalDir::Left;
            }
            Side::Bottom => {
                ball.pos.y = paddle.pos.y - ball.size.y;
                ball.dir_y = VerticalDir::Up;
            }
        }
        ball.speed_up(config);
        events.ball_hit_paddle = Some(paddle.player);
        log::trace!(
            "ball hit paddle {} (speed {:.1})",
            paddle.player,
            ball.speed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PaddleIntent, Params};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Events) {
        (World::new(), Config::new(), Events::new())
    }

    fn spawn_ball(world: &mut World, config: &Config, pos: Vec2, dx: HorizontalDir, dy: VerticalDir) {
        let mut ball = Ball::new(config);
        ball.pos = pos;
        ball.dir_x = dx;
        ball.dir_y = dy;
        world.spawn((ball,));
    }

    fn ball_of(world: &World) -> Ball {
        world.query::<&Ball>().iter().next().map(|(_e, b)| *b).unwrap()
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, mut events) = setup_world();
        spawn_ball(&mut world, &config, Vec2::new(700.0, -1.0), HorizontalDir::Right, VerticalDir::Up);

        bounce_off_walls(&mut world, &config, &mut events);

        let ball = ball_of(&world);
        assert_eq!(ball.dir_y, VerticalDir::Down);
        assert_eq!(ball.dir_x, HorizontalDir::Right, "X direction unchanged");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, config, mut events) = setup_world();
        spawn_ball(&mut world, &config, Vec2::new(700.0, 985.0), HorizontalDir::Left, VerticalDir::Down);

        bounce_off_walls(&mut world, &config, &mut events);

        assert_eq!(ball_of(&world).dir_y, VerticalDir::Up);
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_collides_with_left_paddle() {
        let (mut world, config, mut events) = setup_world();
        let paddle = Paddle::new(1, Side::Left, &config);
        world.spawn((paddle, PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(160.0, 480.0), HorizontalDir::Left, VerticalDir::Down);

        bounce_off_paddles(&mut world, &config, &mut events);

        let ball = ball_of(&world);
        assert_eq!(ball.dir_x, HorizontalDir::Right);
        assert_eq!(ball.pos.x, paddle.pos.x + paddle.size.x, "Snapped to outer face");
        assert_eq!(ball.dir_y, VerticalDir::Down, "Vertical travel kept");
        assert_eq!(events.ball_hit_paddle, Some(1));
    }

    #[test]
    fn test_ball_collides_with_right_paddle() {
        let (mut world, config, mut events) = setup_world();
        let paddle = Paddle::new(2, Side::Right, &config);
        world.spawn((paddle, PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(1240.0, 480.0), HorizontalDir::Right, VerticalDir::Idle);

        bounce_off_paddles(&mut world, &config, &mut events);

        let ball = ball_of(&world);
        assert_eq!(ball.dir_x, HorizontalDir::Left);
        assert_eq!(ball.pos.x, paddle.pos.x - ball.size.x);
        assert_eq!(events.ball_hit_paddle, Some(2));
    }

    #[test]
    fn test_ball_collides_with_bottom_paddle() {
        let (mut world, config, mut events) = setup_world();
        let paddle = Paddle::new(3, Side::Bottom, &config);
        world.spawn((paddle, PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(700.0, 840.0), HorizontalDir::Left, VerticalDir::Down);

        bounce_off_paddles(&mut world, &config, &mut events);

        let ball = ball_of(&world);
        assert_eq!(ball.dir_y, VerticalDir::Up);
        assert_eq!(ball.dir_x, HorizontalDir::Left);
        assert_eq!(ball.pos.y, paddle.pos.y - ball.size.y);
    }

    #[test]
    fn test_ball_speed_increases_on_paddle_hit() {
        let (mut world, config, mut events) = setup_world();
        world.spawn((Paddle::new(1, Side::Left, &config), PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(160.0, 480.0), HorizontalDir::Left, VerticalDir::Idle);

        bounce_off_paddles(&mut world, &config, &mut events);

        let expected = Params::BALL_SPEED_BASE + Params::BALL_SPEED_INCREMENT;
        assert!((ball_of(&world).speed - expected).abs() < 1e-5);
    }

    #[test]
    fn test_ball_speed_caps_at_max() {
        let (mut world, config, mut events) = setup_world();
        world.spawn((Paddle::new(1, Side::Left, &config), PaddleIntent::new()));
        let mut ball = Ball::new(&config);
        ball.pos = Vec2::new(160.0, 480.0);
        ball.dir_x = HorizontalDir::Left;
        ball.speed = config.ball_speed_max - 0.05;
        world.spawn((ball,));

        bounce_off_paddles(&mut world, &config, &mut events);

        assert_eq!(ball_of(&world).speed, config.ball_speed_max);
    }

    #[test]
    fn test_wall_bounce_does_not_change_speed() {
        let (mut world, config, mut events) = setup_world();
        spawn_ball(&mut world, &config, Vec2::new(700.0, 0.0), HorizontalDir::Right, VerticalDir::Up);

        bounce_off_walls(&mut world, &config, &mut events);

        assert_eq!(ball_of(&world).speed, config.ball_speed_base);
    }

    #[test]
    fn test_ball_does_not_bounce_when_moving_away_from_paddle() {
        let (mut world, config, mut events) = setup_world();
        world.spawn((Paddle::new(1, Side::Left, &config), PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(160.0, 480.0), HorizontalDir::Right, VerticalDir::Idle);

        bounce_off_paddles(&mut world, &config, &mut events);

        let ball = ball_of(&world);
        assert_eq!(ball.pos.x, 160.0, "No snap when receding");
        assert_eq!(ball.speed, config.ball_speed_base);
        assert!(events.ball_hit_paddle.is_none());
    }

    #[test]
    fn test_inactive_paddle_is_transparent() {
        let (mut world, config, mut events) = setup_world();
        let mut paddle = Paddle::new(2, Side::Left, &config);
        paddle.active = false;
        world.spawn((paddle, PaddleIntent::new()));
        spawn_ball(&mut world, &config, Vec2::new(160.0, 480.0), HorizontalDir::Left, VerticalDir::Idle);

        bounce_off_paddles(&mut world, &config, &mut events);

        assert_eq!(ball_of(&world).dir_x, HorizontalDir::Left);
        assert!(events.ball_hit_paddle.is_none());
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let (mut world, config, mut events) = setup_world();
        world.spawn((Paddle::new(1, Side::Left, &config), PaddleIntent::new()));

        // Should not panic or error
        bounce_off_paddles(&mut world, &config, &mut events);
        bounce_off_walls(&mut world, &config, &mut events);

        assert!(events.ball_hit_paddle.is_none());
        assert!(!events.ball_hit_wall);
    }
}
