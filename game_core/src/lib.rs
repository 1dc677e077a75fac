pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod mode;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;
pub mod tournament;

pub use components::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use fsm::*;
pub use mode::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;
pub use tournament::*;

use hecs::World;
use systems::*;

/// Run one frame of the Pong simulation.
///
/// Positions advance once per call; `time.now` is only read to gate the
/// pending serve. Callers advance the clock themselves.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    mode: GameMode,
    serve: &mut ServeState,
    events: &mut Events,
    inputs: &mut InputQueue,
    rng: &mut GameRng,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Ingest inputs (apply to paddle intents)
    ingest_inputs(world, inputs);

    // 2. Goal lines first: a scored rally never bounces
    if let Some(wall) = check_scoring(world, config, mode) {
        award_points(world, wall, events);
        reset_ball(world, config);
        if let Some(server) = next_server(world, mode, serve, rng) {
            serve.schedule(server, time.now);
        }
    } else {
        bounce_off_walls(world, config, events);
        move_ball(world);
    }

    // 3. Paddles, human then computer
    move_paddles(world, config);
    drive_ai(world, config);

    // 4. Launch the resting ball once the serve delay has passed
    if let Some(server) = serve.due(time.now, config.serve_delay) {
        serve_ball(world, config, mode, server, rng);
        serve.complete();
        events.served = Some(server);
    }

    // 5. Paddle contact with the ball's new position
    bounce_off_paddles(world, config, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, player: u8, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(player, side, config), PaddleIntent::new()))
}

/// Helper to create the resting ball entity
pub fn create_ball(world: &mut World, config: &Config) -> hecs::Entity {
    world.spawn((Ball::new(config),))
}

/// Spawn the paddles and ball for a fresh match in `mode`.
///
/// In single player the right paddle is computer-driven.
pub fn spawn_lineup(world: &mut World, config: &Config, mode: GameMode) {
    for &(player, side, active) in mode.lineup() {
        let entity = create_paddle(world, player, side, config);
        if let Ok(mut paddle) = world.get::<&mut Paddle>(entity) {
            paddle.active = active;
        }
        if mode == GameMode::SinglePlayer && side == Side::Right {
            let _ = world.insert_one(entity, AiControlled);
        }
    }
    create_ball(world, config);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rig {
        world: World,
        time: Time,
        config: Config,
        serve: ServeState,
        events: Events,
        inputs: InputQueue,
        rng: GameRng,
    }

    fn setup_world(mode: GameMode) -> Rig {
        let config = Config::new();
        let mut world = World::new();
        spawn_lineup(&mut world, &config, mode);
        Rig {
            world,
            time: Time::new(0.0, 0.0),
            config,
            serve: ServeState::new(),
            events: Events::new(),
            inputs: InputQueue::new(),
            rng: GameRng::new(3),
        }
    }

    fn run(rig: &mut Rig, mode: GameMode) {
        step(
            &mut rig.world,
            &rig.time,
            &rig.config,
            mode,
            &mut rig.serve,
            &mut rig.events,
            &mut rig.inputs,
            &mut rig.rng,
        );
    }

    fn ball_of(world: &World) -> Ball {
        world.query::<&Ball>().iter().next().map(|(_e, b)| *b).unwrap()
    }

    #[test]
    fn test_spawn_lineup_single_player_has_ai() {
        let rig = setup_world(GameMode::SinglePlayer);
        let ai: Vec<u8> = rig
            .world
            .query::<(&Paddle, &AiControlled)>()
            .iter()
            .map(|(_e, (p, _))| p.player)
            .collect();
        assert_eq!(ai, vec![2]);
        assert_eq!(rig.world.query::<&Ball>().iter().count(), 1);
    }

    #[test]
    fn test_resting_ball_stays_put() {
        let mut rig = setup_world(GameMode::TwoPlayer);
        let before = ball_of(&rig.world);
        run(&mut rig, GameMode::TwoPlayer);
        assert_eq!(ball_of(&rig.world).pos, before.pos);
    }

    #[test]
    fn test_goal_awards_point_and_waits_for_serve() {
        let mut rig = setup_world(GameMode::TwoPlayer);
        for (_e, ball) in rig.world.query_mut::<&mut Ball>() {
            ball.pos.x = 0.0;
            ball.dir_x = HorizontalDir::Left;
        }
        rig.time.now = 5.0;
        run(&mut rig, GameMode::TwoPlayer);

        assert_eq!(rig.events.scored, vec![2]);
        assert!(ball_of(&rig.world).is_resting());
        assert!(rig.serve.server.is_some());

        // Not yet due half a second later
        rig.time.now = 5.5;
        run(&mut rig, GameMode::TwoPlayer);
        assert!(rig.events.served.is_none());
        assert!(ball_of(&rig.world).is_resting());

        rig.time.now = 6.0;
        run(&mut rig, GameMode::TwoPlayer);
        assert!(rig.events.served.is_some());
        assert!(!ball_of(&rig.world).is_resting());
        assert!(rig.serve.server.is_none());
    }

    #[test]
    fn test_held_intent_moves_paddle_each_frame() {
        let mut rig = setup_world(GameMode::TwoPlayer);
        let start = rig.config.paddle_spawn(Side::Left).y;
        rig.inputs.push_input(1, Intent::Up);
        run(&mut rig, GameMode::TwoPlayer);
        run(&mut rig, GameMode::TwoPlayer);

        let y = rig
            .world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.player == 1)
            .map(|(_e, p)| p.pos.y)
            .unwrap();
        assert_eq!(y, start - 2.0 * rig.config.paddle_speed);
    }
}
