//! Match engine: owns the world, the clock and the state machine, and turns
//! one frame of input into one snapshot.

use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::config::Config;
use crate::error::ConfigError;
use crate::fsm::{MatchAction, MatchFsm, MatchState};
use crate::mode::GameMode;
use crate::params::Params;
use crate::resources::*;
use crate::snapshot::{BallView, BracketView, PaddleView, Snapshot};
use crate::systems::{check_winners, next_server, release_intents, reset_ball, win_message};
use crate::tournament::{Bracket, Roster, Round};

/// Mode chosen from the menu; a tournament carries its finished roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuSelection {
    SinglePlayer,
    TwoPlayer,
    ThreePlayer,
    Tournament(Roster),
}

impl MenuSelection {
    pub fn mode(&self) -> GameMode {
        match self {
            MenuSelection::SinglePlayer => GameMode::SinglePlayer,
            MenuSelection::TwoPlayer => GameMode::TwoPlayer,
            MenuSelection::ThreePlayer => GameMode::ThreePlayer,
            MenuSelection::Tournament(_) => GameMode::Tournament,
        }
    }
}

/// Discrete menu-level command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Select(MenuSelection),
    /// Return to the menu (escape / acknowledge)
    Dismiss,
}

/// Everything the driver feeds into one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub intents: Vec<(u8, Intent)>, // (player, intent)
    pub command: Option<Command>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(mut self, player: u8, intent: Intent) -> Self {
        self.intents.push((player, intent));
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn select(selection: MenuSelection) -> Self {
        Self::new().command(Command::Select(selection))
    }

    pub fn dismiss() -> Self {
        Self::new().command(Command::Dismiss)
    }
}

/// State of one match, built fresh on selection and dropped on dismiss
struct Session {
    mode: GameMode,
    world: World,
    serve: ServeState,
    events: Events,
    inputs: InputQueue,
    bracket: Option<Bracket>,
    round_end_since: Option<f64>,
    winners: Vec<u8>,
    message: Option<String>,
}

impl Session {
    fn new(mode: GameMode, bracket: Option<Bracket>, config: &Config) -> Self {
        let mut world = World::new();
        crate::spawn_lineup(&mut world, config, mode);
        Self {
            mode,
            world,
            serve: ServeState::new(),
            events: Events::new(),
            inputs: InputQueue::new(),
            bracket,
            round_end_since: None,
            winners: Vec::new(),
            message: None,
        }
    }

    /// Pick the opening server at random and start the serve delay
    fn open_rally(&mut self, now: f64, rng: &mut GameRng) {
        self.serve = ServeState::new();
        if let Some(server) = next_server(&self.world, self.mode, &self.serve, rng) {
            self.serve.schedule(server, now);
        }
    }
}

/// Single-writer Pong engine driven by [`Engine::tick`]
pub struct Engine {
    config: Config,
    rng: GameRng,
    time: Time,
    fsm: MatchFsm,
    session: Option<Session>,
    palette: u8,
}

impl Engine {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Engine on the default tuning
    pub fn seeded(seed: u64) -> Self {
        Self::build(Config::new(), seed)
    }

    fn build(config: Config, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
            time: Time::new(0.0, 0.0),
            fsm: MatchFsm::new(),
            session: None,
            palette: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> MatchState {
        self.fsm.state()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn now(&self) -> f64 {
        self.time.now
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.session.as_ref().and_then(|s| s.bracket.as_ref())
    }

    /// Events raised by the most recent simulated frame
    pub fn events(&self) -> Option<&Events> {
        self.session.as_ref().map(|s| &s.events)
    }

    pub fn world(&self) -> Option<&World> {
        self.session.as_ref().map(|s| &s.world)
    }

    /// Direct access to the entities, for drivers that stage positions
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.session.as_mut().map(|s| &mut s.world)
    }

    /// Advance one frame.
    ///
    /// The clock moves by `dt` seconds (clamped to `[0, MAX_DT]`) in every
    /// state; physics runs once per call, and only while playing.
    pub fn tick(&mut self, input: TickInput, dt: f32) -> Snapshot {
        self.time.advance(dt, Params::MAX_DT);

        if let Some(command) = input.command {
            self.apply_command(command);
        }

        if self.fsm.is_playing() {
            self.run_frame(&input.intents);
        } else if self.fsm.state() == MatchState::RoundEnd {
            self.tick_round_end();
        }

        self.snapshot()
    }

    fn apply_command(&mut self, command: Command) {
        let action = match command {
            Command::Select(_) => MatchAction::Select,
            Command::Dismiss => MatchAction::Dismiss,
        };
        if !self.fsm.can_transition(action) {
            log::debug!("ignoring {action:?} in {:?}", self.fsm.state());
            return;
        }

        match command {
            Command::Select(selection) => self.start_match(selection),
            Command::Dismiss => {
                if let Some(session) = self.session.take() {
                    log::info!("leaving {:?} match for the menu", session.mode);
                }
            }
        }
        self.fsm.transition(action);
    }

    fn start_match(&mut self, selection: MenuSelection) {
        let mode = selection.mode();
        let bracket = match selection {
            MenuSelection::Tournament(roster) => Some(Bracket::new(roster, self.config.win_score)),
            _ => None,
        };

        let mut session = Session::new(mode, bracket, &self.config);
        session.open_rally(self.time.now, &mut self.rng);
        if let Some(bracket) = &session.bracket {
            log::info!("tournament starts: {}", bracket.round_text());
        } else {
            log::info!("{mode:?} match starts");
        }
        self.session = Some(session);
        self.pick_palette();
    }

    fn run_frame(&mut self, intents: &[(u8, Intent)]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for &(player, intent) in intents {
            session.inputs.push_input(player, intent);
        }

        crate::step(
            &mut session.world,
            &self.time,
            &self.config,
            session.mode,
            &mut session.serve,
            &mut session.events,
            &mut session.inputs,
            &mut self.rng,
        );

        if !session.events.scored.is_empty() {
            self.evaluate_win();
        }
    }

    /// Decide whether the last point ended the match or tournament round
    fn evaluate_win(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let threshold = session
            .bracket
            .as_ref()
            .map_or(self.config.win_score, Bracket::winning_score);
        let winners = check_winners(&session.world, threshold);
        if winners.is_empty() {
            return;
        }

        // Nothing launches after a decided point
        session.serve = ServeState::new();

        let action = match session.bracket.as_mut() {
            Some(bracket) => {
                // Only the active pair can score, and only one side per point
                if let Err(err) = bracket.record_winner(winners[0]) {
                    log::warn!("bracket rejected winner {}: {err}", winners[0]);
                }
                session.message = bracket.result_text();
                if bracket.round() == Round::Finals {
                    if let Err(err) = bracket.advance() {
                        log::warn!("bracket could not close: {err}");
                    }
                    MatchAction::MatchWon
                } else {
                    release_intents(&mut session.world);
                    session.round_end_since = Some(self.time.now);
                    MatchAction::RoundWon
                }
            }
            None => {
                session.message = Some(win_message(session.mode, &winners));
                MatchAction::MatchWon
            }
        };
        session.winners = winners;

        let result = self.fsm.transition(action);
        log::info!(
            "{:?} -> {:?}: {}",
            result.from_state,
            result.to_state,
            session.message.as_deref().unwrap_or_default()
        );
    }

    fn tick_round_end(&mut self) {
        let due = self
            .session
            .as_ref()
            .and_then(|s| s.round_end_since)
            .is_some_and(|since| self.time.now - since >= f64::from(self.config.round_end_delay));
        if due {
            self.advance_round();
        }
    }

    /// Seat the next bracket pair and start their round
    fn advance_round(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(bracket) = session.bracket.as_mut() else {
            return;
        };
        let round = match bracket.advance() {
            Ok(round) => round,
            Err(err) => {
                log::warn!("cannot advance bracket: {err}");
                return;
            }
        };
        let Some((left, right)) = bracket.contestants() else {
            log::warn!("no contestants for {round:?}");
            return;
        };
        log::info!("{}", bracket.round_text());

        for (_entity, paddle) in session.world.query_mut::<&mut Paddle>() {
            paddle.score = 0;
            if paddle.player == left {
                paddle.seat(Side::Left, &self.config);
                paddle.active = true;
            } else if paddle.player == right {
                paddle.seat(Side::Right, &self.config);
                paddle.active = true;
            } else {
                paddle.active = false;
            }
        }
        release_intents(&mut session.world);
        reset_ball(&mut session.world, &self.config);
        session.open_rally(self.time.now, &mut self.rng);
        session.round_end_since = None;
        session.winners.clear();
        session.message = None;

        self.fsm.transition(MatchAction::CountdownDone);
        self.pick_palette();
    }

    /// Move to a different palette entry than the current one
    fn pick_palette(&mut self) {
        let offset = self.rng.0.gen_range(1..Params::PALETTE_SIZE);
        self.palette = (self.palette + offset) % Params::PALETTE_SIZE;
    }

    /// Current read-only view of the engine
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::menu(self.palette, self.time.now);
        snapshot.state = self.fsm.state();
        let Some(session) = &self.session else {
            return snapshot;
        };

        let mut paddles: Vec<PaddleView> = session
            .world
            .query::<&Paddle>()
            .iter()
            .map(|(_e, p)| PaddleView::from(p))
            .collect();
        paddles.sort_by_key(|p| p.player);

        let countdown = session.round_end_since.map(|since| {
            let left = f64::from(self.config.round_end_delay) - (self.time.now - since);
            left.max(0.0).ceil() as u32
        });

        snapshot.mode = Some(session.mode);
        snapshot.paddles = paddles;
        snapshot.ball = session
            .world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, b)| BallView::new(b, &self.config));
        snapshot.server = session.serve.server;
        snapshot.bracket = session
            .bracket
            .as_ref()
            .map(|b| BracketView::new(b, countdown));
        snapshot.message = session.message.clone();
        snapshot.winners = session.winners.clone();
        snapshot
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::seeded(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_ball(engine: &mut Engine, x: f32, dir_x: HorizontalDir) {
        let world = engine.world_mut().unwrap();
        for (_e, ball) in world.query_mut::<&mut Ball>() {
            ball.pos.x = x;
            ball.dir_x = dir_x;
        }
    }

    #[test]
    fn test_engine_starts_in_menu() {
        let mut engine = Engine::seeded(1);
        let snap = engine.tick(TickInput::new(), 0.016);
        assert_eq!(snap.state, MatchState::Menu);
        assert!(snap.paddles.is_empty());
        assert!(snap.ball.is_none());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = Config {
            win_score: 0,
            ..Config::new()
        };
        assert!(matches!(
            Engine::new(config, 1),
            Err(ConfigError::ZeroWinScore)
        ));
    }

    #[test]
    fn test_select_starts_match_with_pending_serve() {
        let mut engine = Engine::seeded(1);
        let snap = engine.tick(TickInput::select(MenuSelection::TwoPlayer), 0.016);
        assert_eq!(snap.state, MatchState::Playing);
        assert_eq!(snap.mode, Some(GameMode::TwoPlayer));
        assert_eq!(snap.paddles.len(), 2);
        assert!(matches!(snap.server, Some(1) | Some(2)));
    }

    #[test]
    fn test_select_ignored_outside_menu() {
        let mut engine = Engine::seeded(1);
        engine.tick(TickInput::select(MenuSelection::TwoPlayer), 0.016);
        let snap = engine.tick(TickInput::select(MenuSelection::ThreePlayer), 0.016);
        assert_eq!(snap.mode, Some(GameMode::TwoPlayer));
    }

    #[test]
    fn test_dismiss_from_menu_is_noop() {
        let mut engine = Engine::seeded(1);
        let snap = engine.tick(TickInput::dismiss(), 0.016);
        assert_eq!(snap.state, MatchState::Menu);
    }

    #[test]
    fn test_palette_never_repeats() {
        let mut engine = Engine::seeded(9);
        let mut last = engine.snapshot().palette;
        for _ in 0..20 {
            let snap = engine.tick(TickInput::select(MenuSelection::TwoPlayer), 0.016);
            assert_ne!(snap.palette, last);
            assert!(snap.palette < Params::PALETTE_SIZE);
            last = snap.palette;
            engine.tick(TickInput::dismiss(), 0.016);
        }
    }

    #[test]
    fn test_single_player_win_announces_computer() {
        let mut engine = Engine::seeded(4);
        engine.tick(TickInput::select(MenuSelection::SinglePlayer), 0.016);
        for _ in 0..2 {
            place_ball(&mut engine, 0.0, HorizontalDir::Left);
            engine.tick(TickInput::new(), 0.016);
        }
        let snap = engine.snapshot();
        assert_eq!(snap.state, MatchState::GameOver);
        assert_eq!(snap.winners, vec![2]);
        assert_eq!(snap.message.as_deref(), Some("Computer Wins!"));
    }

    #[test]
    fn test_nothing_moves_after_game_over() {
        let mut engine = Engine::seeded(4);
        engine.tick(TickInput::select(MenuSelection::TwoPlayer), 0.016);
        for _ in 0..2 {
            place_ball(&mut engine, 0.0, HorizontalDir::Left);
            engine.tick(TickInput::new(), 0.016);
        }
        let before = engine.snapshot();
        assert_eq!(before.state, MatchState::GameOver);

        let mut input = TickInput::new().intent(1, Intent::Up);
        for _ in 0..30 {
            engine.tick(input, 0.25);
            input = TickInput::new();
        }
        let after = engine.snapshot();
        assert_eq!(after.paddles, before.paddles);
        assert_eq!(after.ball, before.ball);
        assert!(engine.events().is_some_and(|e| e.scored.is_empty()));
    }
}
