//! Round lifecycle
//!
//! A [`Session`] owns the game state, the score record and the host
//! collaborators. It turns round outcomes into score updates, saves, and the
//! restart/quit dialog.

use crate::consts::SIM_DT;
use crate::persistence::{self, Storage};
use crate::platform::{FixedStep, Presenter};
use crate::scores::ScoreRecord;
use crate::settings::Settings;
use crate::sim::{BrickId, GameEvent, GameState, Outcome, RoundPhase, TickInput, tick};

/// The two choices offered when a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    Restart,
    Quit,
}

/// What the host should do after a call into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Terminate the process with this status
    Exit(i32),
}

pub struct Session<S: Storage, P: Presenter> {
    state: GameState,
    scores: ScoreRecord,
    storage: S,
    presenter: P,
    clock: FixedStep,
    paddle_target: Option<f32>,
}

impl<S: Storage, P: Presenter> Session<S, P> {
    /// Create an idle session, loading saved scores if there are any
    pub fn new(settings: &Settings, storage: S, presenter: P) -> Self {
        let scores = persistence::load_scores(&storage).unwrap_or_default();
        Self {
            state: GameState::new(settings),
            scores,
            storage,
            presenter,
            clock: FixedStep::new(),
            paddle_target: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn scores(&self) -> ScoreRecord {
        self.scores
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Start a round. Ignored while one is already running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            log::debug!("start() ignored: round already running");
            return;
        }
        self.state.start();
        self.clock.reset();
        self.paddle_target = None;
    }

    /// Record the latest pointer x. Only meaningful while running.
    pub fn set_paddle_target_x(&mut self, x: f32) {
        if self.state.is_running() {
            self.paddle_target = Some(x);
        }
    }

    /// Advance by a host frame delta, running as many fixed steps as it
    /// covers, then render.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        self.presenter.animate_backdrop(dt);

        let mut events = Vec::new();
        if self.state.is_running() {
            for _ in 0..self.clock.accumulate(dt) {
                events.extend(self.step());
                if !self.state.is_running() {
                    break;
                }
            }
        }

        self.presenter.render_scene(&self.state);
        events
    }

    /// Run exactly one fixed simulation step
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            target_x: self.paddle_target,
        };
        let events = tick(&mut self.state, &input, SIM_DT);
        self.absorb(&events);
        events
    }

    /// Deliver a brick contact from outside the resolver
    pub fn hit_brick(&mut self, id: BrickId) -> Vec<GameEvent> {
        let events = self.state.strike_brick(id);
        self.absorb(&events);
        events
    }

    /// Deliver a lose-zone contact from outside the resolver
    pub fn hit_lose_zone(&mut self) -> Vec<GameEvent> {
        let events = self.state.hit_lose_zone();
        self.absorb(&events);
        events
    }

    /// Answer the end-of-round dialog. Ignored unless a round has ended.
    pub fn respond(&mut self, action: EndAction) -> Flow {
        if !matches!(self.state.phase, RoundPhase::Ended(_)) {
            log::debug!("{:?} ignored in phase {:?}", action, self.state.phase);
            return Flow::Continue;
        }
        match action {
            EndAction::Restart => {
                self.start();
                Flow::Continue
            }
            EndAction::Quit => {
                log::info!(
                    "Quitting after {} rounds ({} wins, {} losses)",
                    self.state.round,
                    self.scores.wins,
                    self.scores.losses
                );
                Flow::Exit(0)
            }
        }
    }

    pub fn restart(&mut self) -> Flow {
        self.respond(EndAction::Restart)
    }

    pub fn quit(&mut self) -> Flow {
        self.respond(EndAction::Quit)
    }

    fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::RoundEnded(outcome) = *event {
                self.finish_round(outcome);
            }
        }
    }

    fn finish_round(&mut self, outcome: Outcome) {
        self.paddle_target = None;
        self.scores.record(outcome);
        persistence::save_scores(&mut self.storage, &self.scores);
        self.presenter.show_end_message(outcome.message());
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCORES_KEY;
    use crate::persistence::MemoryStorage;
    use crate::sim::HealthStage;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        messages: Vec<String>,
        frames: usize,
        backdrop_time: f32,
    }

    impl Presenter for Recorder {
        fn render_scene(&mut self, _state: &GameState) {
            self.frames += 1;
        }

        fn show_end_message(&mut self, message: &str) {
            self.messages.push(message.to_owned());
        }

        fn animate_backdrop(&mut self, dt: f32) {
            self.backdrop_time += dt;
        }
    }

    fn settings() -> Settings {
        Settings {
            arena_width: 260.0,
            arena_height: 400.0,
            brick_rows: 2,
            ..Settings::default()
        }
    }

    fn session_with(storage: MemoryStorage) -> Session<MemoryStorage, Recorder> {
        Session::new(&settings(), storage, Recorder::default())
    }

    fn running_session() -> Session<MemoryStorage, Recorder> {
        let mut session = session_with(MemoryStorage::new());
        session.start();
        session
    }

    fn destroy(session: &mut Session<MemoryStorage, Recorder>, id: BrickId) {
        for _ in 0..4 {
            session.hit_brick(id);
        }
    }

    fn saved(session: &Session<MemoryStorage, Recorder>) -> Option<Vec<u8>> {
        session.storage().get(SCORES_KEY).unwrap()
    }

    #[test]
    fn test_new_session_is_idle_with_default_scores() {
        let session = session_with(MemoryStorage::new());
        assert_eq!(session.phase(), RoundPhase::Idle);
        assert_eq!(session.scores(), ScoreRecord::new(0, 0));
    }

    #[test]
    fn test_loads_saved_scores() {
        let mut storage = MemoryStorage::new();
        storage.set(SCORES_KEY, b"[5,2]".to_vec()).unwrap();
        assert_eq!(session_with(storage).scores(), ScoreRecord::new(5, 2));
    }

    #[test]
    fn test_malformed_save_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set(SCORES_KEY, b"{oops".to_vec()).unwrap();
        assert_eq!(session_with(storage).scores(), ScoreRecord::default());
    }

    #[test]
    fn test_four_hits_remove_one_brick() {
        let mut session = running_session();
        let stages: Vec<_> = (0..3)
            .flat_map(|_| session.hit_brick(BrickId(0)))
            .collect();
        assert_eq!(
            stages,
            vec![
                GameEvent::BrickDamaged { id: BrickId(0), stage: HealthStage::Orange },
                GameEvent::BrickDamaged { id: BrickId(0), stage: HealthStage::Yellow },
                GameEvent::BrickDamaged { id: BrickId(0), stage: HealthStage::White },
            ]
        );
        assert_eq!(
            session.hit_brick(BrickId(0)),
            vec![GameEvent::BrickDestroyed { id: BrickId(0), remaining: 5 }]
        );
        assert!(session.hit_brick(BrickId(0)).is_empty());
        assert_eq!(session.state().bricks.alive_count(), 5);
        assert_eq!(session.phase(), RoundPhase::Running);
        assert!(session.presenter().messages.is_empty());
    }

    #[test]
    fn test_clearing_all_bricks_wins() {
        let mut session = running_session();
        for i in 0..6 {
            destroy(&mut session, BrickId(i));
        }
        assert_eq!(session.phase(), RoundPhase::Ended(Outcome::Win));
        assert_eq!(session.scores(), ScoreRecord::new(1, 0));
        assert_eq!(saved(&session), Some(b"[1,0]".to_vec()));
        assert_eq!(session.presenter().messages, vec!["You Win!".to_owned()]);
        assert!(session.state().ball.is_none());
        assert!(session.state().paddle.is_none());
    }

    #[test]
    fn test_lose_zone_with_bricks_left_loses() {
        let mut session = running_session();
        destroy(&mut session, BrickId(1));
        destroy(&mut session, BrickId(4));
        assert_eq!(session.state().bricks.alive_count(), 4);

        session.hit_lose_zone();
        assert_eq!(session.phase(), RoundPhase::Ended(Outcome::Lose));
        assert_eq!(session.scores(), ScoreRecord::new(0, 1));
        assert_eq!(session.state().bricks.alive_count(), 4);
        assert_eq!(saved(&session), Some(b"[0,1]".to_vec()));
        assert_eq!(session.presenter().messages, vec!["You Lose.".to_owned()]);
    }

    #[test]
    fn test_outcomes_are_exclusive() {
        let mut session = running_session();
        session.hit_lose_zone();
        // Nothing after the end counts
        session.hit_lose_zone();
        for i in 0..6 {
            destroy(&mut session, BrickId(i));
        }
        assert_eq!(session.phase(), RoundPhase::Ended(Outcome::Lose));
        assert_eq!(session.scores(), ScoreRecord::new(0, 1));
        assert_eq!(session.presenter().messages.len(), 1);
    }

    #[test]
    fn test_restart_rebuilds_round() {
        let mut session = running_session();
        destroy(&mut session, BrickId(2));
        session.set_paddle_target_x(80.0);
        session.step();
        session.hit_lose_zone();

        assert_eq!(session.restart(), Flow::Continue);
        assert_eq!(session.phase(), RoundPhase::Running);

        let state = session.state();
        let ball = state.ball.unwrap();
        assert_eq!(ball.pos, Vec2::ZERO);
        assert_eq!(ball.vel, Vec2::new(180.0, 300.0));
        assert_eq!(state.paddle.unwrap().rect.center, Vec2::new(0.0, -75.0));
        assert_eq!(state.bricks.alive_count(), 6);
        assert!(state.bricks.iter().all(|b| b.stage == HealthStage::Red));
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_quit_exits_zero() {
        let mut session = running_session();
        // Not offered mid-round
        assert_eq!(session.quit(), Flow::Continue);
        session.hit_lose_zone();
        assert_eq!(session.quit(), Flow::Exit(0));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = running_session();
        session.hit_brick(BrickId(0));
        assert_eq!(session.restart(), Flow::Continue);
        assert_eq!(
            session.state().bricks.get(BrickId(0)).unwrap().stage,
            HealthStage::Orange
        );
        assert_eq!(session.state().round, 1);
    }

    #[test]
    fn test_paddle_target_ignored_unless_running() {
        let mut session = session_with(MemoryStorage::new());
        session.set_paddle_target_x(50.0);
        session.start();
        session.step();
        assert_eq!(session.state().paddle.unwrap().x(), 0.0);

        session.set_paddle_target_x(10.0);
        session.set_paddle_target_x(-20.0);
        session.step();
        assert_eq!(session.state().paddle.unwrap().x(), -20.0);
    }

    #[test]
    fn test_scores_accumulate_and_persist_across_sessions() {
        let mut session = running_session();
        session.hit_lose_zone();
        session.restart();
        for i in 0..6 {
            destroy(&mut session, BrickId(i));
        }
        assert_eq!(session.scores(), ScoreRecord::new(1, 1));

        let storage = session.storage().clone();
        let reloaded = session_with(storage);
        assert_eq!(reloaded.scores(), ScoreRecord::new(1, 1));
    }

    #[test]
    fn test_advance_runs_fixed_steps_and_renders() {
        let mut session = running_session();
        session.advance(1.0 / 60.0);
        session.advance(1.0 / 60.0);
        assert!((3..=4).contains(&session.state().time_ticks));
        assert_eq!(session.presenter().frames, 2);
        assert!((session.presenter().backdrop_time - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_advance_while_idle_only_renders() {
        let mut session = session_with(MemoryStorage::new());
        assert!(session.advance(0.05).is_empty());
        assert_eq!(session.state().time_ticks, 0);
        assert_eq!(session.presenter().frames, 1);
    }

    #[test]
    fn test_simulated_fall_into_lose_zone() {
        let mut session = running_session();
        {
            let ball = session.state_mut().ball.as_mut().unwrap();
            ball.pos = Vec2::new(110.0, -100.0);
            ball.vel = Vec2::new(0.0, -300.0);
        }
        let mut ended = false;
        for _ in 0..120 {
            if session
                .advance(1.0 / 60.0)
                .contains(&GameEvent::RoundEnded(Outcome::Lose))
            {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(session.scores(), ScoreRecord::new(0, 1));
        assert_eq!(session.state().bricks.alive_count(), 6);
    }

    #[test]
    fn test_tracking_paddle_never_loses() {
        let mut session = running_session();
        let speed = session.state().ball.unwrap().speed();
        for _ in 0..20_000 {
            let Some(ball) = session.state().ball else {
                break;
            };
            assert_eq!(ball.speed(), speed);
            session.set_paddle_target_x(ball.pos.x);
            session.step();
        }
        assert_ne!(session.phase(), RoundPhase::Ended(Outcome::Lose));
    }

    #[test]
    fn test_unchecked_settings_give_a_live_round() {
        let bad = Settings {
            arena_width: 50.0,
            launch_scale: f32::NAN,
            ..Settings::default()
        };
        let mut session = Session::new(&bad, MemoryStorage::new(), Recorder::default());
        session.start();
        assert_eq!(session.phase(), RoundPhase::Running);
        assert!(session.state().bricks.alive_count() > 0);
        for _ in 0..1_000 {
            session.step();
        }
        if let Some(ball) = session.state().ball {
            assert!(ball.pos.is_finite());
            assert!(ball.vel.is_finite());
        }
    }
}
