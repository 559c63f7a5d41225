//! The session controller: level orchestration, scoring, and timing.
//!
//! Owns the [`GameSession`] exclusively and is the only writer to it. All
//! operations are synchronous; the broadcast channel is the push surface for
//! observable changes. Every fallible operation either completes fully or
//! leaves the session untouched.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info};

use nucleon_core::{
    ChallengeError, ChallengeFactory, GameConfig, LevelId, LevelTable, RandomChallengeFactory,
    SubmitOutcome, SubmittedAnswer,
};

use crate::error::{Result, SessionError};
use crate::events::{GameEvent, LevelOutcome};
use crate::session::GameSession;

/// Drives the quiz: starts levels, routes submissions into the active
/// challenge, accumulates score and time, and reports completion.
pub struct SessionController {
    config: GameConfig,
    levels: LevelTable,
    factory: Box<dyn ChallengeFactory>,
    timer_enabled: bool,
    session: Option<GameSession>,
    best_times: HashMap<LevelId, Duration>,
    events: broadcast::Sender<GameEvent>,
}

impl SessionController {
    pub fn builder() -> SessionControllerBuilder {
        SessionControllerBuilder::new()
    }

    /// Subscribe to session events. Each receiver sees every event published
    /// after subscription.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current session, if a level has been started.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Best recorded time for a level. Only perfect-score completions are
    /// recorded.
    pub fn best_time(&self, level: LevelId) -> Option<Duration> {
        self.best_times.get(&level).copied()
    }

    pub fn best_times(&self) -> &HashMap<LevelId, Duration> {
        &self.best_times
    }

    /// Whether newly started levels run the timer.
    pub fn set_timer_enabled(&mut self, enabled: bool) {
        self.timer_enabled = enabled;
    }

    /// Starts (or restarts) a level: generates a fresh challenge pool and
    /// replaces any session in progress.
    ///
    /// Atomic: if the level is unknown or generation fails, the previous
    /// session is left exactly as it was.
    pub fn start_level(&mut self, level: LevelId) -> Result<()> {
        let spec = self
            .levels
            .get(level)
            .ok_or(SessionError::InvalidLevel { level })?;
        let challenges = self
            .factory
            .generate(level, spec, self.config.challenges_per_level)?;

        // Past this point nothing can fail; now it is safe to tear down the
        // old session.
        self.retire_session();

        let session = GameSession::new(level, challenges, self.timer_enabled);
        info!(%level, challenges = session.challenges.len(), "level started");
        self.publish(GameEvent::LevelStarted {
            level,
            challenge_count: session.challenges.len(),
        });
        if let Some(first) = session.active_challenge() {
            self.publish(GameEvent::ChallengePresented {
                challenge_id: first.id(),
                index: 0,
                kind: first.kind(),
            });
        }
        self.session = Some(session);
        Ok(())
    }

    /// Forwards a submission to the active challenge and applies the score.
    ///
    /// Returns the full outcome (verdict, resulting state, attempts, points)
    /// so the caller can react without waiting on the event stream.
    pub fn submit_answer(&mut self, submitted: &SubmittedAnswer) -> Result<SubmitOutcome> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        let challenge = session
            .active_challenge_mut()
            .ok_or(SessionError::NoActiveChallenge)?;
        let challenge_id = challenge.id();

        let outcome = challenge
            .submit(submitted, &self.config)
            .map_err(SessionError::from)?;

        session.score += outcome.points_awarded;
        let score = session.score;

        debug!(
            %challenge_id,
            correct = outcome.check.is_correct,
            attempts = outcome.attempts_made,
            state = %outcome.state,
            score,
            "answer evaluated"
        );
        self.publish(GameEvent::AnswerEvaluated {
            challenge_id,
            check: outcome.check,
            state: outcome.state,
            attempts_made: outcome.attempts_made,
            points_awarded: outcome.points_awarded,
            score,
        });
        Ok(outcome)
    }

    /// Acknowledges the active challenge's exhaustion so the correct answer
    /// can be displayed. Valid only in `AttemptsExhausted`.
    pub fn acknowledge_exhausted(&mut self) -> Result<()> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        let challenge = session
            .active_challenge_mut()
            .ok_or(SessionError::NoActiveChallenge)?;

        challenge.acknowledge()?;
        let challenge_id = challenge.id();
        let answer = *challenge.answer();

        self.publish(GameEvent::CorrectAnswerShown {
            challenge_id,
            answer,
        });
        Ok(())
    }

    /// Retires the active challenge and moves to the next one, or completes
    /// the level when the pool is consumed.
    ///
    /// Valid only once the active challenge is terminal (solved, or its
    /// correct answer has been displayed).
    pub fn advance_to_next_challenge(&mut self) -> Result<Option<LevelOutcome>> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        let challenge = session
            .active_challenge()
            .ok_or(SessionError::NoActiveChallenge)?;
        let state = challenge.state();
        if !state.allows_advance() {
            return Err(ChallengeError::AdvanceInState { state }.into());
        }

        let retired_id = challenge.id();
        session.challenge_index += 1;

        if session.is_complete() {
            let level = session.level;
            let score = session.score;
            let elapsed = session.elapsed;
            let max_score = session.max_score(self.config.points_first_attempt);

            let outcome = if score == max_score {
                LevelOutcome::Perfect
            } else {
                LevelOutcome::Normal
            };
            if outcome == LevelOutcome::Perfect {
                let best = self.best_times.entry(level).or_insert(elapsed);
                if elapsed < *best {
                    *best = elapsed;
                }
            }
            let best_time = self.best_times.get(&level).copied();

            info!(%level, %outcome, score, ?elapsed, "level completed");
            self.publish(GameEvent::ChallengeRetired {
                challenge_id: retired_id,
            });
            self.publish(GameEvent::LevelCompleted {
                level,
                outcome,
                score,
                elapsed,
                best_time,
            });
            Ok(Some(outcome))
        } else {
            let next = session
                .active_challenge()
                .map(|c| (c.id(), c.kind()))
                .expect("index below pool length");
            let index = session.challenge_index;

            self.publish(GameEvent::ChallengeRetired {
                challenge_id: retired_id,
            });
            self.publish(GameEvent::ChallengePresented {
                challenge_id: next.0,
                index,
                kind: next.1,
            });
            Ok(None)
        }
    }

    /// Advances the session clock. No-op when the timer is disabled, no
    /// level is in progress, or the level is already complete.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(session) = self.session.as_mut()
            && session.timer_enabled
            && !session.is_complete()
        {
            session.elapsed += elapsed;
        }
    }

    /// Discards the session in progress, explicitly retiring its remaining
    /// challenges. Best times survive.
    pub fn new_game(&mut self) {
        self.retire_session();
    }

    fn retire_session(&mut self) {
        if let Some(session) = self.session.take() {
            for challenge in &session.challenges[session.challenge_index..] {
                self.publish(GameEvent::ChallengeRetired {
                    challenge_id: challenge.id(),
                });
            }
            self.publish(GameEvent::SessionReset);
            debug!(level = %session.level, "session discarded");
        }
    }

    fn publish(&self, event: GameEvent) {
        // A send with no subscribers is normal, not an error.
        if self.events.send(event).is_err() {
            tracing::trace!("no event subscribers");
        }
    }
}

/// Builder for [`SessionController`] with flexible configuration.
pub struct SessionControllerBuilder {
    config: GameConfig,
    levels: LevelTable,
    factory: Option<Box<dyn ChallengeFactory>>,
    timer_enabled: bool,
    event_capacity: usize,
}

impl SessionControllerBuilder {
    fn new() -> Self {
        Self {
            config: GameConfig::default(),
            levels: LevelTable::standard(),
            factory: None,
            timer_enabled: true,
            event_capacity: 64,
        }
    }

    /// Override game constants (challenges per level, attempt limit, point
    /// values).
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the level table (defaults to [`LevelTable::standard`]).
    pub fn levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    /// Override the challenge factory. Defaults to a randomly seeded
    /// [`RandomChallengeFactory`]; tests inject fixtures or seeded factories
    /// here.
    pub fn factory(mut self, factory: impl ChallengeFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Whether levels run the timer (default: true).
    pub fn timer_enabled(mut self, enabled: bool) -> Self {
        self.timer_enabled = enabled;
        self
    }

    /// Event channel capacity per subscriber.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn build(self) -> SessionController {
        let factory = self
            .factory
            .unwrap_or_else(|| Box::new(RandomChallengeFactory::new(rand::random())));
        let (events, _) = broadcast::channel(self.event_capacity);
        SessionController {
            config: self.config,
            levels: self.levels,
            factory,
            timer_enabled: self.timer_enabled,
            session: None,
            best_times: HashMap::new(),
            events,
        }
    }
}
