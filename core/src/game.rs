// SPDX-License-Identifier: MIT OR Apache-2.0

//! The game controller
//!
//! A [`Game`] owns everything one race needs: the two articles, the path
//! taken so far, the click count and the clock. Front ends call its
//! operations from their event handlers and render the [`GameEvent`]s that
//! come back.
//!
//! ```text
//! Idle --start--> Active --pause--> Paused
//!                   |  ^--resume------'  |
//!                   '--end--> Ended <----'
//! ```

use crate::clock::{format_time, Clock, Stopwatch, SystemClock};
use crate::high_score::{HighScoreRecord, HighScoreStore, MemoryHighScoreStore};
use crate::scoring::calculate_score;
use crate::{article_from_url, Article, ArticlePool, GameError, GameEvent, GameId, Variant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Articles drawn, clock not running, input disabled
    Idle,
    /// Clock running, links accepted
    Active,
    /// Clock frozen, input disabled
    Paused,
    /// Over, either by reaching the target or by giving up
    Ended {
        /// Whether the target was reached
        won: bool,
    },
}

/// Label of the single start/pause/resume control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlLabel {
    Start,
    Pause,
    Resume,
}

impl fmt::Display for ControlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlLabel::Start => f.write_str("Start Game"),
            ControlLabel::Pause => f.write_str("Pause Game"),
            ControlLabel::Resume => f.write_str("Resume Game"),
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    pub start: Article,
    pub target: Article,
    pub clicks: u32,
    pub elapsed_secs: u64,
    /// Final score; only won games of the scored variant have one
    pub score: Option<u32>,
    /// Whether `score` replaced the stored high score
    pub new_high_score: bool,
    pub path: Vec<Article>,
}

impl GameSummary {
    /// Elapsed time as `MM:SS`
    pub fn formatted_time(&self) -> String {
        format_time(self.elapsed_secs)
    }
}

/// What the interval timer shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub elapsed_secs: u64,
    /// Elapsed time as `MM:SS`
    pub clock: String,
    /// Live score in the scored variant
    pub score: Option<u32>,
}

/// One race from a start article to a target article
pub struct Game<C: Clock = SystemClock> {
    id: GameId,
    variant: Variant,
    pool: ArticlePool,
    rng: StdRng,
    clock: C,
    high_scores: Box<dyn HighScoreStore>,
    start: Article,
    target: Article,
    current: Article,
    clicks: u32,
    path: Vec<Article>,
    stopwatch: Stopwatch,
    phase: Phase,
    control: ControlLabel,
    summary: Option<GameSummary>,
}

impl Game<SystemClock> {
    /// A game on the wall clock
    pub fn with_system_clock(variant: Variant, pool: ArticlePool) -> Self {
        Self::new(variant, pool, SystemClock)
    }
}

impl<C: Clock> Game<C> {
    /// Create a game and draw its first pair of articles
    ///
    /// High scores are kept in memory until [`Game::with_high_scores`]
    /// supplies a persistent store.
    pub fn new(variant: Variant, pool: ArticlePool, clock: C) -> Self {
        let mut rng = StdRng::from_entropy();
        let (start, target) = pool.pick_pair(&mut rng);
        let mut game = Self {
            id: GameId::new(),
            variant,
            pool,
            rng,
            clock,
            high_scores: Box::new(MemoryHighScoreStore::new()),
            current: start.clone(),
            start,
            target,
            clicks: 0,
            path: Vec::new(),
            stopwatch: Stopwatch::new(),
            phase: Phase::Idle,
            control: ControlLabel::Start,
            summary: None,
        };
        game.initialize();
        game
    }

    /// Draw articles from a seeded generator; redraws the current pair
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.initialize();
        self
    }

    /// Keep the high score in `store`
    pub fn with_high_scores(mut self, store: Box<dyn HighScoreStore>) -> Self {
        self.high_scores = store;
        self
    }

    /// Reset everything and draw a new pair of distinct articles
    pub fn initialize(&mut self) -> GameEvent {
        let (start, target) = self.pool.pick_pair(&mut self.rng);

        self.id = GameId::new();
        self.current = start.clone();
        self.start = start;
        self.target = target;
        self.clicks = 0;
        self.path.clear();
        self.stopwatch.reset();
        self.phase = Phase::Idle;
        self.control = ControlLabel::Start;
        self.summary = None;

        tracing::info!(
            game_id = %self.id,
            start = self.start.title(),
            target = self.target.title(),
            "Game initialized"
        );

        GameEvent::Initialized {
            start: self.start.clone(),
            target: self.target.clone(),
        }
    }

    /// Start the clock on an idle game
    pub fn start(&mut self) -> Result<GameEvent, GameError> {
        if self.phase != Phase::Idle {
            return Err(GameError::AlreadyStarted);
        }
        Ok(self.begin())
    }

    fn begin(&mut self) -> GameEvent {
        self.phase = Phase::Active;
        self.stopwatch.start(self.clock.now());
        self.path.push(self.start.clone());
        self.control = if self.variant.is_scored() {
            ControlLabel::Pause
        } else {
            ControlLabel::Start
        };

        tracing::info!(game_id = %self.id, variant = %self.variant, "Game started");

        GameEvent::Started {
            start: self.start.clone(),
        }
    }

    /// Fresh articles and a running clock in one step
    pub fn play_again(&mut self) -> Vec<GameEvent> {
        let initialized = self.initialize();
        let started = self.begin();
        vec![initialized, started]
    }

    /// Freeze the clock; `Ok(None)` when there is nothing to pause
    pub fn pause(&mut self) -> Result<Option<GameEvent>, GameError> {
        if !self.variant.is_scored() {
            return Err(GameError::PauseUnsupported(self.variant));
        }
        if self.phase != Phase::Active {
            return Ok(None);
        }

        let now = self.clock.now();
        self.stopwatch.stop(now);
        self.phase = Phase::Paused;
        self.control = ControlLabel::Resume;

        let elapsed_secs = self.stopwatch.elapsed_secs(now);
        tracing::info!(game_id = %self.id, elapsed_secs, "Game paused");
        Ok(Some(GameEvent::Paused { elapsed_secs }))
    }

    /// Continue a paused clock; `Ok(None)` when the game is not paused
    pub fn resume(&mut self) -> Result<Option<GameEvent>, GameError> {
        if !self.variant.is_scored() {
            return Err(GameError::PauseUnsupported(self.variant));
        }
        if self.phase != Phase::Paused {
            return Ok(None);
        }

        let now = self.clock.now();
        self.stopwatch.start(now);
        self.phase = Phase::Active;
        self.control = ControlLabel::Pause;

        let elapsed_secs = self.stopwatch.elapsed_secs(now);
        tracing::info!(game_id = %self.id, elapsed_secs, "Game resumed");
        Ok(Some(GameEvent::Resumed { elapsed_secs }))
    }

    /// Act on the control according to its current label
    ///
    /// "Start Game" begins a new game, "Pause Game" pauses and "Resume Game"
    /// resumes. In the classic variant the label stays on "Start Game", so
    /// pressing it mid-game starts over.
    pub fn press_control(&mut self) -> Result<Vec<GameEvent>, GameError> {
        match self.control {
            ControlLabel::Start => Ok(self.play_again()),
            ControlLabel::Pause => Ok(self.pause()?.into_iter().collect()),
            ControlLabel::Resume => Ok(self.resume()?.into_iter().collect()),
        }
    }

    /// Navigate to the article behind a pasted link
    ///
    /// Reaching the target ends the game, so the returned events are either
    /// `[Moved]` or `[Moved, Ended]`. Invalid links leave the game untouched.
    pub fn submit_move(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        let _span = tracing::info_span!("game.move", game_id = %self.id).entered();

        if self.phase != Phase::Active {
            return Err(GameError::NotAccepting);
        }

        let article = article_from_url(input).ok_or_else(|| {
            tracing::warn!(input, "Rejected link");
            GameError::InvalidUrl(input.to_string())
        })?;

        self.current = article.clone();
        self.clicks = self.clicks.saturating_add(1);
        self.path.push(article.clone());

        tracing::debug!(article = article.title(), clicks = self.clicks, "Move accepted");

        let reached_target = article == self.target;
        let mut events = vec![GameEvent::Moved {
            article,
            clicks: self.clicks,
        }];

        if reached_target {
            events.extend(self.end(true));
        }

        Ok(events)
    }

    /// Stop the clock and settle the result
    ///
    /// Only a running or paused game can end; otherwise this returns `None`.
    pub fn end(&mut self, won: bool) -> Option<GameEvent> {
        if !matches!(self.phase, Phase::Active | Phase::Paused) {
            return None;
        }

        let now = self.clock.now();
        self.stopwatch.stop(now);
        let elapsed_secs = self.stopwatch.elapsed_secs(now);

        self.phase = Phase::Ended { won };
        self.control = ControlLabel::Start;

        let score = (won && self.variant.is_scored()).then(|| calculate_score(elapsed_secs, self.clicks));
        let new_high_score = match score {
            Some(score) => self.record_high_score(score, elapsed_secs),
            None => false,
        };

        let summary = GameSummary {
            won,
            start: self.start.clone(),
            target: self.target.clone(),
            clicks: self.clicks,
            elapsed_secs,
            score,
            new_high_score,
            path: self.path.clone(),
        };

        tracing::info!(
            game_id = %self.id,
            won,
            clicks = self.clicks,
            elapsed_secs,
            score = ?score,
            "Game ended"
        );

        self.summary = Some(summary.clone());
        Some(GameEvent::Ended(summary))
    }

    fn record_high_score(&mut self, score: u32, elapsed_secs: u64) -> bool {
        let record = HighScoreRecord {
            score,
            clicks: self.clicks,
            elapsed_secs,
            start: self.start.clone(),
            target: self.target.clone(),
            achieved_at: chrono::Utc::now(),
        };

        match self.high_scores.submit(&record) {
            Ok(improved) => improved,
            Err(e) => {
                tracing::warn!(game_id = %self.id, "Failed to update high score: {:#}", e);
                false
            }
        }
    }

    /// Clock refresh for the interval timer; `None` unless the clock is running
    pub fn tick(&self) -> Option<Tick> {
        if self.phase != Phase::Active {
            return None;
        }

        let elapsed_secs = self.elapsed_secs();
        Some(Tick {
            elapsed_secs,
            clock: format_time(elapsed_secs),
            score: self.live_score_at(elapsed_secs),
        })
    }

    /// Seconds counted so far
    pub fn elapsed_secs(&self) -> u64 {
        self.stopwatch.elapsed_secs(self.clock.now())
    }

    /// Current score in the scored variant, 0 before the game starts
    pub fn live_score(&self) -> Option<u32> {
        match self.phase {
            Phase::Idle => self.variant.is_scored().then_some(0),
            _ => self.live_score_at(self.elapsed_secs()),
        }
    }

    fn live_score_at(&self, elapsed_secs: u64) -> Option<u32> {
        self.variant
            .is_scored()
            .then(|| calculate_score(elapsed_secs, self.clicks))
    }

    /// Best stored score, 0 if none or if the store cannot be read
    pub fn high_score(&self) -> u32 {
        self.high_scores.best_score().unwrap_or_else(|e| {
            tracing::warn!("Failed to read high score: {:#}", e);
            0
        })
    }

    /// Whether the link input is enabled
    pub fn accepts_moves(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn control_label(&self) -> ControlLabel {
        self.control
    }

    pub fn start_article(&self) -> &Article {
        &self.start
    }

    pub fn target_article(&self) -> &Article {
        &self.target
    }

    pub fn current_article(&self) -> &Article {
        &self.current
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn path(&self) -> &[Article] {
        &self.path
    }

    /// Result of the last finished game, until the next initialization
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use std::time::Duration;

    fn two_article_game(variant: Variant) -> (Game<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let pool = ArticlePool::new(["Japan", "Jupiter"]).unwrap();
        (Game::new(variant, pool, clock.clone()).with_seed(3), clock)
    }

    #[test]
    fn new_game_is_idle() {
        let (game, _) = two_article_game(Variant::Scored);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.control_label(), ControlLabel::Start);
        assert_eq!(game.current_article(), game.start_article());
        assert_ne!(game.start_article(), game.target_article());
        assert!(game.path().is_empty());
        assert!(!game.accepts_moves());
        assert_eq!(game.live_score(), Some(0));
        assert!(game.tick().is_none());
    }

    #[test]
    fn start_twice_is_refused() {
        let (mut game, _) = two_article_game(Variant::Scored);
        game.start().unwrap();
        assert_eq!(game.start(), Err(GameError::AlreadyStarted));
        assert_eq!(game.path().len(), 1);
    }

    #[test]
    fn tick_reports_clock_and_live_score() {
        let (mut game, clock) = two_article_game(Variant::Scored);
        game.start().unwrap();
        clock.advance(Duration::from_millis(65_300));

        let tick = game.tick().unwrap();
        assert_eq!(tick.elapsed_secs, 65);
        assert_eq!(tick.clock, "01:05");
        assert_eq!(tick.score, Some(10_000 - 650));
    }

    #[test]
    fn classic_variant_has_no_score_or_pause() {
        let (mut game, clock) = two_article_game(Variant::Classic);
        game.start().unwrap();
        assert_eq!(game.control_label(), ControlLabel::Start);
        assert_eq!(game.pause(), Err(GameError::PauseUnsupported(Variant::Classic)));

        clock.advance(Duration::from_secs(4));
        assert_eq!(game.tick().unwrap().score, None);

        let target = game.target_article().url();
        let events = game.submit_move(&target).unwrap();
        match events.last() {
            Some(GameEvent::Ended(summary)) => {
                assert!(summary.won);
                assert_eq!(summary.score, None);
                assert!(!summary.new_high_score);
            }
            other => panic!("expected game end, got {:?}", other),
        }
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn end_outside_a_running_game_is_ignored() {
        let (mut game, _) = two_article_game(Variant::Scored);
        assert!(game.end(false).is_none());
        game.start().unwrap();
        assert!(game.end(false).is_some());
        assert!(game.end(true).is_none());
        assert_eq!(game.phase(), Phase::Ended { won: false });
    }
}
