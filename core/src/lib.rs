// SPDX-License-Identifier: MIT OR Apache-2.0

//! wikirace core - game lifecycle, scoring and link parsing
//!
//! This crate provides the core game functionality including:
//! - The game controller state machine (idle, active, paused, ended)
//! - Parsing pasted Wikipedia links into article titles
//! - The scoring formula and persisted high score
//! - A pausable game clock and game configuration

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod article;
pub mod clock;
pub mod config;
pub mod game;
pub mod high_score;
pub mod link;
pub mod scoring;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub use article::{Article, ArticlePool};
pub use clock::{format_time, Clock, ManualClock, Stopwatch, SystemClock};
pub use game::{ControlLabel, Game, GameSummary, Phase, Tick};
pub use link::article_from_url;
pub use scoring::calculate_score;

/// Which rule set a game is played with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Pause and resume, live score and a persisted high score
    #[default]
    Scored,
    /// Clicks and elapsed time only
    Classic,
}

impl Variant {
    /// Whether this variant keeps a score
    pub fn is_scored(&self) -> bool {
        matches!(self, Variant::Scored)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Scored => f.write_str("scored"),
            Variant::Classic => f.write_str("classic"),
        }
    }
}

/// Identifier attached to every game for log correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Events emitted by the game controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh pair of articles was drawn
    Initialized {
        /// Where the race starts
        start: Article,
        /// Where the race ends
        target: Article,
    },
    /// The clock started running
    Started {
        /// The first entry of the path
        start: Article,
    },
    /// The clock was frozen
    Paused {
        /// Seconds elapsed at the moment of pausing
        elapsed_secs: u64,
    },
    /// The clock continues from where it was frozen
    Resumed {
        /// Seconds elapsed at the moment of resuming
        elapsed_secs: u64,
    },
    /// A link was accepted
    Moved {
        /// The article that was navigated to
        article: Article,
        /// Click count after this move
        clicks: u32,
    },
    /// The game is over
    Ended(GameSummary),
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The pasted text is not a Wikipedia article link
    #[error("Please enter a valid Wikipedia article URL.")]
    InvalidUrl(String),

    /// Moves are only taken while the game is running and not paused
    #[error("The game is not accepting moves")]
    NotAccepting,

    /// A game is already under way
    #[error("A game is already in progress")]
    AlreadyStarted,

    /// Pausing is only part of the scored variant
    #[error("Pausing is not available in the {0} variant")]
    PauseUnsupported(Variant),

    /// Two distinct articles are needed to race between
    #[error("Article pool needs at least 2 distinct titles, found {0}")]
    ArticlePoolTooSmall(usize),
}
