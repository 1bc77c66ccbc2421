// SPDX-License-Identifier: MIT OR Apache-2.0

//! One player at the terminal driving one game

use crate::command::Command;
use crate::render;
use wikirace_core::{Clock, Game, GameError, GameEvent, SystemClock};

/// What to show after handling a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Regular output lines
    pub lines: Vec<String>,
    /// A message the player has to acknowledge
    pub alert: Option<String>,
    /// Leave the input loop
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    fn alert(message: impl Into<String>) -> Self {
        Self {
            alert: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Routes commands and timer ticks to the game
pub struct Session<C: Clock = SystemClock> {
    game: Game<C>,
    last_shown_secs: Option<u64>,
}

impl<C: Clock> Session<C> {
    pub fn new(game: Game<C>) -> Self {
        Self {
            game,
            last_shown_secs: None,
        }
    }

    pub fn game(&self) -> &Game<C> {
        &self.game
    }

    /// Banner shown once at startup
    pub fn welcome(&self) -> Vec<String> {
        let mut lines = vec![format!("wikirace ({} variant)", self.game.variant())];
        if self.game.variant().is_scored() {
            lines.push(format!("High score: {}", self.game.high_score()));
        }
        lines.push(format!("Start:  {}", self.game.start_article()));
        lines.push(format!("Target: {}", self.game.target_article()));
        lines.push(format!(
            "Type `start` to begin ([{}]), `help` for commands.",
            self.game.control_label()
        ));
        lines
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        tracing::debug!(?command, "Handling command");

        match command {
            Command::Control => self.events(|game| game.press_control()),
            Command::Pause => self.optional_event(|game| game.pause(), "Nothing to pause."),
            Command::Resume => self.optional_event(|game| game.resume(), "Nothing to resume."),
            Command::New => self.events(|game| Ok(vec![game.initialize()])),
            Command::Again => self.events(|game| Ok(game.play_again())),
            Command::Forfeit => match self.game.end(false) {
                Some(event) => self.render(vec![event]),
                None => Reply::line("No game in progress."),
            },
            Command::Status => Reply::lines(render::render_status(&self.game)),
            Command::Path => Reply::lines(render::render_path(self.game.path())),
            Command::Help => Reply::lines(render::HELP.lines().map(str::to_string).collect()),
            Command::Quit => Reply {
                lines: vec!["Bye!".to_string()],
                quit: true,
                ..Reply::default()
            },
            Command::Move(link) => self.events(|game| game.submit_move(&link)),
        }
    }

    /// Clock line for the interval timer, only when the shown second changes
    pub fn on_tick(&mut self) -> Option<String> {
        let tick = self.game.tick()?;
        if self.last_shown_secs == Some(tick.elapsed_secs) {
            return None;
        }
        self.last_shown_secs = Some(tick.elapsed_secs);
        Some(render::render_tick(&tick, self.game.clicks()))
    }

    fn events<F>(&mut self, op: F) -> Reply
    where
        F: FnOnce(&mut Game<C>) -> Result<Vec<GameEvent>, GameError>,
    {
        match op(&mut self.game) {
            Ok(events) => self.render(events),
            Err(e) => error_reply(e),
        }
    }

    fn optional_event<F>(&mut self, op: F, nothing: &str) -> Reply
    where
        F: FnOnce(&mut Game<C>) -> Result<Option<GameEvent>, GameError>,
    {
        match op(&mut self.game) {
            Ok(Some(event)) => self.render(vec![event]),
            Ok(None) => Reply::line(nothing),
            Err(e) => error_reply(e),
        }
    }

    fn render(&mut self, events: Vec<GameEvent>) -> Reply {
        let mut lines = Vec::new();
        for event in &events {
            match event {
                // the clock restarts from zero
                GameEvent::Initialized { .. } => self.last_shown_secs = None,
                GameEvent::Ended(summary) if summary.won && self.game.variant().is_scored() => {
                    lines.extend(render::render_event(event));
                    lines.push(format!("High score: {}", self.game.high_score()));
                    continue;
                }
                _ => {}
            }
            lines.extend(render::render_event(event));
        }
        Reply::lines(lines)
    }
}

fn error_reply(error: GameError) -> Reply {
    match error {
        GameError::InvalidUrl(_) => Reply::alert(error.to_string()),
        GameError::NotAccepting => Reply::line("No game running. Type `start` to begin."),
        other => Reply::line(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikirace_core::{ArticlePool, ManualClock, Variant};

    fn session() -> Session<ManualClock> {
        let pool = ArticlePool::new(["Japan", "Jupiter"]).unwrap();
        Session::new(Game::new(Variant::Scored, pool, ManualClock::new()).with_seed(9))
    }

    #[test]
    fn move_before_start_is_a_hint_not_an_alert() {
        let mut session = session();
        let reply = session.handle(Command::Move(
            "https://en.wikipedia.org/wiki/Jupiter".to_string(),
        ));
        assert!(reply.alert.is_none());
        assert_eq!(reply.lines, vec!["No game running. Type `start` to begin.".to_string()]);
    }

    #[test]
    fn quit_sets_the_flag() {
        let mut session = session();
        assert!(session.handle(Command::Quit).quit);
        assert!(!session.handle(Command::Status).quit);
    }
}
