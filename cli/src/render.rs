// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering for the CLI.

use wikirace_core::{Article, Clock, Game, GameEvent, GameSummary, Phase, Tick};

/// Commands understood at the prompt
pub const HELP: &str = "\
Commands:
  start, s      press the control button (start / pause / resume)
  pause, p      pause the clock (scored variant)
  resume, r     resume the clock (scored variant)
  new, n        draw new articles without starting
  again, a      play again with new articles
  forfeit       give up the running game
  status        show the current game
  path          show the articles visited so far
  help          show this help
  quit, q       leave the game
Anything else is read as a Wikipedia link, e.g.
  https://en.wikipedia.org/wiki/Jupiter";

/// Lines shown for one controller event
pub fn render_event(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::Initialized { start, target } => vec![
            format!("Start:  {} <{}>", start, start.url()),
            format!("Target: {}", target),
        ],
        GameEvent::Started { start } => vec![
            "Game started! Paste the link of the next article you click.".to_string(),
            path_entry(1, start),
        ],
        GameEvent::Paused { elapsed_secs } => vec![format!(
            "Paused at {}. Type `resume` to continue.",
            wikirace_core::format_time(*elapsed_secs)
        )],
        GameEvent::Resumed { elapsed_secs } => vec![format!(
            "Resumed at {}.",
            wikirace_core::format_time(*elapsed_secs)
        )],
        GameEvent::Moved { article, clicks } => {
            // the start article is entry 1
            vec![path_entry(*clicks as usize + 1, article)]
        }
        GameEvent::Ended(summary) => render_summary(summary),
    }
}

/// Victory message, or a short note for an abandoned game
pub fn render_summary(summary: &GameSummary) -> Vec<String> {
    if !summary.won {
        return vec![format!(
            "Game over. {} was {} clicks and {} away.",
            summary.target,
            summary.clicks,
            summary.formatted_time()
        )];
    }

    let mut lines = vec![
        format!("You reached {}!", summary.target),
        format!("  Clicks: {}", summary.clicks),
        format!("  Time:   {}", summary.formatted_time()),
    ];
    if let Some(score) = summary.score {
        lines.push(format!("  Score:  {}", score));
    }
    if summary.new_high_score {
        lines.push("  New high score!".to_string());
    }
    lines.push("Type `again` to play again.".to_string());
    lines
}

/// The clock line redrawn by the interval timer
pub fn render_tick(tick: &Tick, clicks: u32) -> String {
    match tick.score {
        Some(score) => format!("[{}] clicks: {}  score: {}", tick.clock, clicks, score),
        None => format!("[{}] clicks: {}", tick.clock, clicks),
    }
}

/// Numbered list of visited articles
pub fn render_path(path: &[Article]) -> Vec<String> {
    if path.is_empty() {
        return vec!["No articles visited yet.".to_string()];
    }
    path.iter()
        .enumerate()
        .map(|(i, article)| path_entry(i + 1, article))
        .collect()
}

/// Overview of a game in any phase
pub fn render_status<C: Clock>(game: &Game<C>) -> Vec<String> {
    let phase = match game.phase() {
        Phase::Idle => "waiting to start",
        Phase::Active => "running",
        Phase::Paused => "paused",
        Phase::Ended { won: true } => "won",
        Phase::Ended { won: false } => "given up",
    };

    let mut lines = vec![
        format!("Start:   {}", game.start_article()),
        format!("Target:  {}", game.target_article()),
        format!("Current: {}", game.current_article()),
        format!(
            "Clicks:  {}   Time: {}   ({})",
            game.clicks(),
            wikirace_core::format_time(game.elapsed_secs()),
            phase
        ),
    ];
    if let Some(score) = game.live_score() {
        lines.push(format!("Score:   {}   High score: {}", score, game.high_score()));
    }
    lines.push(format!("Control: [{}]", game.control_label()));
    lines
}

fn path_entry(position: usize, article: &Article) -> String {
    format!("  {:>2}. {}", position, article)
}
