// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of typed input lines

/// Something the player typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press the start/pause/resume control
    Control,
    Pause,
    Resume,
    /// Draw new articles without starting the clock
    New,
    /// Draw new articles and start right away
    Again,
    /// Give up the running game
    Forfeit,
    Status,
    Path,
    Help,
    Quit,
    /// Anything else is treated as a pasted link
    Move(String),
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let command = match input.to_lowercase().as_str() {
        "start" | "s" | "control" => Command::Control,
        "pause" | "p" => Command::Pause,
        "resume" | "r" => Command::Resume,
        "new" | "n" => Command::New,
        "again" | "play again" | "a" => Command::Again,
        "forfeit" | "give up" => Command::Forfeit,
        "status" => Command::Status,
        "path" => Command::Path,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Move(input.to_string()),
    };

    Some(command)
}
