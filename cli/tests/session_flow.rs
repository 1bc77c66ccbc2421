// SPDX-License-Identifier: MIT OR Apache-2.0

// End-to-end test: typed commands through a session, clock driven by hand
use std::time::Duration;
use wikirace_cli::{parse_command, Command, Session};
use wikirace_core::high_score::FileHighScoreStore;
use wikirace_core::{ArticlePool, ControlLabel, Game, ManualClock, Phase, Variant};

fn session(variant: Variant) -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let pool = ArticlePool::new(["Japan", "Jupiter", "Evolution"]).unwrap();
    let game = Game::new(variant, pool, clock.clone()).with_seed(2024);
    (Session::new(game), clock)
}

fn type_line(session: &mut Session<ManualClock>, line: &str) -> wikirace_cli::Reply {
    let command = parse_command(line).expect("non-empty line");
    session.handle(command)
}

#[test]
fn test_control_cycles_start_pause_resume() {
    let (mut session, clock) = session(Variant::Scored);
    assert_eq!(session.game().control_label(), ControlLabel::Start);

    let reply = type_line(&mut session, "start");
    assert!(reply.lines.iter().any(|l| l.starts_with("Game started!")));
    assert_eq!(session.game().control_label(), ControlLabel::Pause);

    clock.advance(Duration::from_secs(3));
    let reply = type_line(&mut session, "s");
    assert_eq!(reply.lines, vec!["Paused at 00:03. Type `resume` to continue.".to_string()]);
    assert_eq!(session.game().control_label(), ControlLabel::Resume);

    let reply = type_line(&mut session, "s");
    assert_eq!(reply.lines, vec!["Resumed at 00:03.".to_string()]);
    assert_eq!(session.game().control_label(), ControlLabel::Pause);
}

#[test]
fn test_invalid_link_raises_alert() {
    let (mut session, _clock) = session(Variant::Scored);
    type_line(&mut session, "start");

    let reply = type_line(&mut session, "https://example.com/foo");
    assert_eq!(
        reply.alert.as_deref(),
        Some("Please enter a valid Wikipedia article URL.")
    );
    assert!(reply.lines.is_empty());
    assert_eq!(session.game().clicks(), 0);
    assert_eq!(session.game().path().len(), 1);
}

#[test]
fn test_ticks_only_redraw_on_new_second() {
    let (mut session, clock) = session(Variant::Scored);
    assert_eq!(session.on_tick(), None);

    type_line(&mut session, "start");
    assert_eq!(
        session.on_tick().as_deref(),
        Some("[00:00] clicks: 0  score: 10000")
    );
    clock.advance(Duration::from_millis(400));
    assert_eq!(session.on_tick(), None);

    clock.advance(Duration::from_millis(700));
    assert_eq!(
        session.on_tick().as_deref(),
        Some("[00:01] clicks: 0  score: 9990")
    );

    type_line(&mut session, "pause");
    clock.advance(Duration::from_secs(5));
    assert_eq!(session.on_tick(), None);
}

#[test]
fn test_winning_updates_persisted_high_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_score.json");

    let clock = ManualClock::new();
    let pool = ArticlePool::new(["Japan", "Jupiter"]).unwrap();
    let game = Game::new(Variant::Scored, pool, clock.clone())
        .with_seed(5)
        .with_high_scores(Box::new(FileHighScoreStore::new(&path)));
    let mut session = Session::new(game);
    assert!(session.welcome().contains(&"High score: 0".to_string()));

    type_line(&mut session, "start");
    clock.advance(Duration::from_secs(30));
    let target = session.game().target_article().url();
    let reply = type_line(&mut session, &target);

    assert!(reply.lines.iter().any(|l| l == "  Score:  9600"));
    assert!(reply.lines.iter().any(|l| l == "  New high score!"));
    assert!(reply.lines.iter().any(|l| l == "High score: 9600"));
    assert_eq!(session.game().phase(), Phase::Ended { won: true });
    assert!(path.exists());

    // a link after the win is not another move
    let reply = type_line(&mut session, &target);
    assert!(reply.alert.is_none());
    assert_eq!(session.game().clicks(), 1);

    let reply = type_line(&mut session, "again");
    assert!(reply.lines.iter().any(|l| l.starts_with("Start:")));
    assert_eq!(session.game().phase(), Phase::Active);
}

#[test]
fn test_classic_variant_refuses_pause() {
    let (mut session, _clock) = session(Variant::Classic);
    type_line(&mut session, "start");

    let reply = type_line(&mut session, "pause");
    assert_eq!(
        reply.lines,
        vec!["Pausing is not available in the classic variant".to_string()]
    );
    assert_eq!(session.game().phase(), Phase::Active);
}

#[test]
fn test_forfeit_and_status() {
    let (mut session, _clock) = session(Variant::Scored);
    assert_eq!(
        session.handle(Command::Forfeit).lines,
        vec!["No game in progress.".to_string()]
    );

    type_line(&mut session, "start");
    let reply = session.handle(Command::Forfeit);
    assert!(reply.lines[0].starts_with("Game over."));

    let status = session.handle(Command::Status).lines;
    assert!(status.iter().any(|l| l.contains("(given up)")));
    assert!(status.iter().any(|l| l == "Control: [Start Game]"));
}
