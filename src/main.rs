use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use gallows::core::coordinator::RoundCoordinator;
use gallows::core::io::WordSupply;
use gallows::core::round::{LossReason, RoundStatus};
use gallows::core::tournament::{NextRound, Tournament, TournamentStatus};
use gallows::score::HighscoreStore;
use gallows::ui::{TerminalDisplay, TerminalInput};
use gallows::words::{Difficulty, LocalWordSupply};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr and stay silent unless RUST_LOG is set, so they do
    // not fight the raw-mode screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("duel");

    let display = Arc::new(TerminalDisplay::new());
    let mut coordinator = RoundCoordinator::new(TerminalInput::new(), Arc::clone(&display));

    crossterm::terminal::enable_raw_mode()?;
    let result = match mode {
        "duel" => {
            let p1 = args.get(2).cloned().unwrap_or_else(|| "Player 1".to_string());
            let p2 = args.get(3).cloned().unwrap_or_else(|| "Player 2".to_string());
            let words = word_supply(args.get(4).map(String::as_str))?;
            run_duel(&mut coordinator, &display, &words, p1, p2).await
        }
        "solo" => {
            let name = args.get(2).cloned().unwrap_or_else(|| "Player".to_string());
            let words = word_supply(args.get(3).map(String::as_str))?;
            run_solo(&mut coordinator, &display, &words, &name).await
        }
        other => Err(anyhow!("unknown mode '{}', expected 'duel' or 'solo'", other)),
    };
    crossterm::terminal::disable_raw_mode()?;
    result
}

fn word_supply(arg: Option<&str>) -> Result<LocalWordSupply> {
    let difficulty = match arg.unwrap_or("medium") {
        "easy" => Difficulty::Easy,
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        other => return Err(anyhow!("unknown difficulty '{}'", other)),
    };
    Ok(LocalWordSupply::for_difficulty(difficulty))
}

/// Tournament between two players at one keyboard, alternating guessers.
async fn run_duel(
    coordinator: &mut RoundCoordinator<TerminalInput, TerminalDisplay>,
    display: &TerminalDisplay,
    words: &LocalWordSupply,
    p1: String,
    p2: String,
) -> Result<()> {
    let mut tournament = Tournament::new(p1, p2);

    loop {
        match tournament.start_new_round(words).await? {
            NextRound::Over(status) => {
                match (status, tournament.winner()) {
                    (TournamentStatus::Drawn, _) | (_, None) => {
                        display.announce("🤝 The match is a draw.");
                    }
                    (_, Some(winner)) => {
                        display.announce(&format!(
                            "🏆 {} wins the match with {} round win(s)!",
                            winner.name(),
                            winner.wins()
                        ));
                    }
                }
                return Ok(());
            }
            NextRound::Word(secret) => {
                let (name, lives) = {
                    let p = tournament.current_player();
                    (p.name().to_string(), p.lives())
                };
                let outcome = coordinator.run_round(&secret, &name, lives).await?;
                let abandoned = outcome.reason == Some(LossReason::Cancelled);
                tournament.handle_round_end(&outcome);
                if abandoned {
                    display.announce(&format!("🏳 {} left the match.", name));
                    return Ok(());
                }
            }
        }
    }
}

/// Single player chasing a win streak; streaks persist to the scoreboard.
async fn run_solo(
    coordinator: &mut RoundCoordinator<TerminalInput, TerminalDisplay>,
    display: &TerminalDisplay,
    words: &LocalWordSupply,
    name: &str,
) -> Result<()> {
    let store = HighscoreStore::default();
    let mut streak = 0u32;

    loop {
        let secret = words.fetch_word().await?;
        let outcome = coordinator.run_round(&secret, name, 0).await?;
        if outcome.status == RoundStatus::Won {
            streak += 1;
        } else {
            break;
        }
    }

    if store.record_streak(name, streak)? {
        display.announce(&format!("🥇 New best streak for {}: {}", name, streak));
    } else {
        display.announce(&format!("Run over. Streak this time: {}", streak));
    }
    Ok(())
}
