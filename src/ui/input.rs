use std::collections::BTreeSet;
use std::io::{stdout, Write};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, terminal, QueueableCommand};
use tracing::warn;

use crate::core::io::{GuessEvent, InputSink, RoundClock};
use crate::ui::NOTICE_ROW;

// Keystroke poll bound: short enough to notice cancellation promptly,
// long enough not to spin.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keyboard input via crossterm event polling. Expects the terminal to be in
/// raw mode (the binary sets that up).
pub struct TerminalInput {
    poll_interval: Duration,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self { poll_interval: POLL_INTERVAL }
    }

    // Invalid/duplicate feedback is this sink's job; the core only re-prompts.
    fn notice(&self, text: &str) {
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, NOTICE_ROW)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine)).unwrap();
        write!(out, "{}", text).unwrap();
        out.flush().unwrap();
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputSink for TerminalInput {
    async fn next_guess(&mut self, used: &BTreeSet<char>, clock: &RoundClock) -> GuessEvent {
        loop {
            if clock.check_deadline() {
                return GuessEvent::Expired;
            }
            match event::poll(self.poll_interval) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Esc => return GuessEvent::Abandon,
                        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                            let letter = c.to_ascii_uppercase();
                            if used.contains(&letter) {
                                self.notice(&format!("'{}' was already tried", letter));
                                return GuessEvent::AlreadyUsed;
                            }
                            self.notice("");
                            return GuessEvent::Letter(letter);
                        }
                        KeyCode::Char(_) => {
                            self.notice("Guess a letter A-Z");
                            return GuessEvent::Invalid;
                        }
                        _ => {}
                    },
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "keyboard read failed, abandoning round");
                        return GuessEvent::Abandon;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "keyboard poll failed, abandoning round");
                    return GuessEvent::Abandon;
                }
            }
            // Let the ticker and the clock make progress between polls.
            tokio::task::yield_now().await;
        }
    }
}
