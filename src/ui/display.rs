use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::{cursor, terminal, QueueableCommand};

use crate::core::io::{DisplaySink, Feedback, RoundView};
use crate::core::round::{LossReason, RoundOutcome, RoundStatus};
use crate::ui::{ANIMATION_ROW, TIMER_ROW};

// One stage per mistake, index 0..=6.
const GALLOWS: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n=======",
];

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Crossterm renderer for the game. The ticker calls the timer/animation
/// methods from another task, so everything draws through a fresh stdout
/// handle and flushes per call.
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Shell-level announcement outside any round (match result, errors).
    pub fn announce(&self, text: &str) {
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, 0)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::All)).unwrap();
        writeln!(out, "{}\r", text).unwrap();
        out.flush().unwrap();
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn render_round(&self, view: &RoundView) {
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, 0)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::All)).unwrap();

        writeln!(out, "🎩 GALLOWS — guessing: {}\r", view.player).unwrap();
        writeln!(out, "═════════════════════════════════\r").unwrap();
        for line in GALLOWS[view.mistakes.min(6) as usize].lines() {
            writeln!(out, "{}\r", line).unwrap();
        }
        writeln!(out, "\r").unwrap();
        writeln!(out, "Word: {}\r", spaced(&view.masked)).unwrap();
        writeln!(
            out,
            "Mistakes: {}/{}   Used: {}\r",
            view.mistakes,
            view.max_mistakes,
            view.used.iter().collect::<String>()
        )
        .unwrap();
        if view.lives > 0 {
            writeln!(out, "Lives: {}\r", "❤".repeat(view.lives as usize)).unwrap();
        }
        match view.feedback {
            Some(Feedback::Correct(c)) => {
                writeln!(out, "✅ '{}' is in the word.\r", c).unwrap();
            }
            Some(Feedback::Wrong(c)) => {
                writeln!(out, "❌ '{}' is not in the word.\r", c).unwrap();
            }
            None => writeln!(out, "\r").unwrap(),
        }
        writeln!(out, "💡 Type a letter to guess, Esc to give up\r").unwrap();
        out.flush().unwrap();
    }

    fn render_timer(&self, remaining: Duration) {
        let secs = remaining.as_secs();
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, TIMER_ROW)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine)).unwrap();
        write!(out, "⏳ {}:{:02}", secs / 60, secs % 60).unwrap();
        out.flush().unwrap();
    }

    fn clear_timer(&self) {
        clear_row(TIMER_ROW);
    }

    fn render_animation(&self, frame: usize) {
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, ANIMATION_ROW)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine)).unwrap();
        write!(out, "{}", SPINNER[frame % SPINNER.len()]).unwrap();
        out.flush().unwrap();
    }

    fn clear_animation(&self) {
        clear_row(ANIMATION_ROW);
    }

    fn render_end(&self, view: &RoundView, outcome: &RoundOutcome) {
        let mut out = stdout();
        out.queue(cursor::MoveTo(0, 0)).unwrap();
        out.queue(terminal::Clear(terminal::ClearType::All)).unwrap();

        match (outcome.status, outcome.reason) {
            (RoundStatus::Won, _) => {
                writeln!(out, "🎉 {} guessed it!\r", view.player).unwrap();
            }
            (_, Some(LossReason::TimerExpired)) => {
                writeln!(out, "⏰ Time's up, {}!\r", view.player).unwrap();
            }
            (_, Some(LossReason::Cancelled)) => {
                writeln!(out, "🏳 {} gave up.\r", view.player).unwrap();
            }
            _ => {
                writeln!(out, "💀 No tries left, {}.\r", view.player).unwrap();
            }
        }
        writeln!(out, "The word was: {}\r", view.masked).unwrap();
        writeln!(out, "\r").unwrap();
        out.flush().unwrap();
    }
}

fn spaced(masked: &str) -> String {
    let mut s = String::with_capacity(masked.len() * 2);
    for c in masked.chars() {
        s.push(c);
        s.push(' ');
    }
    s
}

fn clear_row(row: u16) {
    let mut out = stdout();
    out.queue(cursor::MoveTo(0, row)).unwrap();
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine)).unwrap();
    out.flush().unwrap();
}
