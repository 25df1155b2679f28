//! Collaborator contracts for the game core.
//!
//! The core owns rules and orchestration only; word sourcing, keyboard input
//! and screen output live behind these seams so the terminal shell (or a test
//! harness) can be swapped in freely.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::round::RoundOutcome;

/// Deadline plus single-fire cancellation signal, scoped to one round.
///
/// Both of a round's concurrent activities (the input wait and the display
/// ticker) observe the same clock. Cancelling is idempotent; the signal fires
/// at most once no matter how many parties ask.
#[derive(Debug, Clone)]
pub struct RoundClock {
    token: CancellationToken,
    deadline: Instant,
}

impl RoundClock {
    pub fn new(limit: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now() + limit,
        }
    }

    /// Wall-clock time left before the deadline, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Fires the signal if the deadline has passed, then reports whether the
    /// signal is live. Input sinks call this once per poll interval.
    pub fn check_deadline(&self) -> bool {
        if self.remaining().is_zero() {
            self.token.cancel();
        }
        self.token.is_cancelled()
    }

    /// Fires the signal proactively (win, loss, abandonment). Safe to call on
    /// an already fired clock.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal fires, however it fires.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}

/// What the input collaborator observed while waiting for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessEvent {
    /// A fresh letter, already canonicalized to uppercase.
    Letter(char),
    /// Non-letter input; the sink has told the user, nothing to apply.
    Invalid,
    /// A letter the player tried before; the sink has told the user.
    AlreadyUsed,
    /// The player gave up on the round.
    Abandon,
    /// The round clock fired before a key arrived.
    Expired,
}

/// Feedback about the most recent applied guess, for the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct(char),
    Wrong(char),
}

/// Everything a display needs to draw one frame of the game screen.
#[derive(Debug, Clone)]
pub struct RoundView {
    pub masked: String,
    pub used: Vec<char>,
    pub mistakes: u8,
    pub max_mistakes: u8,
    pub player: String,
    /// Lives hint for tournament play; 0 means "do not show lives".
    pub lives: u8,
    pub feedback: Option<Feedback>,
}

/// External source of secret words, queried once per round.
///
/// Failures are not retried here; they surface to whoever asked for the
/// round, with no round state created.
#[async_trait]
pub trait WordSupply: Send + Sync {
    async fn fetch_word(&self) -> anyhow::Result<String>;

    /// Display name for the active source or difficulty.
    fn source_name(&self) -> &str;
}

/// Blocking-ish guess input, bounded by the round clock.
///
/// Implementations must observe the clock's cancellation within a small
/// bounded slack (the terminal sink polls every 100 ms) and must classify
/// duplicates against `used` themselves, emitting their own user feedback
/// for invalid or duplicate input.
#[async_trait]
pub trait InputSink: Send {
    async fn next_guess(&mut self, used: &BTreeSet<char>, clock: &RoundClock) -> GuessEvent;
}

/// Output-only rendering surface. The ticker calls the timer and animation
/// methods concurrently with the game loop, so implementations take `&self`.
pub trait DisplaySink: Send + Sync {
    /// Full game screen: masked word, gallows progress, used letters,
    /// active-player label, lives hint, feedback text.
    fn render_round(&self, view: &RoundView);

    /// Countdown readout, refreshed once per second by the ticker.
    fn render_timer(&self, remaining: Duration);

    fn clear_timer(&self);

    /// Short periodic animation frame.
    fn render_animation(&self, frame: usize);

    fn clear_animation(&self);

    /// End-of-round screen with the revealed secret and the outcome.
    fn render_end(&self, view: &RoundView, outcome: &RoundOutcome);
}
