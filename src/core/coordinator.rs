use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::core::error::GameError;
use crate::core::io::{DisplaySink, Feedback, GuessEvent, InputSink, RoundClock, RoundView};
use crate::core::round::{GuessOutcome, LossReason, RoundEngine, RoundOutcome, RoundStatus};

/// Wrong guesses a round tolerates before it is lost.
pub const MISTAKE_BUDGET: u8 = 6;
/// Wall-clock limit for one round.
pub const ROUND_DEADLINE: Duration = Duration::from_secs(60);
/// Period of the timer/animation refresh.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// How long teardown waits for the ticker to acknowledge the stop signal.
const TICKER_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct RoundConfig {
    pub max_mistakes: u8,
    pub deadline: Duration,
    pub tick_period: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            max_mistakes: MISTAKE_BUDGET,
            deadline: ROUND_DEADLINE,
            tick_period: TICK_PERIOD,
        }
    }
}

/// Runs exactly one round at a time under a fixed deadline.
///
/// Two concurrent activities exist while a round runs: this coordinator's own
/// guess loop, which exclusively owns the [`RoundEngine`], and a spawned
/// display ticker that only reads the shared [`RoundClock`]. Both observe the
/// clock's single-fire cancellation, and both are torn down before
/// [`RoundCoordinator::run_round`] returns, on every exit path.
pub struct RoundCoordinator<I, D> {
    input: I,
    display: Arc<D>,
    config: RoundConfig,
}

impl<I, D> RoundCoordinator<I, D>
where
    I: InputSink,
    D: DisplaySink + 'static,
{
    pub fn new(input: I, display: Arc<D>) -> Self {
        Self::with_config(input, display, RoundConfig::default())
    }

    pub fn with_config(input: I, display: Arc<D>, config: RoundConfig) -> Self {
        Self { input, display, config }
    }

    /// Plays one round of `secret` to a terminal status.
    ///
    /// Timeout and abandonment are expected terminal paths and come back in
    /// the [`RoundOutcome`], never as errors; the only error here is a bad
    /// secret, which fails before any round resource is created.
    pub async fn run_round(
        &mut self,
        secret: &str,
        player: &str,
        lives: u8,
    ) -> Result<RoundOutcome, GameError> {
        let mut engine = RoundEngine::new(secret, self.config.max_mistakes)?;
        self.display.render_round(&view(&engine, None, player, lives));

        let clock = RoundClock::new(self.config.deadline);
        let ticker = spawn_ticker(Arc::clone(&self.display), clock.clone(), self.config.tick_period);

        let mut reason = None;
        while engine.status() == RoundStatus::InProgress {
            let event = self.input.next_guess(engine.used_letters(), &clock).await;
            match event {
                GuessEvent::Abandon => {
                    engine.force_lose();
                    reason = Some(LossReason::Cancelled);
                }
                GuessEvent::Expired => {
                    engine.force_lose();
                    reason = Some(LossReason::TimerExpired);
                }
                // The sink already told the user; just prompt again.
                GuessEvent::Invalid | GuessEvent::AlreadyUsed => {}
                GuessEvent::Letter(letter) => {
                    let feedback = match engine.guess(letter) {
                        GuessOutcome::Correct { .. } => Some(Feedback::Correct(letter)),
                        GuessOutcome::Wrong { .. } => Some(Feedback::Wrong(letter)),
                        GuessOutcome::AlreadyUsed { .. } | GuessOutcome::Ignored => None,
                    };
                    if engine.status() == RoundStatus::InProgress {
                        // The committed guess must be on screen before the
                        // next input wait; feedback shows for this frame only.
                        self.display.render_round(&view(&engine, feedback, player, lives));
                    }
                }
            }
        }

        // Unconditional teardown, reached from every loop exit: fire the
        // signal, wait briefly for the ticker, then reclaim its regions.
        clock.cancel();
        if tokio::time::timeout(TICKER_GRACE, ticker).await.is_err() {
            warn!("display ticker did not acknowledge stop within grace period");
        }
        self.display.clear_timer();
        self.display.clear_animation();

        let outcome = RoundOutcome { status: engine.status(), reason };
        let mut end_view = view(&engine, None, player, lives);
        end_view.masked = engine.secret().to_string();
        self.display.render_end(&end_view, &outcome);
        debug!(status = ?outcome.status, reason = ?outcome.reason, "round finished");
        Ok(outcome)
    }
}

fn view(engine: &RoundEngine, feedback: Option<Feedback>, player: &str, lives: u8) -> RoundView {
    RoundView {
        masked: engine.masked_word(),
        used: engine.used_letters().iter().copied().collect(),
        mistakes: engine.mistakes(),
        max_mistakes: engine.max_mistakes(),
        player: player.to_string(),
        lives,
        feedback,
    }
}

/// Once per tick: re-derive remaining time, refresh timer and animation.
/// The ticker also fires the deadline itself, so a round with no input sink
/// activity still expires. It never touches round state.
fn spawn_ticker<D>(display: Arc<D>, clock: RoundClock, period: Duration) -> JoinHandle<()>
where
    D: DisplaySink + 'static,
{
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frame = 0usize;
        loop {
            tokio::select! {
                _ = clock.cancelled() => break,
                _ = ticks.tick() => {
                    if clock.check_deadline() {
                        break;
                    }
                    display.render_timer(clock.remaining());
                    display.render_animation(frame);
                    frame = frame.wrapping_add(1);
                }
            }
        }
    })
}
