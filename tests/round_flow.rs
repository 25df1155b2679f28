//! Drives the round coordinator end to end with scripted input and a
//! recording display, under tokio's paused clock.

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use gallows::core::coordinator::{RoundConfig, RoundCoordinator};
use gallows::core::io::{DisplaySink, Feedback, GuessEvent, InputSink, RoundClock, RoundView};
use gallows::core::round::{LossReason, RoundOutcome, RoundStatus};
use gallows::GameError;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Round { masked: String, feedback: Option<Feedback> },
    Timer(u64),
    Animation(usize),
    ClearTimer,
    ClearAnimation,
    End { status: RoundStatus, reason: Option<LossReason> },
}

#[derive(Default)]
struct RecordingDisplay {
    calls: Mutex<Vec<Call>>,
}

impl RecordingDisplay {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn round_renders(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Round { .. }))
            .count()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_round(&self, view: &RoundView) {
        self.push(Call::Round { masked: view.masked.clone(), feedback: view.feedback });
    }

    fn render_timer(&self, remaining: Duration) {
        self.push(Call::Timer(remaining.as_secs()));
    }

    fn clear_timer(&self) {
        self.push(Call::ClearTimer);
    }

    fn render_animation(&self, frame: usize) {
        self.push(Call::Animation(frame));
    }

    fn clear_animation(&self) {
        self.push(Call::ClearAnimation);
    }

    fn render_end(&self, view: &RoundView, outcome: &RoundOutcome) {
        let _ = view;
        self.push(Call::End { status: outcome.status, reason: outcome.reason });
    }
}

/// Feeds a fixed sequence of events; once exhausted it waits on the clock
/// like a keyboard with no one at it. Also records how many game-screen
/// renders had happened whenever a new guess was requested.
struct ScriptedInput {
    events: VecDeque<GuessEvent>,
    display: Arc<RecordingDisplay>,
    renders_at_request: Arc<Mutex<Vec<usize>>>,
}

impl ScriptedInput {
    fn new(events: Vec<GuessEvent>, display: Arc<RecordingDisplay>) -> (Self, Arc<Mutex<Vec<usize>>>) {
        let renders = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.into(),
                display,
                renders_at_request: Arc::clone(&renders),
            },
            renders,
        )
    }
}

#[async_trait]
impl InputSink for ScriptedInput {
    async fn next_guess(&mut self, _used: &BTreeSet<char>, clock: &RoundClock) -> GuessEvent {
        self.renders_at_request
            .lock()
            .unwrap()
            .push(self.display.round_renders());
        match self.events.pop_front() {
            Some(event) => event,
            None => {
                clock.cancelled().await;
                GuessEvent::Expired
            }
        }
    }
}

fn coordinator(
    events: Vec<GuessEvent>,
    config: RoundConfig,
) -> (RoundCoordinator<ScriptedInput, RecordingDisplay>, Arc<RecordingDisplay>, Arc<Mutex<Vec<usize>>>) {
    let display = Arc::new(RecordingDisplay::default());
    let (input, renders) = ScriptedInput::new(events, Arc::clone(&display));
    (
        RoundCoordinator::with_config(input, Arc::clone(&display), config),
        display,
        renders,
    )
}

fn quick_config() -> RoundConfig {
    RoundConfig { deadline: Duration::from_secs(5), ..RoundConfig::default() }
}

#[tokio::test(start_paused = true)]
async fn scripted_win_ends_clean() {
    let (mut coord, display, _) = coordinator(
        vec![GuessEvent::Letter('A'), GuessEvent::Letter('B')],
        quick_config(),
    );

    let outcome = coord.run_round("AB", "Ada", 3).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Won);
    assert_eq!(outcome.reason, None);

    let calls = display.calls();
    // Initial screen, then the frame after 'A'; the winning guess goes
    // straight to the end screen.
    assert_eq!(display.round_renders(), 2);
    assert!(matches!(calls[0], Call::Round { ref masked, .. } if masked == "__"));
    assert!(calls.contains(&Call::Round {
        masked: "A_".to_string(),
        feedback: Some(Feedback::Correct('A')),
    }));
    assert_eq!(
        calls.last(),
        Some(&Call::End { status: RoundStatus::Won, reason: None })
    );
    // Teardown cleared both ticker regions.
    assert!(calls.contains(&Call::ClearTimer));
    assert!(calls.contains(&Call::ClearAnimation));
}

#[tokio::test(start_paused = true)]
async fn committed_state_is_rendered_before_each_wait() {
    let (mut coord, _display, renders) = coordinator(
        vec![
            GuessEvent::Letter('A'),
            GuessEvent::Letter('B'),
            GuessEvent::Letter('C'),
        ],
        quick_config(),
    );

    let outcome = coord.run_round("ABC", "Ada", 3).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Won);

    // Every wait saw the initial screen plus one frame per applied guess.
    assert_eq!(*renders.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn invalid_and_duplicate_input_only_reprompt() {
    let (mut coord, display, _) = coordinator(
        vec![
            GuessEvent::Invalid,
            GuessEvent::AlreadyUsed,
            GuessEvent::Letter('A'),
            GuessEvent::Letter('B'),
        ],
        quick_config(),
    );

    let outcome = coord.run_round("AB", "Ada", 3).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Won);
    // No extra frames for the rejected inputs.
    assert_eq!(display.round_renders(), 2);
}

#[tokio::test(start_paused = true)]
async fn abandonment_is_a_cancelled_loss() {
    let (mut coord, display, _) = coordinator(
        vec![GuessEvent::Letter('A'), GuessEvent::Abandon],
        quick_config(),
    );

    let outcome = coord.run_round("ABC", "Ada", 3).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Lost);
    assert_eq!(outcome.reason, Some(LossReason::Cancelled));
    assert_eq!(
        display.calls().last(),
        Some(&Call::End { status: RoundStatus::Lost, reason: Some(LossReason::Cancelled) })
    );
}

#[tokio::test(start_paused = true)]
async fn deadline_expiry_loses_with_timer_tag() {
    // No input ever arrives; the 60-second clock must end the round.
    let (mut coord, display, _) = coordinator(Vec::new(), RoundConfig::default());

    let outcome = coord.run_round("ABC", "Ada", 3).await.unwrap();
    assert_eq!(outcome.status, RoundStatus::Lost);
    assert_eq!(outcome.reason, Some(LossReason::TimerExpired));

    let calls = display.calls();
    // The ticker counted down from the full deadline.
    assert!(calls.contains(&Call::Timer(60)));
    assert!(calls.contains(&Call::Timer(1)));
    assert!(calls.contains(&Call::ClearTimer));
    assert!(calls.contains(&Call::ClearAnimation));
}

#[tokio::test(start_paused = true)]
async fn ticker_is_silent_after_round_ends() {
    let (mut coord, display, _) = coordinator(Vec::new(), quick_config());

    coord.run_round("ABC", "Ada", 3).await.unwrap();
    let settled = display.calls().len();

    // Give a stale ticker every chance to fire again.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(display.calls().len(), settled);
}

#[tokio::test(start_paused = true)]
async fn ticker_refreshes_timer_every_second() {
    let (mut coord, display, _) = coordinator(Vec::new(), quick_config());

    coord.run_round("ABC", "Ada", 3).await.unwrap();

    let timers: Vec<u64> = display
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::Timer(secs) => Some(*secs),
            _ => None,
        })
        .collect();
    assert_eq!(timers, vec![5, 4, 3, 2, 1]);
    // Animation advanced alongside the timer.
    assert!(display.calls().contains(&Call::Animation(0)));
    assert!(display.calls().contains(&Call::Animation(4)));
}

#[tokio::test(start_paused = true)]
async fn bad_secret_fails_before_any_resource_exists() {
    let (mut coord, display, _) = coordinator(Vec::new(), quick_config());

    let err = coord.run_round("   ", "Ada", 3).await.unwrap_err();
    assert!(matches!(err, GameError::EmptyWord));
    // Nothing was rendered and nothing needs releasing.
    assert!(display.calls().is_empty());
}
