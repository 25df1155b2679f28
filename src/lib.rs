pub mod core {
	pub mod coordinator;
	pub mod error;
	pub mod io;
	pub mod round;
	pub mod tournament;
}

pub mod score;
pub mod ui;
pub mod words;

// Re-export for convenience
pub use crate::core::coordinator::{RoundConfig, RoundCoordinator};
pub use crate::core::error::GameError;
pub use crate::core::io::{DisplaySink, Feedback, GuessEvent, InputSink, RoundClock, RoundView, WordSupply};
pub use crate::core::round::{GuessOutcome, LossReason, RoundEngine, RoundOutcome, RoundStatus};
pub use crate::core::tournament::{NextRound, Player, Tournament, TournamentStatus};
