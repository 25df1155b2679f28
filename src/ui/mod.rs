//! Terminal presentation shell: crossterm-backed implementations of the
//! core's display and input contracts.

pub mod display;
pub mod input;

pub use display::TerminalDisplay;
pub use input::TerminalInput;

// Fixed screen rows shared by the display and the input prompt. The game
// screen owns everything above these.
pub(crate) const NOTICE_ROW: u16 = 14;
pub(crate) const TIMER_ROW: u16 = 15;
pub(crate) const ANIMATION_ROW: u16 = 16;
