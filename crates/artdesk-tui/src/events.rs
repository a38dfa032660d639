//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the frame tick, and action outcomes sent back through the inbox.

use artdesk_core::ActionOutcome;
use crossterm::event::Event;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation, render cadence).
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// A spawned action finished.
    Action(ActionOutcome),
}
