//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never spawns network calls itself; it enters the pending
//! state and asks the runtime to run the request.

use artdesk_core::ActionRequest;

#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Run an action whose pending state has already been entered.
    RunAction(ActionRequest),
}
