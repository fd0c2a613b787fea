//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never talks to Zellij itself; it
//! returns a list of [`Action`]s that the plugin shim executes in order.

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a request to the store worker.
    PostToWorker(WorkerMessage),

    /// Asks Zellij for a `Timer` event after this many seconds.
    ///
    /// Drives notification expiry.
    SetTimeout(f64),
}
