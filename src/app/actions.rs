//! Side effects requested by the event handler.
//!
//! The handler never touches the host directly. It returns a list of
//! [`Action`]s which `main.rs` executes in order against the Zellij API.

use crate::net::OutboundRequest;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the storage worker.
    PostToWorker(WorkerMessage),

    /// Issues an HTTP request. The completion comes back as a
    /// [`WebResponse`](crate::app::Event::WebResponse) event carrying the
    /// request's kind.
    WebRequest(OutboundRequest),

    /// Schedules a host timer. Elapsed timers arrive as
    /// [`Timer`](crate::app::Event::Timer) events.
    StartTimer(Duration),
}
