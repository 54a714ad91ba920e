//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the catalog, search,
//! and worker layers. Data flows one way:
//!
//! ```text
//! Host event → Event → handle_event → AppState mutation → Actions → Host calls
//!                          ↑                                   ↓
//!                          └── web / timer / worker completions ┘
//! ```
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Quiescence tracking for direct-mode keystrokes
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Search mode and input routing
//! - [`state`]: Application context and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchMode};
pub use state::{AppState, Endpoints, Results};
