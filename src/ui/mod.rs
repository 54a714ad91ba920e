//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Frame → stdout
//! ```
//!
//! - [`viewmodel`]: Display-ready UI state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Component renderers
//! - [`helpers`]: Frame buffer and text highlighting
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{BodyView, DisplayItem, FooterInfo, HeaderInfo, InputBoxInfo, SettingsInfo, TabInfo, UIViewModel};
