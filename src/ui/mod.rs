//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshots of state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Component renderers and pane layout
//! - [`helpers`]: Cursor positioning, text fitting, boxes
//! - [`theme`]: Palettes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeSource};
pub use viewmodel::{BodyViewModel, EmptyState, FooterInfo, HeaderInfo, TableViewModel, UIViewModel};
