//! Interactive terminal UI.
//!
//! `model` holds the pure state machine (actions, keymap, reducer) so the
//! grid behavior stays unit-testable without a terminal; `browse` is the
//! iocraft component that wires it to rendering and data loading.

mod browse;
mod model;
mod theme;

pub use browse::{BrowseGrid, BrowseGridProps};
pub use model::Tab;
pub use theme::theme;
