//! Projection layer: view models, builders, and the detail panel state.

pub mod modal;
pub mod view_builder;
pub mod view_models;

pub use modal::{DetailPanel, DismissSignal, PanelBounds};
pub use view_builder::{build_card, build_detail, build_grid};
pub use view_models::{CardViewModel, DetailViewModel, GridViewModel};
