//! Detail panel state machine.
//!
//! At most one detail view is open at a time. Selecting a record always
//! builds a fresh projection and supersedes whatever was open; no residual
//! state carries over between records. Dismissal comes from the close
//! button, from a pointer interaction outside the panel's own bounds, or
//! from a native dismiss event.

use crate::view::view_models::DetailViewModel;

/// Screen-space bounds of the open panel, for the outside-pointer test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PanelBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// A dismissal attempt reaching the open panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissSignal {
    /// The explicit close control.
    CloseButton,
    /// A pointer interaction within the modal's click target; only closes
    /// when it lands outside the panel bounds.
    Pointer { x: f64, y: f64 },
    /// A native dismiss event (e.g. escape key closing the dialog).
    Native,
}

/// Detail visibility: closed, or open on one fresh projection.
#[derive(Debug, Clone, Default)]
pub enum DetailPanel {
    #[default]
    Closed,
    Open(DetailViewModel),
}

impl DetailPanel {
    pub fn is_open(&self) -> bool {
        matches!(self, DetailPanel::Open(_))
    }

    /// The projection currently shown, if any.
    pub fn current(&self) -> Option<&DetailViewModel> {
        match self {
            DetailPanel::Closed => None,
            DetailPanel::Open(projection) => Some(projection),
        }
    }

    /// Open on a fresh projection, superseding any open panel.
    pub fn select(&mut self, projection: DetailViewModel) {
        *self = DetailPanel::Open(projection);
    }

    /// Apply a dismissal signal. Returns true when the panel closed.
    /// Pointer interactions inside the panel bounds keep it open.
    pub fn dismiss(&mut self, signal: DismissSignal, bounds: &PanelBounds) -> bool {
        if !self.is_open() {
            return false;
        }
        let should_close = match signal {
            DismissSignal::CloseButton | DismissSignal::Native => true,
            DismissSignal::Pointer { x, y } => !bounds.contains(x, y),
        };
        if should_close {
            *self = DetailPanel::Closed;
        }
        should_close
    }
}
