//! Viewport-size oracle contracts.
//!
//! The window manager asks the oracle for the current surface size on every clamp instead of
//! caching it, so a resize of the containing surface affects the very next move or resize.

use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Size of the surface windows are laid out on, in integer pixels.
pub struct Viewport {
    /// Surface width.
    pub width: i32,
    /// Surface height, including the taskbar strip.
    pub height: i32,
}

impl Viewport {
    /// Creates a viewport of the given size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

/// Host service reporting the current viewport size.
pub trait ViewportOracle {
    /// Returns the viewport size at the time of the call.
    fn viewport(&self) -> Viewport;
}

impl<O: ViewportOracle + ?Sized> ViewportOracle for Rc<O> {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Oracle that always reports the same size.
pub struct FixedViewport(pub Viewport);

impl ViewportOracle for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
/// Host-updatable oracle; clones share the same cell.
///
/// Hosts without a direct size query (or tests) push resize notifications through
/// [`SharedViewport::set`].
pub struct SharedViewport {
    inner: Rc<Cell<Viewport>>,
}

impl SharedViewport {
    /// Creates a shared oracle seeded with `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(Cell::new(viewport)),
        }
    }

    /// Records a new surface size.
    pub fn set(&self, viewport: Viewport) {
        self.inner.set(viewport);
    }
}

impl ViewportOracle for SharedViewport {
    fn viewport(&self) -> Viewport {
        self.inner.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_viewport_updates_are_visible_through_clones() {
        let oracle = SharedViewport::new(Viewport::new(1280, 800));
        let handle = oracle.clone();
        handle.set(Viewport::new(300, 200));
        assert_eq!(oracle.viewport(), Viewport::new(300, 200));
    }

    #[test]
    fn fixed_viewport_reports_its_size() {
        let oracle: Rc<dyn ViewportOracle> = Rc::new(FixedViewport(Viewport::new(800, 600)));
        assert_eq!(oracle.viewport(), Viewport::new(800, 600));
    }
}
