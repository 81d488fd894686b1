pub mod json;

use std::cell::{Cell, RefCell};

use crate::domain::{Position, ScreenSize, WindowGeometry};

pub use json::JsonPositionStore;

/// Offsets of the default placement from the right and bottom screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn new(right: i32, bottom: i32) -> Self {
        Self { right, bottom }
    }

    /// Bottom-right placement for a `width` x `height` window.
    pub fn default_position(&self, screen: ScreenSize, width: i32, height: i32) -> Position {
        Position::new(
            screen.width - width - self.right,
            screen.height - height - self.bottom,
        )
    }
}

/// Best-effort persistence of the overlay geometry.
///
/// Neither operation reports failure: `load` falls back to the default
/// placement and `save` gives up silently.
pub trait PositionStore {
    /// Persisted origin clamped into `screen` for a window of the given size.
    fn load(&self, screen: ScreenSize, width: i32, height: i32) -> Position;

    fn save(&self, geometry: &WindowGeometry);
}

impl<T: PositionStore + ?Sized> PositionStore for Box<T> {
    fn load(&self, screen: ScreenSize, width: i32, height: i32) -> Position {
        (**self).load(screen, width, height)
    }

    fn save(&self, geometry: &WindowGeometry) {
        (**self).save(geometry)
    }
}

/// Keeps the last saved geometry in memory only.
///
/// Used when no per-user config directory exists, and by tests.
#[derive(Debug)]
pub struct MemoryPositionStore {
    margins: Margins,
    saved: RefCell<Option<WindowGeometry>>,
    saves: Cell<usize>,
}

impl MemoryPositionStore {
    pub fn new(margins: Margins) -> Self {
        Self {
            margins,
            saved: RefCell::new(None),
            saves: Cell::new(0),
        }
    }

    pub fn with_saved(margins: Margins, geometry: WindowGeometry) -> Self {
        let store = Self::new(margins);
        store.saved.replace(Some(geometry));
        store
    }

    pub fn saved(&self) -> Option<WindowGeometry> {
        *self.saved.borrow()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl PositionStore for MemoryPositionStore {
    fn load(&self, screen: ScreenSize, width: i32, height: i32) -> Position {
        let pos = self
            .saved()
            .map(|g| g.position())
            .unwrap_or_else(|| self.margins.default_position(screen, width, height));
        screen.clamp_origin(pos.x, pos.y, width, height)
    }

    fn save(&self, geometry: &WindowGeometry) {
        self.saved.replace(Some(*geometry));
        self.saves.set(self.saves.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position_bottom_right() {
        let margins = Margins::new(30, 60);
        let screen = ScreenSize::new(1920, 1080);
        assert_eq!(
            margins.default_position(screen, 600, 380),
            Position::new(1290, 640)
        );
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryPositionStore::new(Margins::new(2, 1));
        let screen = ScreenSize::new(100, 40);
        assert_eq!(store.load(screen, 30, 10), Position::new(68, 29));

        store.save(&WindowGeometry::new(5, 6, 30, 10));
        assert_eq!(store.load(screen, 30, 10), Position::new(5, 6));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_clamps_saved_position() {
        let store = MemoryPositionStore::with_saved(
            Margins::new(2, 1),
            WindowGeometry::new(500, -4, 30, 10),
        );
        assert_eq!(store.load(ScreenSize::new(100, 40), 30, 10), Position::new(70, 0));
    }
}
