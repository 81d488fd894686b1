use serde::{Deserialize, Serialize};

/// Usable screen area the window is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamp a top-left origin so a `width` x `height` window stays on screen.
    ///
    /// When the window is larger than the screen the origin pins to 0.
    pub fn clamp_origin(&self, x: i32, y: i32, width: i32, height: i32) -> Position {
        let max_x = (self.width - width).max(0);
        let max_y = (self.height - height).max(0);
        Position {
            x: x.clamp(0, max_x),
            y: y.clamp(0, max_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window position and size in screen units, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Same size, origin clamped into `screen`.
    pub fn clamped(self, screen: ScreenSize) -> Self {
        let pos = screen.clamp_origin(self.x, self.y, self.width, self.height);
        Self {
            x: pos.x,
            y: pos.y,
            ..self
        }
    }
}
