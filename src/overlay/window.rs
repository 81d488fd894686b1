use crate::domain::{NewsItem, Position, ScreenSize, WindowGeometry};

/// What the controller needs from a windowing toolkit.
///
/// Implementations draw a borderless, topmost surface. All calls are made
/// from the event loop thread.
pub trait OverlayWindow {
    fn screen_size(&self) -> ScreenSize;

    fn set_geometry(&mut self, geometry: WindowGeometry);

    /// Move without resizing.
    fn set_position(&mut self, position: Position);

    fn set_opacity(&mut self, opacity: f32);

    fn set_visible(&mut self, visible: bool);

    /// Replace the displayed item. The body viewport returns to the top.
    fn set_content(&mut self, item: &NewsItem);

    /// Width at which the title wraps.
    fn set_wrap_width(&mut self, width: i32);

    /// Scroll the body by `lines` (positive moves toward the end).
    fn scroll_body(&mut self, lines: i32);

    /// Platform-specific z-order raise. Returns whether it took effect.
    fn try_pin(&mut self) -> bool {
        false
    }

    fn close(&mut self);
}

/// Hands a URL to the desktop's default handler.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Opens links with the system handler, without waiting for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) {
        if let Err(e) = open::that_detached(url) {
            tracing::warn!("Failed to open {}: {}", url, e);
        }
    }
}
