//! The overlay window realised as a floating panel over the terminal screen.

use ratatui::layout::Rect;

use crate::domain::{NewsItem, Position, ScreenSize, WindowGeometry};
use crate::overlay::OverlayWindow;

/// Part of the window under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Arrow,
    Link,
    Body,
    Outside,
}

/// Retained window model; `layout::render` draws it every frame.
#[derive(Debug, Clone)]
pub struct TerminalWindow {
    screen: ScreenSize,
    geometry: WindowGeometry,
    opacity: f32,
    visible: bool,
    closed: bool,
    content: Option<NewsItem>,
    wrap_width: i32,
    scroll: u16,
    max_scroll: u16,
    link_area: Option<Rect>,
    arrow_area: Option<Rect>,
}

impl TerminalWindow {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            geometry: WindowGeometry::new(0, 0, screen.width, screen.height),
            opacity: 1.0,
            visible: false,
            closed: false,
            content: None,
            wrap_width: screen.width,
            scroll: 0,
            max_scroll: 0,
            link_area: None,
            arrow_area: None,
        }
    }

    /// The terminal itself was resized.
    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Resize the panel, keeping its origin.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.closed
    }

    pub fn content(&self) -> Option<&NewsItem> {
        self.content.as_ref()
    }

    pub fn wrap_width(&self) -> i32 {
        self.wrap_width
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Panel area in terminal cells, clipped to the screen.
    pub fn area(&self) -> Rect {
        let clip = |origin: i32, len: i32, limit: i32| {
            let start = origin.clamp(0, limit.max(0));
            let end = (origin + len).clamp(start, limit.max(0));
            (start as u16, (end - start) as u16)
        };
        let (x, width) = clip(self.geometry.x, self.geometry.width, self.screen.width);
        let (y, height) = clip(self.geometry.y, self.geometry.height, self.screen.height);
        Rect::new(x, y, width, height)
    }

    /// Record where the last frame put the interactive rows and how far the
    /// body can scroll.
    pub fn set_layout(&mut self, link: Option<Rect>, arrow: Option<Rect>, max_scroll: u16) {
        self.link_area = link;
        self.arrow_area = arrow;
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let inside = |area: Option<Rect>| {
            area.is_some_and(|a| {
                column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
            })
        };

        if !self.is_visible() || !self.geometry.contains(column as i32, row as i32) {
            Hit::Outside
        } else if inside(self.arrow_area) {
            Hit::Arrow
        } else if inside(self.link_area) {
            Hit::Link
        } else {
            Hit::Body
        }
    }
}

impl OverlayWindow for TerminalWindow {
    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.geometry = geometry;
    }

    fn set_position(&mut self, position: Position) {
        self.geometry.x = position.x;
        self.geometry.y = position.y;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_content(&mut self, item: &NewsItem) {
        self.content = Some(item.clone());
        self.scroll = 0;
    }

    fn set_wrap_width(&mut self, width: i32) {
        self.wrap_width = width.max(1);
    }

    fn scroll_body(&mut self, lines: i32) {
        let target = (self.scroll as i32 + lines).clamp(0, self.max_scroll as i32);
        self.scroll = target as u16;
    }

    fn close(&mut self) {
        self.closed = true;
        self.visible = false;
    }
}
