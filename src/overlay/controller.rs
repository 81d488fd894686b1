use std::time::{Duration, Instant};

use crate::app::{Result, TickerError};
use crate::domain::{NewsCollection, NewsItem, Position, ScreenSize, WindowGeometry};
use crate::overlay::fade::{FadePlan, TimerQueue};
use crate::overlay::window::{LinkOpener, OverlayWindow};
use crate::store::PositionStore;

/// Smallest size keyboard resizing will shrink to.
pub const MIN_WIDTH: i32 = 10;
pub const MIN_HEIGHT: i32 = 5;

/// Window size as a fraction of the screen, bounded on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct SizePolicy {
    pub width_ratio: f32,
    pub height_ratio: f32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            width_ratio: 0.36,
            height_ratio: 0.35,
            min_width: 40,
            max_width: 90,
            min_height: 12,
            max_height: 30,
        }
    }
}

impl SizePolicy {
    /// Never larger than the screen itself.
    pub fn size_for(&self, screen: ScreenSize) -> (i32, i32) {
        let width = ((screen.width as f32 * self.width_ratio) as i32)
            .min(self.max_width)
            .max(self.min_width);
        let height = ((screen.height as f32 * self.height_ratio) as i32)
            .min(self.max_height)
            .max(self.min_height);
        (
            width.min(screen.width).max(1),
            height.min(screen.height).max(1),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    pub size: SizePolicy,
    pub fade: FadePlan,
    /// Opacity outside of a fade.
    pub opacity: f32,
    /// How long the window stays hidden after construction.
    pub reveal_delay: Duration,
    /// Body lines scrolled per wheel notch.
    pub scroll_step: i32,
    /// Title wrap width is the window width minus this.
    pub wrap_padding: i32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            size: SizePolicy::default(),
            fade: FadePlan::default(),
            opacity: 0.97,
            reveal_delay: Duration::from_millis(500),
            scroll_step: 3,
            wrap_padding: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Idle,
    Dragging,
    Fading,
    Closed,
}

/// Pointer and window origin captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub start_pointer: Position,
    pub start_window: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    pub current_index: usize,
    pub geometry: WindowGeometry,
    pub drag: Option<DragSession>,
    pub fade_in_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Task {
    Reveal,
    SetOpacity(f32),
    FadeComplete,
}

/// The overlay state machine.
///
/// Owns every piece of mutable overlay state and is driven from a single
/// event loop: gesture handlers run to completion, and deferred work (reveal,
/// fade steps) sits in a timer queue drained by [`run_due`](Self::run_due).
/// Time only advances through `run_due`, so new timers are scheduled relative
/// to the instant it last saw.
pub struct OverlayController<W, S, L> {
    items: NewsCollection,
    state: OverlayState,
    screen: ScreenSize,
    settings: OverlaySettings,
    timers: TimerQueue<Task>,
    now: Instant,
    visible: bool,
    closed: bool,
    window: W,
    store: S,
    links: L,
}

impl<W, S, L> OverlayController<W, S, L>
where
    W: OverlayWindow,
    S: PositionStore,
    L: LinkOpener,
{
    /// Place the window, schedule its reveal and show the first item.
    ///
    /// Fails with [`TickerError::NoContent`] when `items` is empty; nothing is
    /// done to the window in that case.
    pub fn new(
        items: NewsCollection,
        mut window: W,
        store: S,
        links: L,
        settings: OverlaySettings,
        now: Instant,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(TickerError::NoContent);
        }

        let screen = window.screen_size();
        let (width, height) = settings.size.size_for(screen);
        let origin = store.load(screen, width, height);
        let geometry = WindowGeometry::new(origin.x, origin.y, width, height);

        window.set_visible(false);
        window.set_opacity(settings.opacity);
        window.set_geometry(geometry);
        window.set_wrap_width(width - settings.wrap_padding);
        if !window.try_pin() {
            tracing::debug!("Window pinning unavailable, continuing unpinned");
        }

        let mut controller = Self {
            items,
            state: OverlayState {
                current_index: 0,
                geometry,
                drag: None,
                fade_in_progress: false,
            },
            screen,
            timers: TimerQueue::new(),
            now,
            visible: false,
            closed: false,
            window,
            store,
            links,
            settings,
        };

        controller
            .timers
            .schedule(now + controller.settings.reveal_delay, Task::Reveal);
        controller.show_item(0);
        Ok(controller)
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn items(&self) -> &NewsCollection {
        &self.items
    }

    pub fn current_item(&self) -> Option<&NewsItem> {
        self.items.get(self.state.current_index)
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.state.geometry
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn phase(&self) -> Phase {
        if self.closed {
            Phase::Closed
        } else if !self.visible {
            Phase::Hidden
        } else if self.state.drag.is_some() {
            Phase::Dragging
        } else if self.state.fade_in_progress {
            Phase::Fading
        } else {
            Phase::Idle
        }
    }

    /// When the next deferred task is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Advance the clock to `now` and run every task due by then.
    pub fn run_due(&mut self, now: Instant) {
        self.now = self.now.max(now);
        while let Some(task) = self.timers.pop_due(self.now) {
            match task {
                Task::Reveal => {
                    self.visible = true;
                    self.window.set_visible(true);
                }
                Task::SetOpacity(opacity) => self.window.set_opacity(opacity),
                Task::FadeComplete => {
                    self.state.fade_in_progress = false;
                    self.window.set_opacity(self.settings.opacity);
                }
            }
        }
    }

    /// Display the item at `index`. Out-of-range indices are ignored.
    pub fn show_item(&mut self, index: usize) {
        if self.closed {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };

        self.state.current_index = index;
        self.window.set_content(item);
        self.start_fade();
    }

    /// Start the opacity ramp unless one is already running.
    pub fn start_fade(&mut self) {
        if self.closed || self.state.fade_in_progress {
            return;
        }
        self.state.fade_in_progress = true;

        for step in self.settings.fade.steps() {
            self.timers
                .schedule(self.now + step.delay, Task::SetOpacity(step.opacity));
        }
        self.timers.schedule(
            self.now + self.settings.fade.completion_delay(),
            Task::FadeComplete,
        );
    }

    /// Advance to the following item, wrapping after the last.
    pub fn next(&mut self) {
        if let Some(index) = self.items.next_index(self.state.current_index) {
            self.show_item(index);
        }
    }

    pub fn on_pointer_press(&mut self, x: i32, y: i32) {
        if self.closed {
            return;
        }
        self.state.drag = Some(DragSession {
            start_pointer: Position::new(x, y),
            start_window: self.state.geometry.position(),
        });
    }

    pub fn on_pointer_move(&mut self, x: i32, y: i32) {
        let Some(drag) = self.state.drag else {
            return;
        };

        let geometry = self.state.geometry;
        let origin = self.screen.clamp_origin(
            drag.start_window.x + (x - drag.start_pointer.x),
            drag.start_window.y + (y - drag.start_pointer.y),
            geometry.width,
            geometry.height,
        );

        if origin != geometry.position() {
            self.state.geometry.x = origin.x;
            self.state.geometry.y = origin.y;
            self.window.set_position(origin);
        }
    }

    /// End the drag and persist the resulting position.
    pub fn on_pointer_release(&mut self) {
        if self.state.drag.take().is_some() {
            self.store.save(&self.state.geometry);
        }
    }

    /// React to the window having been resized to `width` x `height`.
    pub fn on_resize(&mut self, width: i32, height: i32) {
        if self.closed || (width, height) == self.state.geometry.size() {
            return;
        }

        self.state.geometry.width = width;
        self.state.geometry.height = height;
        self.screen = self.window.screen_size();
        self.window.set_wrap_width(width - self.settings.wrap_padding);
        self.reclamp();
        self.store.save(&self.state.geometry);
    }

    /// Re-query the screen after it changed size and keep the window on it.
    pub fn refresh_screen(&mut self) {
        if self.closed {
            return;
        }
        self.screen = self.window.screen_size();
        if self.reclamp() {
            self.store.save(&self.state.geometry);
        }
    }

    /// Grow or shrink by the given deltas, bounded by the screen.
    pub fn resize_by(&mut self, dw: i32, dh: i32) {
        let (width, height) = self.state.geometry.size();
        let screen = self.window.screen_size();
        let width = (width + dw).min(screen.width).max(MIN_WIDTH);
        let height = (height + dh).min(screen.height).max(MIN_HEIGHT);
        self.window.set_geometry(WindowGeometry {
            width,
            height,
            ..self.state.geometry
        });
        self.on_resize(width, height);
    }

    /// Scroll the body by `delta` wheel notches; positive scrolls down.
    pub fn on_scroll(&mut self, delta: i32) {
        if self.closed || delta == 0 {
            return;
        }
        self.window.scroll_body(delta * self.settings.scroll_step);
    }

    pub fn open_current_link(&self) {
        if let Some(item) = self.current_item().filter(|item| item.has_link()) {
            self.links.open(&item.link);
        }
    }

    pub fn on_dismiss(&mut self) {
        if self.closed {
            return;
        }
        self.store.save(&self.state.geometry);
        self.timers.clear();
        self.state.drag = None;
        self.state.fade_in_progress = false;
        self.closed = true;
        self.window.close();
    }

    /// Clamp the origin into the current screen; true if it moved.
    fn reclamp(&mut self) -> bool {
        let clamped = self.state.geometry.clamped(self.screen);
        if clamped == self.state.geometry {
            return false;
        }
        self.state.geometry = clamped;
        self.window.set_position(clamped.position());
        true
    }
}
