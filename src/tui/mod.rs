pub mod event;
pub mod layout;
pub mod window;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::Result;
use crate::config::Config;
use crate::domain::{NewsCollection, ScreenSize};
use crate::overlay::{LinkOpener, OverlayController, SystemLinkOpener};
use crate::store::PositionStore;

use self::event::{Action, AppEvent, EventHandler};
use self::window::{Hit, TerminalWindow};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Longest wait for input when no timer is pending.
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Keyboard resize step in columns and rows.
const RESIZE_STEP: (i32, i32) = (2, 1);

/// Run the overlay until it is dismissed. Blocks the calling thread.
pub fn run<S>(items: NewsCollection, store: S, config: &Config) -> Result<()>
where
    S: PositionStore,
{
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, items, store, config);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<S>(terminal: &mut Tui, items: NewsCollection, store: S, config: &Config) -> Result<()>
where
    S: PositionStore,
{
    let size = terminal.size()?;
    let window = TerminalWindow::new(ScreenSize::new(size.width as i32, size.height as i32));
    let mut controller = OverlayController::new(
        items,
        window,
        store,
        SystemLinkOpener,
        config.overlay.settings(),
        Instant::now(),
    )?;
    let event_handler = EventHandler::new(IDLE_TICK);

    loop {
        controller.run_due(Instant::now());
        if controller.is_closed() {
            break;
        }

        terminal.draw(|frame| layout::render(frame, controller.window_mut(), &config.colors))?;

        let timeout = controller
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_TICK);

        match event_handler.next(timeout)? {
            AppEvent::Key(key) => match config.keybindings.get_action(&key) {
                Action::Next => controller.next(),
                Action::Dismiss => controller.on_dismiss(),
                Action::OpenLink => controller.open_current_link(),
                Action::ScrollUp => controller.on_scroll(-1),
                Action::ScrollDown => controller.on_scroll(1),
                Action::Grow => controller.resize_by(RESIZE_STEP.0, RESIZE_STEP.1),
                Action::Shrink => controller.resize_by(-RESIZE_STEP.0, -RESIZE_STEP.1),
                Action::None => {}
            },
            AppEvent::Mouse(mouse) => handle_mouse(&mut controller, mouse),
            AppEvent::Resize(width, height) => handle_screen_resize(&mut controller, width, height),
            AppEvent::Tick => {}
        }
    }

    Ok(())
}

/// Keep the current size (user-chosen or not), shrinking only what no longer
/// fits the new screen.
fn handle_screen_resize<S, L>(
    controller: &mut OverlayController<TerminalWindow, S, L>,
    width: u16,
    height: u16,
) where
    S: PositionStore,
    L: LinkOpener,
{
    let screen = ScreenSize::new(width as i32, height as i32);
    let (current_width, current_height) = controller.geometry().size();
    let new_width = current_width.min(screen.width);
    let new_height = current_height.min(screen.height);

    let window = controller.window_mut();
    window.set_screen(screen);
    window.resize(new_width, new_height);
    controller.on_resize(new_width, new_height);
    controller.refresh_screen();
}

fn handle_mouse<S, L>(controller: &mut OverlayController<TerminalWindow, S, L>, mouse: MouseEvent)
where
    S: PositionStore,
    L: LinkOpener,
{
    let (x, y) = (mouse.column as i32, mouse.row as i32);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match controller.window().hit(mouse.column, mouse.row) {
                Hit::Outside => return,
                Hit::Arrow => controller.next(),
                Hit::Link => controller.open_current_link(),
                Hit::Body => {}
            }
            controller.on_pointer_press(x, y);
        }
        MouseEventKind::Drag(MouseButton::Left) => controller.on_pointer_move(x, y),
        MouseEventKind::Up(MouseButton::Left) => controller.on_pointer_release(),
        MouseEventKind::ScrollDown => controller.on_scroll(1),
        MouseEventKind::ScrollUp => controller.on_scroll(-1),
        _ => {}
    }
}
