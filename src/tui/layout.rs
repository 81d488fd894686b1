use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::colors::blend;
use crate::config::ColorConfig;
use crate::tui::window::TerminalWindow;

/// Most rows the title may take before the body gets the rest.
const MAX_TITLE_LINES: u16 = 3;

pub fn render(frame: &mut Frame, window: &mut TerminalWindow, colors: &ColorConfig) {
    let area = window.area().intersection(frame.area());
    let Some(item) = window.content().filter(|_| window.is_visible()).cloned() else {
        window.set_layout(None, None, 0);
        return;
    };
    if area.width < 3 || area.height < 3 {
        window.set_layout(None, None, 0);
        return;
    }

    let opacity = window.opacity();
    let base = Style::default().bg(colors.background);
    let fg = |color| base.fg(blend(color, colors.background, opacity));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(fg(colors.border))
        .style(base);
    let inner = block.inner(area).inner(Margin {
        horizontal: 1,
        vertical: 0,
    });

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let title_width = (inner.width as i32).min(window.wrap_width()).max(1) as u16;
    let title = Paragraph::new(item.title.as_str())
        .style(fg(colors.title).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true });
    let title_lines = (title.line_count(title_width) as u16).clamp(1, MAX_TITLE_LINES);

    let [title_area, source_area, body_area, link_area, arrow_area] = Layout::vertical([
        Constraint::Length(title_lines),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        title,
        Rect {
            width: title_width.min(title_area.width),
            ..title_area
        },
    );

    frame.render_widget(
        Paragraph::new(item.source.as_str()).style(fg(colors.source)),
        source_area,
    );

    let body = Paragraph::new(item.summary.as_str())
        .style(fg(colors.body))
        .wrap(Wrap { trim: false });
    // Rows as the word wrapper lays them out, not characters / width.
    let rows = body.line_count(body_area.width.max(1));
    let max_scroll = u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(body_area.height);
    frame.render_widget(body.scroll((window.scroll().min(max_scroll), 0)), body_area);

    frame.render_widget(
        Paragraph::new(item.link.as_str()).style(fg(colors.link).add_modifier(Modifier::UNDERLINED)),
        link_area,
    );

    frame.render_widget(
        Paragraph::new("↓")
            .style(fg(colors.arrow))
            .alignment(Alignment::Center),
        arrow_area,
    );

    let link = item.has_link().then_some(link_area);
    window.set_layout(link, Some(arrow_area), max_scroll);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::domain::{NewsItem, ScreenSize, WindowGeometry};
    use crate::overlay::OverlayWindow;
    use crate::tui::window::Hit;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn visible_window(item: &NewsItem) -> TerminalWindow {
        let mut window = TerminalWindow::new(ScreenSize::new(80, 24));
        window.set_geometry(WindowGeometry::new(30, 8, 44, 12));
        window.set_wrap_width(40);
        window.set_content(item);
        window.set_visible(true);
        window
    }

    #[test]
    fn test_render_item() {
        let item = NewsItem::new(
            "Markets rally",
            "Stocks rose sharply on Tuesday.",
            "https://example.com/markets",
            "Business Daily",
        );
        let mut window = visible_window(&item);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Markets rally"));
        assert!(text.contains("Business Daily"));
        assert!(text.contains("Stocks rose sharply"));
        assert!(text.contains("https://example.com/markets"));
        assert!(text.contains("↓"));
    }

    #[test]
    fn test_render_records_hit_regions() {
        let item = NewsItem::new("Title", "Body", "https://example.com", "Source");
        let mut window = visible_window(&item);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();

        // Bottom border at row 19, arrow just above it, link above that
        assert_eq!(window.hit(50, 18), Hit::Arrow);
        assert_eq!(window.hit(50, 17), Hit::Link);
        assert_eq!(window.hit(50, 12), Hit::Body);
    }

    #[test]
    fn test_hidden_window_draws_nothing() {
        let item = NewsItem::new("Invisible", "", "", "Source");
        let mut window = visible_window(&item);
        window.set_visible(false);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();

        assert!(!buffer_text(&terminal).contains("Invisible"));
    }

    #[test]
    fn test_long_body_is_scrollable() {
        let summary = (0..40).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let item = NewsItem::new("Title", summary, "", "Source");
        let mut window = visible_window(&item);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();
        window.scroll_body(3);
        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(!text.contains("line 0 "));
        assert!(text.contains("line 3"));
    }

    #[test]
    fn test_scroll_reaches_end_of_word_wrapped_body() {
        // 20-character words: one per 40-column row, far more rows than
        // the character count alone suggests.
        let words: Vec<String> = (0..30).map(|i| format!("{:020}", i)).collect();
        let item = NewsItem::new("Title", words.join(" "), "", "Source");
        let mut window = visible_window(&item);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();
        window.scroll_body(1000);
        terminal
            .draw(|frame| render(frame, &mut window, &ColorConfig::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(words.last().unwrap().as_str()));
        assert!(!text.contains(words[0].as_str()));
        // Body is 6 rows tall, so the last 6 of 30 rows are showing
        assert_eq!(window.scroll(), 24);
    }
}
