use crate::tui::app::{App, DeleteAffordance, Focus, LoadState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input + delete affordance
            Constraint::Min(0),    // Records
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_records(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let search_style = if app.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if app.focus == Focus::Search { "█" } else { "" };
    let title = if app.filter_pending() { "Search (filtering...)" } else { "Search" };
    let search = Paragraph::new(format!("{}{}", app.search.query, cursor))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(search_style);
    frame.render_widget(search, columns[0]);

    if app.delete_affordance() == DeleteAffordance::Visible {
        let delete = Paragraph::new(format!("d: delete {}", app.selection.len()))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(delete, columns[1]);
    }
}

fn draw_records(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title("Users");

    match app.load_state.clone() {
        LoadState::Loading => {
            let loading = Paragraph::new("Loading users...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, area);
        }
        LoadState::Failed(message) => {
            let text = vec![
                Line::from(Span::styled(
                    "Could not load users",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message),
                Line::from(""),
                Line::from("Press r to try again"),
            ];
            let failed = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
            frame.render_widget(failed, area);
        }
        LoadState::Loaded => {
            let App {
                visible,
                selection,
                rows,
                ..
            } = &mut *app;
            let items: Vec<ListItem> = visible
                .iter()
                .map(|record| ListItem::new(rows.row(record, selection.contains(record.id))))
                .collect();

            let highlight = if app.focus == Focus::List {
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let list = List::new(items).block(block).highlight_style(highlight);

            let mut list_state = ListState::default();
            if !app.visible.is_empty() {
                list_state.select(Some(app.cursor));
            }

            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer_text = match app.focus {
        Focus::Search => "SEARCH | type to filter | Tab/Esc: list | Ctrl+C: quit".to_string(),
        Focus::List => format!(
            "Showing: {}/{} | Selected: {} | Filter: {} | ↑↓/j/k: navigate | Space: check | /: search | ?: help | q: quit",
            app.visible.len(),
            app.base.len(),
            app.selection.len(),
            app.filter_mode()
        ),
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "User List - Keyboard Commands",
        "",
        "SEARCH BOX:",
        "  any key           Edit the query (filters after a short pause)",
        "  Tab / Esc / ↓     Move focus to the list",
        "",
        "LIST:",
        "  ↑↓ / j/k          Navigate up/down",
        "  Space / Enter     Check/uncheck user",
        "  d / Delete        Delete checked users",
        "  / / Tab           Move focus to the search box",
        "  r                 Reload after a failed fetch",
        "",
        "OTHER:",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(80, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::search::FilterMode;
    use crate::users::fetch::FetchError;
    use crate::users::models::Record;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn mounted_app(result: Result<Vec<Record>, FetchError>) -> App {
        let mut app = App::new(FilterMode::Full, Duration::from_millis(300));
        app.mount(std::sync::Arc::new(Unreachable));
        app.on_fetch_complete(result);
        app
    }

    struct Unreachable;

    impl crate::users::fetch::UserSource for Unreachable {
        fn fetch_users(&self) -> Result<Vec<Record>, FetchError> {
            Err(FetchError::Disconnected)
        }

        fn describe(&self) -> String {
            "unreachable".to_string()
        }
    }

    #[test]
    fn test_delete_affordance_only_drawn_with_selection() {
        let mut app = mounted_app(Ok(vec![
            Record::new(1, "Bret", "Sincere@april.biz"),
            Record::new(2, "Antonette", "Shanna@melissa.tv"),
        ]));

        let screen = render(&mut app);
        assert!(screen.contains("Bret"));
        assert!(screen.contains("Antonette"));
        assert!(!screen.contains("d: delete"));

        app.on_checkbox_toggle(2);
        let screen = render(&mut app);
        assert!(screen.contains("d: delete 1"));
        assert!(screen.contains("[x] Antonette"));
        assert!(screen.contains("[ ] Bret"));
    }

    #[test]
    fn test_failed_fetch_renders_error_state() {
        let mut app = mounted_app(Err(FetchError::Status(502)));

        let screen = render(&mut app);
        assert!(screen.contains("Could not load users"));
        assert!(screen.contains("502"));
        assert!(screen.contains("Press r to try again"));
    }

    #[test]
    fn test_redraw_reuses_unchanged_rows() {
        let mut app = mounted_app(Ok(vec![
            Record::new(1, "Bret", "Sincere@april.biz"),
            Record::new(2, "Antonette", "Shanna@melissa.tv"),
        ]));

        render(&mut app);
        app.on_checkbox_toggle(2);
        render(&mut app);
        render(&mut app);

        assert_eq!(app.rows.render_count(1), 1);
        assert_eq!(app.rows.render_count(2), 2);
    }
}
