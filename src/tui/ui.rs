use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::colors::{status_color, ERROR_COLOR, HEADER_COLOR, HELP_TEXT};
use super::state::{AppState, StatusMenuState};
use super::widgets::{render_filter_bar, render_filter_dialog, render_list_table, render_status_bar};
use crate::listing::Record;
use crate::logging::log_file_path;

/// Main render function
pub fn render<R: Record>(frame: &mut Frame, state: &mut AppState<R>) {
    let size = frame.area();

    // Filter bar on top, status bar at bottom, table in between
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    render_filter_bar(frame, chunks[0], state);
    render_list_table(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);

    if let Some(ref dialog) = state.filter_dialog {
        render_filter_dialog(frame, size, dialog);
    }

    if let Some(ref menu) = state.status_menu {
        render_status_menu::<R>(frame, size, menu, state.view.selection().len());
    }

    if let Some(count) = state.confirm_delete {
        render_confirm_delete(frame, size, count);
    }

    if state.show_help {
        render_help_overlay(frame, size);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_status_menu<R: Record>(frame: &mut Frame, area: Rect, menu: &StatusMenuState, selected: usize) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" Set status on {} record(s)", selected),
            Style::default().fg(HELP_TEXT),
        )),
        Line::from(""),
    ];

    for (i, status) in menu.options.iter().enumerate() {
        let label = R::describe_value("status", status);
        if i == menu.selected {
            lines.push(Line::from(vec![
                Span::styled(" ▸ ", Style::default().fg(Color::Cyan)),
                Span::styled(label, Style::default().bg(Color::Cyan).fg(Color::Black)),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(label, Style::default().fg(status_color(status))),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter: apply  s/Esc: cancel",
        Style::default().fg(HELP_TEXT),
    )));

    let dialog_area = centered(area, 40, menu.options.len() as u16 + 6);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Change status ")
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
}

fn render_confirm_delete(frame: &mut Frame, area: Rect, count: usize) {
    let lines = vec![
        Line::from(""),
        Line::from(format!(" Delete {} selected record(s)?", count)),
        Line::from(""),
        Line::from(Span::styled(" y: delete  n/Esc: cancel", Style::default().fg(HELP_TEXT))),
    ];

    let dialog_area = centered(area, 40, 6);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR_COLOR))
        .title(" Confirm ");

    frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let mut help_text = String::from(
        r#"
  Key Bindings

  Navigation:
    j/↓      Move down
    k/↑      Move up
    Tab      Switch content/websites

  Selection:
    Space    Toggle row
    a        Toggle all visible rows

  Filters:
    /        Search (Enter keep, Esc clear)
    f        Filter dialog
    1-9      Remove nth filter chip
    x        Clear all filters

  Bulk actions:
    s        Change status
    D        Delete (asks first)
    e        Export selection or list

    ?        Toggle help
    q        Quit
"#,
    );
    if let Some(path) = log_file_path() {
        help_text.push_str(&format!("\n  Log: {}\n", path.display()));
    }

    let help_area = centered(area, 60, 28);

    // Clear the area behind the popup
    frame.render_widget(Clear, help_area);

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    frame.render_widget(help, help_area);
}
