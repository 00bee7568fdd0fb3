use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::colors::HELP_TEXT;
use crate::tui::state::{DimensionChoice, FilterDialogState};

pub fn render_filter_dialog(frame: &mut Frame, area: Rect, dialog: &FilterDialogState) {
    let popup_width = 60.min(area.width);
    let popup_height = (dialog.rows.len() as u16 * 2 + 4).min(area.height);
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter ")
        .padding(ratatui::widgets::Padding::horizontal(1));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(dialog.rows.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, row) in dialog.rows.iter().enumerate() {
        render_dimension_row(frame, chunks[i + 1], row, i == dialog.focus);
    }

    let help = Paragraph::new("j/k:row  h/l:value  0:clear  f/Esc:close")
        .style(Style::default().fg(HELP_TEXT));
    frame.render_widget(help, chunks[dialog.rows.len() + 1]);
}

fn render_dimension_row(frame: &mut Frame, area: Rect, row: &DimensionChoice, focused: bool) {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    // "Status: < Draft >"
    let value = row.value_label();
    let value_style = if focused {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<10}", format!("{}:", row.label)), label_style),
        Span::styled(format!("< {} >", value), value_style),
        Span::styled(
            format!("  {}/{}", row.selected + 1, row.options.len()),
            Style::default().fg(HELP_TEXT),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
