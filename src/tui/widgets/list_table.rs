use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::listing::{ListStatus, Record};
use crate::tui::colors::{status_color, FOCUS_COLOR, HEADER_COLOR, HELP_TEXT, SELECTED_COLOR};
use crate::tui::state::AppState;

pub fn render_list_table<R: Record>(frame: &mut Frame, area: Rect, state: &mut AppState<R>) {
    let title = format!(" {} ({}) ", title_case(state.kind.as_str()), state.view.records().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(title);

    // Empty states replace the table entirely
    if let Some(message) = state.view.status().message() {
        let hint = match state.view.status() {
            ListStatus::NoMatches => "x: clear filters",
            ListStatus::NoData => "pressdesk import <path> <file> to load data",
            _ => "",
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(HEADER_COLOR))),
            Line::from(Span::styled(hint, Style::default().fg(HELP_TEXT))),
        ];
        frame.render_widget(Paragraph::new(text).centered().block(block), area);
        return;
    }

    let view = &state.view;
    let rows: Vec<Row> = view
        .visible()
        .into_iter()
        .map(|record| {
            let selected = view.selection().contains(record.id());
            let checkbox = if selected { "[x]" } else { "[ ]" };

            let mut cells = vec![
                Cell::from(checkbox),
                Cell::from(record.title().to_string()),
            ];
            for dimension in R::DIMENSIONS {
                let value = record.field(dimension.key).unwrap_or_default();
                let style = if dimension.key == "status" {
                    Style::default().fg(status_color(value))
                } else {
                    Style::default()
                };
                let label = record.field_label(dimension.key).unwrap_or_default();
                cells.push(Cell::from(label).style(style));
            }

            let row = Row::new(cells);
            if selected {
                row.style(Style::default().fg(SELECTED_COLOR))
            } else {
                row
            }
        })
        .collect();

    let mut header_cells = vec![
        Cell::from(view.header_state().marker()),
        Cell::from("Title"),
    ];
    header_cells.extend(R::DIMENSIONS.iter().map(|d| Cell::from(d.label)));
    let header = Row::new(header_cells)
        .style(
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let mut widths = vec![Constraint::Length(3), Constraint::Min(20)];
    widths.extend(R::DIMENSIONS.iter().map(|_| Constraint::Length(12)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(FOCUS_COLOR).fg(Color::Black));

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("websites"), "Websites");
        assert_eq!(title_case(""), "");
    }
}
