use ratatui::{layout::Rect, prelude::*, widgets::Paragraph};

use crate::listing::Record;
use crate::tui::colors::{styled_chip, HELP_TEXT, SELECTED_COLOR, WARNING_COLOR};
use crate::tui::state::AppState;

/// Two lines above the table: active chips, then the result summary
pub fn render_filter_bar<R: Record>(frame: &mut Frame, area: Rect, state: &AppState<R>) {
    let chips = state.view.chips();

    let mut chip_spans = vec![Span::styled("Filters: ", Style::default().fg(HELP_TEXT))];
    if chips.is_empty() {
        chip_spans.push(Span::styled("none", Style::default().fg(HELP_TEXT)));
    } else {
        for (i, chip) in chips.iter().enumerate() {
            if i > 0 {
                chip_spans.push(Span::raw("  "));
            }
            chip_spans.extend(styled_chip(i + 1, &chip.label));
        }
        chip_spans.push(Span::styled("  (1-9 remove, x clear all)", Style::default().fg(HELP_TEXT)));
    }

    let summary = state.view.summary();
    let mut summary_spans = vec![Span::raw(summary.to_string())];
    let selected = state.view.selection().len();
    if selected > 0 {
        summary_spans.push(Span::styled(
            format!("  {} selected", selected),
            Style::default().fg(SELECTED_COLOR).add_modifier(Modifier::BOLD),
        ));
    }
    if state.view.is_busy() {
        summary_spans.push(Span::styled("  working...", Style::default().fg(WARNING_COLOR)));
    }

    let text = vec![Line::from(chip_spans), Line::from(summary_spans)];
    frame.render_widget(Paragraph::new(text), area);
}
