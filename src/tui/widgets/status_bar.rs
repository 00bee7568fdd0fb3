use ratatui::{layout::Rect, prelude::*, widgets::Paragraph};

use crate::listing::Record;
use crate::tui::colors::{ERROR_COLOR, STATUS_BAR_BG, STATUS_BAR_FG};
use crate::tui::state::AppState;

pub fn render_status_bar<R: Record>(frame: &mut Frame, area: Rect, state: &AppState<R>) {
    // Search input takes over the bar while typing
    if state.search.active {
        let text = format!("/{}", state.search.query);
        let bar = Paragraph::new(text).style(Style::default().bg(STATUS_BAR_BG).fg(STATUS_BAR_FG));
        frame.render_widget(bar, area);
        return;
    }

    let left = match state.status_message {
        Some(ref message) => message.clone(),
        None => format!("[{}]", state.kind),
    };
    let hints = "Space:select  a:all  /:search  f:filter  s:status  D:delete  e:export  Tab:switch  ?:help";

    let width = area.width as usize;
    let status_text = if left.len() + hints.len() + 1 <= width {
        format!("{:width$}{}", left, hints, width = width - hints.len())
    } else {
        left
    };

    let style = if state.status_is_error {
        Style::default().bg(ERROR_COLOR).fg(STATUS_BAR_FG)
    } else {
        Style::default().bg(STATUS_BAR_BG).fg(STATUS_BAR_FG)
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
