use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(" {}", app.location)
        };

        let help_hint = " q:quit tab:focus enter:open backspace:back r:reload ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(app.theme.status_fg)
                    .bg(app.theme.status_bg),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(app.theme.status_bg),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(app.theme.dim).bg(app.theme.status_bg),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
