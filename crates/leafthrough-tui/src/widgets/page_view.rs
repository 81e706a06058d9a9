use ratatui::{
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::{layout_document, DocumentLayout};

pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let title = format!(" {} ", app.location);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.dim))
            .style(Style::default().bg(app.theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Lines must be pre-wrapped so regions line up with what is drawn
        let layout = layout_document(&app.page, inner.width, app.focused(), &app.theme);
        let DocumentLayout { lines, regions } = layout;
        let content_height = lines.len();
        let offset = app.update_scroll(content_height, inner.height);
        app.set_rendered_view(regions, inner, offset, content_height);

        let paragraph = Paragraph::new(Text::from(lines)).scroll((offset, 0));
        frame.render_widget(paragraph, inner);
    }
}
