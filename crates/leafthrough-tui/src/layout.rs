//! Turns a page's element tree into terminal lines with clickable regions.
//!
//! Layout is recomputed from the page and viewport width on every draw, so
//! regions always describe what is actually on screen. Coordinates are in
//! document space; the caller applies the scroll offset when mapping clicks.

use leafthrough_core::page::{markup, ElementId, ElementKind, Page};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Gap between grid columns
const COLUMN_GAP: u16 = 2;

/// Screen extent of one element on one document line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub element: ElementId,
    /// Document line index, before scrolling
    pub line: usize,
    /// First column covered
    pub x0: u16,
    /// One past the last column covered
    pub x1: u16,
}

/// A laid-out document: styled lines plus the regions elements occupy
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    pub lines: Vec<Line<'static>>,
    pub regions: Vec<Region>,
}

impl DocumentLayout {
    /// Total document height in lines
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Find the element at a document position, if any
    pub fn hit(&self, line: usize, column: u16) -> Option<ElementId> {
        self.regions
            .iter()
            .find(|r| r.line == line && r.x0 <= column && column < r.x1)
            .map(|r| r.element)
    }
}

/// Lay out a page for a viewport of the given width
pub fn layout_document(
    page: &Page,
    width: u16,
    focused: Option<ElementId>,
    theme: &Theme,
) -> DocumentLayout {
    let mut builder = LayoutBuilder {
        page,
        theme,
        focused,
        width: width.max(20),
        lines: Vec::new(),
        regions: Vec::new(),
    };
    for &child in page.children(page.root()) {
        builder.block(child);
        builder.blank();
    }
    builder.finish()
}

struct LayoutBuilder<'a> {
    page: &'a Page,
    theme: &'a Theme,
    focused: Option<ElementId>,
    width: u16,
    lines: Vec<Line<'static>>,
    regions: Vec<Region>,
}

impl LayoutBuilder<'_> {
    fn block(&mut self, id: ElementId) {
        let element = self.page.get(id);
        if element.has_class(markup::VIEW_TOGGLE) {
            self.toolbar(id);
        } else if element.has_class(markup::ARTICLES) {
            self.articles(id);
        } else if element.has_class(markup::PAGINATION) {
            self.pagination(id);
        } else {
            match element.kind {
                ElementKind::Heading => self.heading(id),
                ElementKind::Anchor => self.link_line(id),
                ElementKind::Text => self.text_block(id),
                ElementKind::Container => {
                    for &child in self.page.children(id) {
                        self.block(child);
                    }
                }
            }
        }
    }

    /// View switcher as a single row of bracketed buttons
    fn toolbar(&mut self, container: ElementId) {
        let mut line = LineBuilder::new();
        let mut first = true;
        for &id in self.page.children(container) {
            let element = self.page.get(id);
            if !matches!(element.kind, ElementKind::Anchor) {
                continue;
            }
            if !first {
                line.text(" ", Style::default());
            }
            first = false;
            let mut style = if element.has_class(markup::ACTIVE) {
                Style::default()
                    .fg(self.theme.active)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.link)
            };
            if self.focused == Some(id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let label = format!("[ {} ]", element.text.as_deref().unwrap_or(""));
            line.link(id, label, style);
        }
        line.push(&mut self.lines, &mut self.regions);
    }

    /// Article cards, two columns in grid view, full width in list view
    fn articles(&mut self, container: ElementId) {
        let grid = self.page.get(container).has_class(markup::GRID_VIEW);
        let mut cards = Vec::new();
        for &child in self.page.children(container) {
            if matches!(self.page.get(child).kind, ElementKind::Container) {
                cards.push(child);
            } else {
                // Empty-state placeholder text
                self.text_block(child);
            }
        }
        if cards.is_empty() {
            return;
        }
        if grid {
            let col_width = (self.width.saturating_sub(COLUMN_GAP) / 2).max(10);
            for (row, pair) in cards.chunks(2).enumerate() {
                if row > 0 {
                    self.blank();
                }
                let left = self.card_lines(pair[0], col_width);
                let right = pair.get(1).map(|&id| self.card_lines(id, col_width));
                self.merge_row(left, right, col_width);
            }
        } else {
            for (i, &card) in cards.iter().enumerate() {
                if i > 0 {
                    self.blank();
                }
                let rendered = self.card_lines(card, self.width);
                self.append_card(rendered);
            }
        }
    }

    /// Pagination as a single row: prev link, current page, next link
    fn pagination(&mut self, container: ElementId) {
        let mut line = LineBuilder::new();
        let mut first = true;
        for &id in self.page.children(container) {
            if !first {
                line.text("  ", Style::default());
            }
            first = false;
            let element = self.page.get(id);
            match element.kind {
                ElementKind::Anchor => {
                    let mut style = if element.has_class(markup::DISABLED) {
                        Style::default().fg(self.theme.link_disabled)
                    } else {
                        Style::default().fg(self.theme.link)
                    };
                    if self.focused == Some(id) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    line.link(id, element.text.clone().unwrap_or_default(), style);
                }
                _ => {
                    line.text(
                        element.text.clone().unwrap_or_default(),
                        Style::default().fg(self.theme.fg0),
                    );
                }
            }
        }
        line.push(&mut self.lines, &mut self.regions);
    }

    fn heading(&mut self, id: ElementId) {
        let style = Style::default()
            .fg(self.theme.heading)
            .add_modifier(Modifier::BOLD);
        let text = self.page.get(id).text.clone().unwrap_or_default();
        for piece in wrap_text(&text, self.width as usize) {
            self.lines.push(Line::from(Span::styled(piece, style)));
        }
    }

    /// Standalone link such as the back link on article pages
    fn link_line(&mut self, id: ElementId) {
        let element = self.page.get(id);
        let mut style = Style::default().fg(self.theme.link);
        if self.focused == Some(id) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let text = element.text.clone().unwrap_or_default();
        for piece in wrap_text(&text, self.width as usize) {
            let w = text_width(&piece);
            self.regions.push(Region {
                element: id,
                line: self.lines.len(),
                x0: 0,
                x1: w.max(1),
            });
            self.lines.push(Line::from(Span::styled(piece, style)));
        }
    }

    fn text_block(&mut self, id: ElementId) {
        let element = self.page.get(id);
        let style = if element.has_class(markup::ERROR) {
            Style::default().fg(self.theme.error)
        } else if element.has_class(markup::TAGS) {
            Style::default().fg(self.theme.tags)
        } else if element.has_class(markup::ARTICLE_BODY) {
            Style::default().fg(self.theme.fg0)
        } else {
            Style::default().fg(self.theme.dim)
        };
        let text = element.text.clone().unwrap_or_default();
        for raw_line in text.lines() {
            if raw_line.trim().is_empty() {
                self.lines.push(Line::from(""));
                continue;
            }
            for piece in wrap_text(raw_line, self.width as usize) {
                self.lines.push(Line::from(Span::styled(piece, style)));
            }
        }
    }

    /// Render one card into relative lines for later placement
    fn card_lines(&self, card: ElementId, width: u16) -> RenderedCard {
        let mut out = RenderedCard {
            lines: Vec::new(),
            widths: Vec::new(),
            regions: Vec::new(),
        };
        for &child in self.page.children(card) {
            let element = self.page.get(child);
            match element.kind {
                ElementKind::Anchor => {
                    let mut style = Style::default()
                        .fg(self.theme.link)
                        .add_modifier(Modifier::UNDERLINED);
                    if self.focused == Some(child) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    let text = element.text.clone().unwrap_or_default();
                    for piece in wrap_text(&text, width as usize) {
                        let w = text_width(&piece);
                        out.regions.push((child, out.lines.len(), 0, w.max(1)));
                        out.widths.push(w);
                        out.lines.push(vec![Span::styled(piece, style)]);
                    }
                }
                _ => {
                    let style = if element.has_class(markup::TAGS) {
                        Style::default().fg(self.theme.tags)
                    } else {
                        Style::default().fg(self.theme.fg0)
                    };
                    let text = element.text.clone().unwrap_or_default();
                    for piece in wrap_text(&text, width as usize) {
                        out.widths.push(text_width(&piece));
                        out.lines.push(vec![Span::styled(piece, style)]);
                    }
                }
            }
        }
        out
    }

    /// Place a card at full width
    fn append_card(&mut self, card: RenderedCard) {
        let base = self.lines.len();
        for spans in card.lines {
            self.lines.push(Line::from(spans));
        }
        for (element, rel, x0, x1) in card.regions {
            self.regions.push(Region {
                element,
                line: base + rel,
                x0,
                x1,
            });
        }
    }

    /// Place a pair of cards side by side, padding the left column
    fn merge_row(&mut self, left: RenderedCard, right: Option<RenderedCard>, col_width: u16) {
        let base = self.lines.len();
        let height = left
            .lines
            .len()
            .max(right.as_ref().map_or(0, |r| r.lines.len()));
        for i in 0..height {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut used = 0;
            if let Some(line) = left.lines.get(i) {
                spans.extend(line.iter().cloned());
                used = left.widths[i];
            }
            if let Some(right_lines) = right.as_ref().map(|r| &r.lines) {
                if let Some(line) = right_lines.get(i) {
                    let pad = (col_width + COLUMN_GAP).saturating_sub(used);
                    spans.push(Span::raw(" ".repeat(pad as usize)));
                    spans.extend(line.iter().cloned());
                }
            }
            self.lines.push(Line::from(spans));
        }
        for (element, rel, x0, x1) in left.regions {
            self.regions.push(Region {
                element,
                line: base + rel,
                x0,
                x1,
            });
        }
        if let Some(right) = right {
            let shift = col_width + COLUMN_GAP;
            for (element, rel, x0, x1) in right.regions {
                self.regions.push(Region {
                    element,
                    line: base + rel,
                    x0: x0 + shift,
                    x1: x1 + shift,
                });
            }
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn finish(mut self) -> DocumentLayout {
        // Drop the trailing block separator
        if self.lines.last().map_or(false, |l| l.width() == 0) {
            self.lines.pop();
        }
        DocumentLayout {
            lines: self.lines,
            regions: self.regions,
        }
    }
}

/// One card rendered at a fixed width, lines relative to the card top
struct RenderedCard {
    lines: Vec<Vec<Span<'static>>>,
    widths: Vec<u16>,
    regions: Vec<(ElementId, usize, u16, u16)>,
}

/// Accumulates spans for a single line while tracking element extents
struct LineBuilder {
    spans: Vec<Span<'static>>,
    width: u16,
    pending: Vec<(ElementId, u16, u16)>,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            width: 0,
            pending: Vec::new(),
        }
    }

    fn text(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        self.width += text_width(&text);
        self.spans.push(Span::styled(text, style));
    }

    fn link(&mut self, id: ElementId, text: impl Into<String>, style: Style) {
        let text = text.into();
        let start = self.width;
        let end = start + text_width(&text).max(1);
        self.pending.push((id, start, end));
        self.text(text, style);
    }

    fn push(self, lines: &mut Vec<Line<'static>>, regions: &mut Vec<Region>) {
        let line = lines.len();
        for (element, x0, x1) in self.pending {
            regions.push(Region {
                element,
                line,
                x0,
                x1,
            });
        }
        lines.push(Line::from(self.spans));
    }
}

fn text_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text) as u16
}

/// Wrap text respecting unicode character widths (CJK = 2 columns)
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.lines() {
        if paragraph.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0;

        for ch in paragraph.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);

            if current_width + ch_width > max_width {
                if !current_line.is_empty() {
                    result.push(current_line);
                }
                current_line = String::new();
                current_width = 0;
            }

            current_line.push(ch);
            current_width += ch_width;
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafthrough_core::article::Article;
    use leafthrough_core::page::{Selector, ViewKind};

    fn sample_articles(n: usize) -> Vec<Article> {
        (1..=n as i64)
            .map(|id| Article {
                id,
                title: format!("Article {id}"),
                content: "Some body text for the article.".to_string(),
                tags: "one, two".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_index_layout_covers_every_anchor() {
        let articles = sample_articles(2);
        let page = markup::index_page(&articles, ViewKind::Grid, 1, 6);
        let layout = layout_document(&page, 80, None, &Theme::default());

        for id in page.select(&Selector::new().kind(ElementKind::Anchor)) {
            assert!(
                layout.regions.iter().any(|r| r.element == id),
                "no region for {id:?}"
            );
        }
    }

    #[test]
    fn test_hit_maps_position_to_element() {
        let articles = sample_articles(1);
        let page = markup::index_page(&articles, ViewKind::List, 1, 6);
        let layout = layout_document(&page, 80, None, &Theme::default());

        let link = page.select(&Selector::new().class(markup::ARTICLE_LINK))[0];
        let region = layout
            .regions
            .iter()
            .find(|r| r.element == link)
            .copied()
            .unwrap();
        assert_eq!(layout.hit(region.line, region.x0), Some(link));
        assert_eq!(layout.hit(region.line, region.x1), None);
        assert_eq!(layout.hit(layout.height() + 5, 0), None);
    }

    #[test]
    fn test_grid_view_shares_lines_between_columns() {
        let articles = sample_articles(2);
        let page = markup::index_page(&articles, ViewKind::Grid, 1, 6);
        let layout = layout_document(&page, 80, None, &Theme::default());

        let links = page.select(&Selector::new().class(markup::ARTICLE_LINK));
        let left = layout
            .regions
            .iter()
            .find(|r| r.element == links[0])
            .unwrap();
        let right = layout
            .regions
            .iter()
            .find(|r| r.element == links[1])
            .unwrap();
        assert_eq!(left.line, right.line);
        assert!(right.x0 >= left.x1);
    }

    #[test]
    fn test_list_view_stacks_cards() {
        let articles = sample_articles(2);
        let page = markup::index_page(&articles, ViewKind::List, 1, 6);
        let layout = layout_document(&page, 80, None, &Theme::default());

        let links = page.select(&Selector::new().class(markup::ARTICLE_LINK));
        let first = layout
            .regions
            .iter()
            .find(|r| r.element == links[0])
            .unwrap();
        let second = layout
            .regions
            .iter()
            .find(|r| r.element == links[1])
            .unwrap();
        assert_ne!(first.line, second.line);
        assert_eq!(first.x0, second.x0);
    }

    #[test]
    fn test_focused_link_is_reversed() {
        let articles = sample_articles(1);
        let page = markup::index_page(&articles, ViewKind::List, 1, 6);
        let link = page.select(&Selector::new().class(markup::ARTICLE_LINK))[0];
        let layout = layout_document(&page, 80, Some(link), &Theme::default());

        let region = layout.regions.iter().find(|r| r.element == link).unwrap();
        let line = &layout.lines[region.line];
        assert!(line
            .spans
            .iter()
            .any(|s| s.style.add_modifier.contains(Modifier::REVERSED)));
    }

    #[test]
    fn test_article_layout_starts_with_back_link() {
        let article = sample_articles(1).remove(0);
        let page = markup::article_page(&article);
        let layout = layout_document(&page, 40, None, &Theme::default());

        let back = page.select(&Selector::new().class(markup::BACK_LINK))[0];
        assert_eq!(layout.regions[0].element, back);
        assert_eq!(layout.regions[0].line, 0);
        assert!(layout.height() > 3);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_empty_yields_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
