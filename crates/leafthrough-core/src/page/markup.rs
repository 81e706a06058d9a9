//! Page builders for every route the application serves.
//!
//! Pages are built complete: by the time a builder returns, all
//! interactive elements exist with their classes and targets set, so
//! interaction layers can bind to the finished document.

use crate::article::Article;
use crate::page::element::{Element, ElementKind, Page};
use crate::page::route::{Route, ViewKind};

pub const VIEW_TOGGLE: &str = "view-toggle";
pub const BUTTON: &str = "button";
pub const ACTIVE: &str = "active";
pub const ARTICLES: &str = "articles";
pub const GRID_VIEW: &str = "grid-view";
pub const LIST_VIEW: &str = "list-view";
pub const ARTICLE_CARD: &str = "article-card";
pub const ARTICLE_LINK: &str = "article-link";
pub const TAGS: &str = "tags";
pub const PAGINATION: &str = "pagination";
pub const PAGE_LINK: &str = "page-link";
pub const PAGE_CURRENT: &str = "page-current";
pub const DISABLED: &str = "disabled";
pub const BACK_LINK: &str = "back-link";
pub const ARTICLE_BODY: &str = "article-body";
pub const ERROR: &str = "error";

/// Characters of article content shown on index cards
const PREVIEW_CHARS: usize = 120;

/// Build the paginated article index
pub fn index_page(articles: &[Article], view: ViewKind, page: u32, per_page: u32) -> Page {
    let mut doc = Page::new();
    let root = doc.root();

    let toggle = doc.append(root, Element::new(ElementKind::Container).class(VIEW_TOGGLE));
    for (label, kind) in [("Grid", ViewKind::Grid), ("List", ViewKind::List)] {
        let mut button = Element::new(ElementKind::Anchor)
            .class(BUTTON)
            .text(label)
            .href(Route::Index { view: kind, page }.href());
        if kind == view {
            button = button.class(ACTIVE);
        }
        doc.append(toggle, button);
    }

    let view_class = match view {
        ViewKind::Grid => GRID_VIEW,
        ViewKind::List => LIST_VIEW,
    };
    let list = doc.append(
        root,
        Element::new(ElementKind::Container)
            .class(ARTICLES)
            .class(view_class),
    );

    if articles.is_empty() {
        doc.append(list, Element::new(ElementKind::Text).text("No articles here."));
    }
    for article in articles {
        let card = doc.append(list, Element::new(ElementKind::Container).class(ARTICLE_CARD));
        doc.append(
            card,
            Element::new(ElementKind::Anchor)
                .class(ARTICLE_LINK)
                .text(&article.title)
                .href(Route::Article { id: article.id }.href()),
        );
        doc.append(
            card,
            Element::new(ElementKind::Text).text(article.content_preview(PREVIEW_CHARS)),
        );
        if !article.tags.is_empty() {
            doc.append(
                card,
                Element::new(ElementKind::Text).class(TAGS).text(&article.tags),
            );
        }
    }

    let pagination = doc.append(root, Element::new(ElementKind::Container).class(PAGINATION));

    // Both ends keep a live href even when marked disabled; the marker
    // alone decides whether clicks are intercepted.
    let mut prev = Element::new(ElementKind::Anchor)
        .class(PAGE_LINK)
        .text("« Prev")
        .href(
            Route::Index {
                view,
                page: page.saturating_sub(1),
            }
            .href(),
        );
    if page <= 1 {
        prev = prev.class(DISABLED);
    }
    doc.append(pagination, prev);

    doc.append(
        pagination,
        Element::new(ElementKind::Text)
            .class(PAGE_CURRENT)
            .text(format!("Page {page}")),
    );

    // Without a row count, a short page is the only end-of-data signal
    let mut next = Element::new(ElementKind::Anchor)
        .class(PAGE_LINK)
        .text("Next »")
        .href(Route::Index { view, page: page + 1 }.href());
    if (articles.len() as u32) < per_page {
        next = next.class(DISABLED);
    }
    doc.append(pagination, next);

    doc
}

/// Build a single article page
pub fn article_page(article: &Article) -> Page {
    let mut doc = Page::new();
    let root = doc.root();

    doc.append(
        root,
        Element::new(ElementKind::Anchor)
            .class(BACK_LINK)
            .text("« All articles")
            .href("/"),
    );
    doc.append(
        root,
        Element::new(ElementKind::Heading).text(&article.title),
    );
    if !article.tags.is_empty() {
        doc.append(
            root,
            Element::new(ElementKind::Text).class(TAGS).text(&article.tags),
        );
    }
    doc.append(
        root,
        Element::new(ElementKind::Text)
            .class(ARTICLE_BODY)
            .text(&article.content),
    );

    doc
}

/// Build the dead-end page for locations nothing routes to
pub fn not_found_page(message: &str) -> Page {
    let mut doc = Page::new();
    let root = doc.root();

    doc.append(
        root,
        Element::new(ElementKind::Anchor)
            .class(BACK_LINK)
            .text("« All articles")
            .href("/"),
    );
    doc.append(root, Element::new(ElementKind::Heading).text("404"));
    doc.append(
        root,
        Element::new(ElementKind::Text).class(ERROR).text(message),
    );

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::element::Selector;

    fn article(id: i64) -> Article {
        Article {
            id,
            title: format!("Article {id}"),
            content: "Body text".to_string(),
            tags: "one,two".to_string(),
        }
    }

    fn articles(n: usize) -> Vec<Article> {
        (1..=n as i64).map(article).collect()
    }

    fn pagination_anchors(doc: &Page) -> Vec<crate::page::element::ElementId> {
        doc.select(&Selector::new().within(PAGINATION).kind(ElementKind::Anchor))
    }

    #[test]
    fn test_toggle_buttons_preserve_page() {
        let doc = index_page(&articles(6), ViewKind::List, 4, 6);
        let buttons = doc.select(&Selector::new().within(VIEW_TOGGLE).class(BUTTON));
        assert_eq!(buttons.len(), 2);

        assert_eq!(doc.nav_target(buttons[0]), Some("/?view=grid&page=4"));
        assert_eq!(doc.nav_target(buttons[1]), Some("/?view=list&page=4"));
        assert!(!doc.has_class(buttons[0], ACTIVE));
        assert!(doc.has_class(buttons[1], ACTIVE));
    }

    #[test]
    fn test_first_page_disables_prev_but_keeps_href() {
        let doc = index_page(&articles(6), ViewKind::Grid, 1, 6);
        let anchors = pagination_anchors(&doc);
        let prev = anchors[0];
        let next = anchors[1];

        assert!(doc.has_class(prev, DISABLED));
        assert_eq!(doc.nav_target(prev), Some("/?view=grid&page=0"));
        assert!(!doc.has_class(next, DISABLED));
        assert_eq!(doc.nav_target(next), Some("/?view=grid&page=2"));
    }

    #[test]
    fn test_short_page_disables_next() {
        let doc = index_page(&articles(3), ViewKind::Grid, 2, 6);
        let anchors = pagination_anchors(&doc);

        assert!(!doc.has_class(anchors[0], DISABLED));
        assert!(doc.has_class(anchors[1], DISABLED));
        assert_eq!(doc.nav_target(anchors[1]), Some("/?view=grid&page=3"));
    }

    #[test]
    fn test_exactly_full_page_keeps_next_enabled() {
        // A full page is indistinguishable from more data ahead
        let doc = index_page(&articles(6), ViewKind::Grid, 2, 6);
        let anchors = pagination_anchors(&doc);
        assert!(!doc.has_class(anchors[1], DISABLED));
    }

    #[test]
    fn test_cards_link_to_articles() {
        let doc = index_page(&articles(2), ViewKind::Grid, 1, 6);
        let links = doc.select(&Selector::new().class(ARTICLE_LINK));
        assert_eq!(links.len(), 2);
        assert_eq!(doc.nav_target(links[0]), Some("/article/1"));
        assert_eq!(doc.nav_target(links[1]), Some("/article/2"));
    }

    #[test]
    fn test_article_page_back_link() {
        let doc = article_page(&article(5));
        let back = doc.select(&Selector::new().class(BACK_LINK));
        assert_eq!(back.len(), 1);
        assert_eq!(doc.nav_target(back[0]), Some("/"));
    }

    #[test]
    fn test_not_found_page_carries_message() {
        let doc = not_found_page("Article not found");
        let errors = doc.select(&Selector::new().class(ERROR));
        assert_eq!(errors.len(), 1);
        assert_eq!(doc.get(errors[0]).text.as_deref(), Some("Article not found"));
    }
}
