use std::sync::Arc;

use leafthrough_core::page::{ElementId, ElementKind, Page, Route, Selector};
use leafthrough_core::AppConfig;
use ratatui::layout::Rect;
use tracing::debug;

use crate::interceptor::{ClickEvent, Host, NavigationInterceptor, ScrollBehavior};
use crate::layout::Region;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// A navigation requested by the current document, not yet carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    /// Where to go; None reloads the current location
    pub target: Option<String>,
    /// Whether a smooth scroll was commanded by the same interaction
    pub smooth: bool,
    /// Whether the current location should be pushed onto history
    pub record_history: bool,
}

/// Snapshot of the last draw, used to map clicks back to elements
#[derive(Debug, Clone, Default)]
pub struct RenderedView {
    /// Element extents in document coordinates
    pub regions: Vec<Region>,
    /// Inner screen area the document was drawn into
    pub area: Rect,
    /// Scroll offset at draw time
    pub offset: u16,
    /// Total document height in lines
    pub content_height: usize,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Color theme
    pub theme: Theme,
    /// Location of the current document
    pub location: String,
    /// Route the current location resolved to, if any
    pub route: Option<Route>,
    /// Current document
    pub page: Page,
    /// Click bindings for the current document
    pub interceptor: NavigationInterceptor,
    /// Scroll position and animation
    pub animator: ScrollAnimator,
    /// Anchors in document order, for Tab focus
    pub focusable: Vec<ElementId>,
    /// Index into focusable, if anything is focused
    pub focus_index: Option<usize>,
    /// Locations to return to with Backspace
    pub history: Vec<String>,
    /// Navigation requested by the last interaction
    pub pending_nav: Option<PendingNavigation>,
    /// Status message shown in the status bar
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// What the last draw put on screen
    pub view: RenderedView,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let animator = ScrollAnimator::new(config.scroll.clone());
        Self {
            config,
            theme: Theme::default(),
            location: "/".to_string(),
            route: None,
            page: Page::new(),
            interceptor: NavigationInterceptor::default(),
            animator,
            focusable: Vec::new(),
            focus_index: None,
            history: Vec::new(),
            pending_nav: None,
            status_message: None,
            pending_key: None,
            should_quit: false,
            view: RenderedView::default(),
        }
    }

    /// Swap in a freshly built document for a location
    ///
    /// History records where we came from when the navigation asked for it.
    /// A smooth scroll started by the same interaction keeps gliding across
    /// the swap; any other navigation lands at the top immediately.
    pub fn install_document(
        &mut self,
        nav: &PendingNavigation,
        location: String,
        route: Option<Route>,
        page: Page,
    ) {
        if nav.record_history && self.location != location {
            self.history.push(std::mem::take(&mut self.location));
        }
        self.location = location;
        self.route = route;
        self.interceptor = NavigationInterceptor::install(&page);
        self.focusable = page.select(&Selector::new().kind(ElementKind::Anchor));
        self.focus_index = None;
        self.page = page;
        if !nav.smooth {
            self.animator.jump_to(0);
        }
        // Regions from the old document no longer apply
        self.view = RenderedView::default();
        debug!(location = %self.location, "document installed");
    }

    /// Take the navigation requested by the last interaction, if any
    pub fn take_pending_nav(&mut self) -> Option<PendingNavigation> {
        self.pending_nav.take()
    }

    /// Dispatch a click on an element, exactly as a pointer press would
    ///
    /// The interceptor sees the event first. If it leaves the default
    /// activation alone and the element links somewhere, the click becomes
    /// a plain navigation.
    pub fn click(&mut self, target: ElementId) {
        let mut event = ClickEvent::new(target);
        let mut host = AppHost {
            animator: &mut self.animator,
            pending_nav: &mut self.pending_nav,
            scrolled_smooth: false,
        };
        self.interceptor.on_click(&mut event, &self.page, &mut host);
        if !event.default_prevented() {
            if let Some(href) = self.page.nav_target(target) {
                let href = href.to_string();
                self.pending_nav = Some(PendingNavigation {
                    target: Some(href),
                    smooth: false,
                    record_history: true,
                });
            }
        }
    }

    /// Handle a pointer click at screen coordinates
    pub fn click_at(&mut self, column: u16, row: u16) {
        if let Some(target) = self.hit_test(column, row) {
            self.click(target);
        }
    }

    /// Map a screen position to the element drawn there, if any
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        let area = self.view.area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let line = (row - area.y) as usize + self.view.offset as usize;
        let col = column - area.x;
        self.view
            .regions
            .iter()
            .find(|r| r.line == line && r.x0 <= col && col < r.x1)
            .map(|r| r.element)
    }

    /// Reload the current location without touching history
    pub fn reload(&mut self) {
        self.pending_nav = Some(PendingNavigation {
            target: None,
            smooth: false,
            record_history: false,
        });
    }

    /// Return to the most recent history entry, if any
    pub fn history_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.pending_nav = Some(PendingNavigation {
                target: Some(previous),
                smooth: false,
                record_history: false,
            });
        } else {
            self.status_message = Some("No history".to_string());
        }
    }

    /// Element currently focused with Tab, if any
    pub fn focused(&self) -> Option<ElementId> {
        self.focus_index.and_then(|i| self.focusable.get(i).copied())
    }

    /// Move focus to the next link, wrapping at the end
    pub fn focus_next(&mut self) {
        if self.focusable.is_empty() {
            return;
        }
        self.focus_index = Some(match self.focus_index {
            Some(i) if i + 1 < self.focusable.len() => i + 1,
            _ => 0,
        });
    }

    /// Move focus to the previous link, wrapping at the start
    pub fn focus_prev(&mut self) {
        if self.focusable.is_empty() {
            return;
        }
        self.focus_index = Some(match self.focus_index {
            Some(i) if i > 0 => i - 1,
            _ => self.focusable.len() - 1,
        });
    }

    /// Click the focused link
    pub fn activate(&mut self) {
        if let Some(id) = self.focused() {
            self.click(id);
        }
    }

    /// Scroll by whole lines, positive is down
    pub fn scroll_by(&mut self, lines: i32) {
        let max = self.max_scroll();
        self.animator.scroll_by(lines, max);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_by(self.animator.step_lines());
    }

    pub fn scroll_up(&mut self) {
        self.scroll_by(-self.animator.step_lines());
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_by((self.view.area.height as i32 / 2).max(1));
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_by(-(self.view.area.height as i32 / 2).max(1));
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_by((self.view.area.height as i32).max(1));
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_by(-(self.view.area.height as i32).max(1));
    }

    pub fn jump_to_top(&mut self) {
        self.animator.glide_to_top();
    }

    pub fn jump_to_bottom(&mut self) {
        let max = self.max_scroll();
        self.animator.glide_to(max, max);
    }

    /// Advance scrolling for this frame and return the offset to draw at
    pub fn update_scroll(&mut self, content_height: usize, viewport_height: u16) -> u16 {
        let max = content_height
            .min(u16::MAX as usize)
            .saturating_sub(viewport_height as usize) as u16;
        self.animator.update(max)
    }

    /// Record what was drawn, for click mapping
    pub fn set_rendered_view(
        &mut self,
        regions: Vec<Region>,
        area: Rect,
        offset: u16,
        content_height: usize,
    ) {
        self.view = RenderedView {
            regions,
            area,
            offset,
            content_height,
        };
    }

    /// Whether the event loop should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.needs_update()
    }

    fn max_scroll(&self) -> u16 {
        let height = self.view.content_height.min(u16::MAX as usize) as u16;
        height.saturating_sub(self.view.area.height)
    }
}

/// Host wiring for the interceptor: scrolls drive the animator, navigations
/// become pending until the event loop loads the target.
struct AppHost<'a> {
    animator: &'a mut ScrollAnimator,
    pending_nav: &'a mut Option<PendingNavigation>,
    scrolled_smooth: bool,
}

impl Host for AppHost<'_> {
    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Smooth => {
                self.animator.glide_to_top();
                self.scrolled_smooth = true;
            }
            ScrollBehavior::Auto => self.animator.jump_to(0),
        }
    }

    fn navigate(&mut self, target: Option<&str>) {
        *self.pending_nav = Some(PendingNavigation {
            target: target.map(str::to_string),
            smooth: self.scrolled_smooth,
            record_history: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafthrough_core::article::Article;
    use leafthrough_core::page::{markup, ViewKind};

    fn test_app() -> App {
        App::new(Arc::new(AppConfig::default()))
    }

    fn boot_nav() -> PendingNavigation {
        PendingNavigation {
            target: None,
            smooth: false,
            record_history: false,
        }
    }

    fn sample_articles(n: usize) -> Vec<Article> {
        (1..=n as i64)
            .map(|id| Article {
                id,
                title: format!("Article {id}"),
                content: "Body text.".to_string(),
                tags: String::new(),
            })
            .collect()
    }

    fn install_index(app: &mut App, articles: &[Article], page_no: u32) {
        let location = format!("/?view=grid&page={page_no}");
        let route = Route::from_location(&location).unwrap();
        let page = markup::index_page(articles, ViewKind::Grid, page_no, 6);
        app.install_document(&boot_nav(), location, route, page);
    }

    #[test]
    fn test_toggle_click_requests_navigation_without_scroll() {
        let mut app = test_app();
        let articles = sample_articles(2);
        install_index(&mut app, &articles, 1);

        let buttons = app.page.select(
            &Selector::new()
                .within(markup::VIEW_TOGGLE)
                .class(markup::BUTTON),
        );
        app.click(buttons[1]);

        let nav = app.pending_nav.clone().unwrap();
        assert_eq!(nav.target.as_deref(), Some("/?view=list&page=1"));
        assert!(!nav.smooth);
        assert!(nav.record_history);
        assert!(!app.animator.is_animating());
    }

    #[test]
    fn test_pagination_click_scrolls_smoothly_then_navigates() {
        let mut app = test_app();
        let articles = sample_articles(6);
        install_index(&mut app, &articles, 2);
        app.animator.jump_to(40);

        let links = app.page.select(
            &Selector::new()
                .within(markup::PAGINATION)
                .kind(ElementKind::Anchor),
        );
        app.click(links[1]);

        let nav = app.pending_nav.clone().unwrap();
        assert_eq!(nav.target.as_deref(), Some("/?view=grid&page=3"));
        assert!(nav.smooth);
        assert!(app.animator.is_animating());
        assert_eq!(app.animator.target(), 0);
    }

    #[test]
    fn test_disabled_prev_still_navigates_natively() {
        let mut app = test_app();
        let articles = sample_articles(2);
        install_index(&mut app, &articles, 1);
        app.animator.jump_to(10);

        let links = app.page.select(
            &Selector::new()
                .within(markup::PAGINATION)
                .kind(ElementKind::Anchor),
        );
        app.click(links[0]);

        // The href still points at page 0; route parsing clamps it on load
        let nav = app.pending_nav.clone().unwrap();
        assert_eq!(nav.target.as_deref(), Some("/?view=grid&page=0"));
        assert!(!nav.smooth);
        assert_eq!(app.animator.offset(), 10);
        assert!(!app.animator.is_animating());
    }

    #[test]
    fn test_history_records_and_returns() {
        let mut app = test_app();
        let articles = sample_articles(1);
        install_index(&mut app, &articles, 1);

        let nav = PendingNavigation {
            target: Some("/article/1".to_string()),
            smooth: false,
            record_history: true,
        };
        let route = Route::from_location("/article/1").unwrap();
        let page = markup::article_page(&articles[0]);
        app.install_document(&nav, "/article/1".to_string(), route, page);

        assert_eq!(app.history, vec!["/?view=grid&page=1".to_string()]);

        app.history_back();
        let back = app.pending_nav.clone().unwrap();
        assert_eq!(back.target.as_deref(), Some("/?view=grid&page=1"));
        assert!(!back.record_history);
    }

    #[test]
    fn test_back_with_empty_history_sets_status() {
        let mut app = test_app();
        app.history_back();
        assert!(app.pending_nav.is_none());
        assert_eq!(app.status_message.as_deref(), Some("No history"));
    }

    #[test]
    fn test_smooth_navigation_keeps_glide_running() {
        let mut app = test_app();
        let articles = sample_articles(6);
        install_index(&mut app, &articles, 2);
        app.animator.jump_to(30);
        app.animator.glide_to_top();

        let nav = PendingNavigation {
            target: Some("/?view=grid&page=3".to_string()),
            smooth: true,
            record_history: true,
        };
        let route = Route::from_location("/?view=grid&page=3").unwrap();
        let page = markup::index_page(&articles, ViewKind::Grid, 3, 6);
        app.install_document(&nav, "/?view=grid&page=3".to_string(), route, page);
        assert!(app.animator.is_animating());

        let nav = PendingNavigation {
            target: Some("/?view=grid&page=4".to_string()),
            smooth: false,
            record_history: true,
        };
        let route = Route::from_location("/?view=grid&page=4").unwrap();
        let page = markup::index_page(&articles, ViewKind::Grid, 4, 6);
        app.install_document(&nav, "/?view=grid&page=4".to_string(), route, page);
        assert!(!app.animator.is_animating());
        assert_eq!(app.animator.offset(), 0);
    }

    #[test]
    fn test_focus_cycles_through_anchors() {
        let mut app = test_app();
        install_index(&mut app, &sample_articles(1), 1);
        assert!(app.focused().is_none());
        assert!(!app.focusable.is_empty());

        app.focus_next();
        let first = app.focused().unwrap();
        for _ in 1..app.focusable.len() {
            app.focus_next();
        }
        app.focus_next();
        assert_eq!(app.focused(), Some(first));

        app.focus_index = Some(0);
        app.focus_prev();
        assert_eq!(app.focused(), app.focusable.last().copied());
    }

    #[test]
    fn test_activate_clicks_focused_link() {
        let mut app = test_app();
        install_index(&mut app, &sample_articles(1), 1);

        let link = app.page.select(&Selector::new().class(markup::ARTICLE_LINK))[0];
        let idx = app.focusable.iter().position(|&id| id == link).unwrap();
        app.focus_index = Some(idx);
        app.activate();

        let nav = app.pending_nav.clone().unwrap();
        assert_eq!(nav.target.as_deref(), Some("/article/1"));
    }

    #[test]
    fn test_hit_test_applies_scroll_offset() {
        let mut app = test_app();
        install_index(&mut app, &sample_articles(1), 1);
        let link = app.page.select(&Selector::new().class(markup::ARTICLE_LINK))[0];
        app.view = RenderedView {
            regions: vec![Region {
                element: link,
                line: 12,
                x0: 2,
                x1: 10,
            }],
            area: Rect::new(1, 1, 80, 24),
            offset: 10,
            content_height: 40,
        };

        // Screen row 3 inside the area is document line 12 at offset 10
        assert_eq!(app.hit_test(5, 3), Some(link));
        assert_eq!(app.hit_test(5, 4), None);
        assert_eq!(app.hit_test(0, 3), None);
    }

    #[test]
    fn test_install_resets_focus_and_view() {
        let mut app = test_app();
        install_index(&mut app, &sample_articles(2), 1);
        app.focus_next();
        app.view.content_height = 99;

        install_index(&mut app, &sample_articles(2), 1);
        assert!(app.focused().is_none());
        assert_eq!(app.view.content_height, 0);
        assert!(app.view.regions.is_empty());
    }
}
