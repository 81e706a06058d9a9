//! Click interception for view-toggle buttons and pagination links.
//!
//! The interceptor binds to elements of an installed document and
//! rewrites their activation into host commands: suppress the default,
//! glide the viewport to the top, navigate. It keeps no page state of
//! its own; targets are read from the document at click time, so a
//! binding stays correct even if an href changes after install.
//!
//! Dispatch is synchronous. Commands are issued in order and the click
//! handler returns without waiting on their outcome; whatever the
//! navigation does to the document happens after the handler is done.

use std::collections::HashMap;

use leafthrough_core::page::{markup, ElementId, ElementKind, Page, Selector};
use tracing::debug;

/// How the viewport should move when commanded to the top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump straight to the target
    Auto,
    /// Animate toward the target
    Smooth,
}

/// Commands the interceptor issues against its environment.
///
/// The host decides what each command means; the interceptor never
/// observes the result.
pub trait Host {
    /// Move the viewport's vertical offset to zero
    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    /// Replace the current browsing location. `None` means the clicked
    /// element carried no target; what to do then is the host's call.
    fn navigate(&mut self, target: Option<&str>);
}

/// A click being delivered to one element
#[derive(Debug)]
pub struct ClickEvent {
    target: ElementId,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Suppress the element's default activation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Which click behavior an element is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// View toggle button: suppress default, navigate
    ViewToggle,
    /// Pagination link: suppress default, scroll to top, navigate,
    /// unless the link is marked disabled
    Pagination,
}

/// Binds navigation elements of one document and rewrites their clicks
#[derive(Debug, Default)]
pub struct NavigationInterceptor {
    bindings: HashMap<ElementId, Binding>,
}

impl NavigationInterceptor {
    /// Bind every matching element of a freshly built document. Call
    /// once per document, after its content is complete.
    pub fn install(page: &Page) -> Self {
        let mut interceptor = Self::default();

        let toggles = page.select(
            &Selector::new()
                .within(markup::VIEW_TOGGLE)
                .class(markup::BUTTON),
        );
        for id in toggles {
            interceptor.bind(id, Binding::ViewToggle);
        }

        let links = page.select(
            &Selector::new()
                .within(markup::PAGINATION)
                .kind(ElementKind::Anchor),
        );
        for id in links {
            interceptor.bind(id, Binding::Pagination);
        }

        debug!(bindings = interceptor.bindings.len(), "interceptor installed");
        interceptor
    }

    /// Bind one element, for content added after install
    pub fn bind(&mut self, id: ElementId, binding: Binding) {
        self.bindings.insert(id, binding);
    }

    pub fn binding(&self, id: ElementId) -> Option<Binding> {
        self.bindings.get(&id).copied()
    }

    /// Deliver a click. Elements without a binding are left alone.
    pub fn on_click(&self, event: &mut ClickEvent, page: &Page, host: &mut dyn Host) {
        match self.binding(event.target()) {
            Some(Binding::ViewToggle) => self.toggle_click(event, page, host),
            Some(Binding::Pagination) => self.pagination_click(event, page, host),
            None => {}
        }
    }

    fn toggle_click(&self, event: &mut ClickEvent, page: &Page, host: &mut dyn Host) {
        event.prevent_default();

        // Read the target fresh at click time
        let target = page.nav_target(event.target());
        debug!(?target, "view toggle click");
        host.navigate(target);
    }

    fn pagination_click(&self, event: &mut ClickEvent, page: &Page, host: &mut dyn Host) {
        if page.has_class(event.target(), markup::DISABLED) {
            // Disabled links keep their default activation untouched
            return;
        }

        event.prevent_default();
        host.scroll_to_top(ScrollBehavior::Smooth);

        let target = page.nav_target(event.target());
        debug!(?target, "pagination click");
        host.navigate(target);
    }
}
