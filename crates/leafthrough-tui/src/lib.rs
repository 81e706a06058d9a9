pub mod app;
pub mod event;
pub mod input;
pub mod interceptor;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::{App, PendingNavigation};
pub use interceptor::{Host, NavigationInterceptor, ScrollBehavior};
pub use theme::Theme;
