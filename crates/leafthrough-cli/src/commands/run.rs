use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tracing::warn;

use leafthrough_core::page::{markup, resolve, Route, ViewKind};
use leafthrough_core::storage::{ArticleRepository, Database};
use leafthrough_core::AppConfig;
use leafthrough_tui::app::App;
use leafthrough_tui::event::{AppEvent, EventHandler};
use leafthrough_tui::input::{handle_key_event, Action};
use leafthrough_tui::widgets::{PageViewWidget, StatusBarWidget};

pub async fn run(config: Arc<AppConfig>, db: Arc<Database>) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("leafthrough")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone());
    let events = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.animation_fps);

    // Load the front page before the first draw
    if config.ui.default_view != ViewKind::Grid {
        app.location = Route::Index {
            view: config.ui.default_view,
            page: 1,
        }
        .href();
    }
    app.reload();
    let result = match load_pending(&mut app, &db).await {
        Ok(()) => run_loop(&mut terminal, &mut app, &events, &db).await,
        Err(e) => Err(e),
    };

    // Teardown
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    db: &Database,
) -> Result<()> {
    let mut needs_fast_update = false;

    loop {
        terminal.draw(|frame| ui(frame, app))?;

        let event = if needs_fast_update {
            events.next_animation()?
        } else {
            events.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(action, app);
                }
                AppEvent::Click { column, row } => app.click_at(column, row),
                AppEvent::Wheel(delta) => app.scroll_by(delta),
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.pending_nav.is_some() {
            load_pending(app, db).await?;
        }

        if app.should_quit {
            break;
        }

        // Switch to the animation rate while a glide is in flight
        needs_fast_update = app.needs_fast_update();
    }

    Ok(())
}

fn handle_action(action: Action, app: &mut App) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::FocusNext => app.focus_next(),
        Action::FocusPrev => app.focus_prev(),
        Action::Activate => app.activate(),
        Action::ScrollDown => app.scroll_down(),
        Action::ScrollUp => app.scroll_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::ScrollPageDown => app.scroll_page_down(),
        Action::ScrollPageUp => app.scroll_page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => {
            app.pending_key = Some('g');
            return;
        }
        Action::HistoryBack => app.history_back(),
        Action::Reload => app.reload(),
        Action::None => {}
    }
    app.pending_key = None;
}

fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    PageViewWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[1], app);
}

/// Carry out the navigation the app requested, swapping in the new document
async fn load_pending(app: &mut App, db: &Database) -> Result<()> {
    let Some(nav) = app.take_pending_nav() else {
        return Ok(());
    };

    let location = match nav.target.as_deref() {
        Some(target) => match resolve(target, &app.location) {
            Ok(location) => location,
            Err(e) => {
                warn!(link = target, error = %e, "ignoring unresolvable link");
                app.status_message = Some(format!("Bad link: {}", target));
                return Ok(());
            }
        },
        // A missing target reloads in place
        None => app.location.clone(),
    };

    let route = Route::from_location(&location)?;
    let page = match route {
        Some(Route::Index { view, page }) => {
            let per_page = app.config.articles_per_page();
            let offset = page.saturating_sub(1).saturating_mul(per_page);
            let repo = ArticleRepository::new(db);
            let articles = repo.list_page(per_page, offset).await?;
            markup::index_page(&articles, view, page, per_page)
        }
        Some(Route::Article { id }) => {
            let repo = ArticleRepository::new(db);
            match repo.find_by_id(id).await? {
                Some(article) => markup::article_page(&article),
                None => markup::not_found_page("Article not found"),
            }
        }
        None => markup::not_found_page("Page not found"),
    };

    app.status_message = None;
    app.install_document(&nav, location, route, page);
    Ok(())
}
