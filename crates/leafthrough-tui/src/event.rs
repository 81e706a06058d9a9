use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Lines per mouse wheel notch
const WHEEL_LINES: i32 = 3;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Poll at `animation_fps` while animations run, `tick_rate_ms`
    /// otherwise
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u16) -> Self {
        let animation_rate = if animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / animation_fps as u64)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate,
        }
    }

    /// Poll for the next event at the normal tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click {
                        column: mouse.column,
                        row: mouse.row,
                    }),
                    MouseEventKind::ScrollDown => Some(AppEvent::Wheel(WHEEL_LINES)),
                    MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-WHEEL_LINES)),
                    _ => None,
                }),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Left mouse button pressed at a terminal cell
    Click { column: u16, row: u16 },
    /// Mouse wheel movement in lines (positive = down)
    Wheel(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
