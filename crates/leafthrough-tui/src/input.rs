use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext, // Tab: focus next link
    FocusPrev, // Shift+Tab: focus previous link
    Activate,  // Enter: click the focused link
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG,    // First 'g' press, waiting for second 'g'
    HistoryBack, // Backspace: return to the previous location
    Reload,      // 'r': reload the current location
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Link focus
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::FocusPrev,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Activate,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,

        // Location
        (KeyCode::Backspace, KeyModifiers::NONE) => Action::HistoryBack,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reload,

        _ => Action::None,
    }
}
