//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::table::Column;

/// Which screen or popup has the keyboard
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    #[default]
    List,
    Detail,
    Filter,
    ActionMenu,
    Help,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Table navigation
    SelectNextRow,
    SelectPrevRow,
    NextPage,
    PrevPage,
    GoToPage(usize),
    CyclePageSize,

    // Sorting
    ToggleSort(Column),

    // Data
    Refresh,

    // Detail view
    ViewDetails,
    CloseDetails,

    // Action menu
    OpenActionMenu,
    ActionMenuNext,
    ActionMenuPrev,
    ConfirmAction,
    CloseActionMenu,

    // Filter modal
    OpenFilter,
    FilterChar(char),
    FilterBackspace,
    FilterNextField,
    FilterPrevField,
    ApplyFilter,
    ResetFilter,
    CancelFilter,
    ClearFilter,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on the active mode
pub fn key_to_ui_event(key: KeyEvent, mode: Mode) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('r') if mode == Mode::Filter => return Some(UiEvent::ResetFilter),
            _ => {}
        }
    }

    match mode {
        Mode::Help => Some(UiEvent::CloseHelp),
        Mode::Filter => handle_filter_keys(key),
        Mode::ActionMenu => handle_action_menu_keys(key),
        Mode::Detail => handle_detail_keys(key),
        Mode::List => handle_list_keys(key),
    }
}

/// Handle keys on the users table
fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNextRow),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrevRow),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextPage),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevPage),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|n| UiEvent::GoToPage(n as usize - 1)),
        KeyCode::Char('z') => Some(UiEvent::CyclePageSize),
        KeyCode::Char('O') => Some(UiEvent::ToggleSort(Column::Organization)),
        KeyCode::Char('N') => Some(UiEvent::ToggleSort(Column::FullName)),
        KeyCode::Char('E') => Some(UiEvent::ToggleSort(Column::Email)),
        KeyCode::Char('D') => Some(UiEvent::ToggleSort(Column::DateJoined)),
        KeyCode::Char('P') => Some(UiEvent::ToggleSort(Column::PhoneNumber)),
        KeyCode::Char('S') => Some(UiEvent::ToggleSort(Column::Status)),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Char('f') => Some(UiEvent::OpenFilter),
        KeyCode::Char('x') => Some(UiEvent::ClearFilter),
        KeyCode::Char('a') => Some(UiEvent::OpenActionMenu),
        KeyCode::Enter => Some(UiEvent::ViewDetails),
        _ => None,
    }
}

/// Handle keys on the user detail screen
fn handle_detail_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Esc | KeyCode::Backspace => Some(UiEvent::CloseDetails),
        KeyCode::Char('a') => Some(UiEvent::OpenActionMenu),
        _ => None,
    }
}

fn handle_action_menu_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CloseActionMenu),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ActionMenuNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ActionMenuPrev),
        KeyCode::Enter => Some(UiEvent::ConfirmAction),
        _ => None,
    }
}

fn handle_filter_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelFilter),
        KeyCode::Enter => Some(UiEvent::ApplyFilter),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::FilterNextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::FilterPrevField),
        KeyCode::Backspace => Some(UiEvent::FilterBackspace),
        KeyCode::Char(c) => Some(UiEvent::FilterChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_sort_keys_on_list() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('N')), Mode::List),
            Some(UiEvent::ToggleSort(Column::FullName))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('D')), Mode::List),
            Some(UiEvent::ToggleSort(Column::DateJoined))
        );
    }

    #[test]
    fn test_digit_keys_go_to_page() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('1')), Mode::List),
            Some(UiEvent::GoToPage(0))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('9')), Mode::List),
            Some(UiEvent::GoToPage(8))
        );
    }

    #[test]
    fn test_filter_mode_captures_text() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Mode::Filter),
            Some(UiEvent::FilterChar('q'))
        );
        assert_eq!(
            key_to_ui_event(
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                Mode::Filter
            ),
            Some(UiEvent::ResetFilter)
        );
    }

    #[test]
    fn test_help_closes_on_any_key() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('x')), Mode::Help),
            Some(UiEvent::CloseHelp)
        );
    }
}
