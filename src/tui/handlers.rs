use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_list_key(key_event: KeyEvent) -> ListAction {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                ListAction::Quit
            }
            KeyCode::Char('q') => ListAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => ListAction::MoveUp,
            KeyCode::Down | KeyCode::Char('j') => ListAction::MoveDown,
            KeyCode::Char(' ') | KeyCode::Enter => ListAction::ToggleCheckbox,
            KeyCode::Char('d') | KeyCode::Delete => ListAction::DeleteSelected,
            KeyCode::Char('/') | KeyCode::Tab => ListAction::FocusSearch,
            KeyCode::Char('r') => ListAction::Reload,
            KeyCode::Char('?') => ListAction::ToggleHelp,
            _ => ListAction::None,
        }
    }

    pub fn handle_search_key(key_event: KeyEvent) -> SearchAction {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                SearchAction::Quit
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Enter | KeyCode::Down => SearchAction::FocusList,
            KeyCode::Backspace => SearchAction::Backspace,
            KeyCode::Char(c) => SearchAction::InsertChar(c),
            _ => SearchAction::None,
        }
    }

    pub fn handle_help_key(key_event: KeyEvent) -> HelpAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => HelpAction::ExitHelp,
            _ => HelpAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ListAction {
    None,
    Quit,
    MoveUp,
    MoveDown,
    ToggleCheckbox,
    DeleteSelected,
    FocusSearch,
    Reload,
    ToggleHelp,
}

#[derive(Debug, PartialEq)]
pub enum SearchAction {
    None,
    Quit,
    FocusList,
    Backspace,
    InsertChar(char),
}

#[derive(Debug, PartialEq)]
pub enum HelpAction {
    None,
    ExitHelp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keys() {
        let key_event = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::Quit);

        let key_event = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::ToggleCheckbox);

        let key_event = KeyEvent::from(KeyCode::Char('d'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::DeleteSelected);

        let key_event = KeyEvent::from(KeyCode::Delete);
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::DeleteSelected);

        let key_event = KeyEvent::from(KeyCode::Char('/'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::FocusSearch);

        let key_event = KeyEvent::from(KeyCode::Char('r'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::Reload);
    }

    #[test]
    fn test_list_navigation_keys() {
        let key_event = KeyEvent::from(KeyCode::Up);
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::MoveUp);

        let key_event = KeyEvent::from(KeyCode::Char('j'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::MoveDown);

        let key_event = KeyEvent::from(KeyCode::Char('k'));
        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::MoveUp);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_focus() {
        let mut key_event = KeyEvent::from(KeyCode::Char('c'));
        key_event.modifiers = KeyModifiers::CONTROL;

        assert_eq!(KeyHandler::handle_list_key(key_event), ListAction::Quit);
        assert_eq!(KeyHandler::handle_search_key(key_event), SearchAction::Quit);
    }

    #[test]
    fn test_search_keys() {
        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_search_key(key_event), SearchAction::FocusList);

        let key_event = KeyEvent::from(KeyCode::Backspace);
        assert_eq!(KeyHandler::handle_search_key(key_event), SearchAction::Backspace);

        // letters that are commands in the list are plain input here
        let key_event = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(KeyHandler::handle_search_key(key_event), SearchAction::InsertChar('q'));

        let key_event = KeyEvent::from(KeyCode::Char('d'));
        assert_eq!(KeyHandler::handle_search_key(key_event), SearchAction::InsertChar('d'));
    }

    #[test]
    fn test_help_keys() {
        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_help_key(key_event), HelpAction::ExitHelp);

        let key_event = KeyEvent::from(KeyCode::Char('?'));
        assert_eq!(KeyHandler::handle_help_key(key_event), HelpAction::ExitHelp);

        let key_event = KeyEvent::from(KeyCode::Char('x'));
        assert_eq!(KeyHandler::handle_help_key(key_event), HelpAction::None);
    }
}
