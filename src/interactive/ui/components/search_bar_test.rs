#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::search_bar::*;
    use crate::interactive::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    fn create_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    fn query_of(msg: Option<Message>) -> Option<String> {
        match msg {
            Some(Message::QueryChanged(q)) => Some(q),
            _ => None,
        }
    }

    #[test]
    fn test_character_input() {
        let mut search_bar = SearchBar::new();

        let msg = search_bar.handle_key(create_key_event(KeyCode::Char('A')));
        assert_eq!(query_of(msg).as_deref(), Some("A"));

        search_bar.handle_key(create_key_event(KeyCode::Char('W')));
        let msg = search_bar.handle_key(create_key_event(KeyCode::Char('S')));
        assert_eq!(query_of(msg).as_deref(), Some("AWS"));
        assert_eq!(search_bar.query(), "AWS");
    }

    #[test]
    fn test_space_is_typed() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("my");

        let msg = search_bar.handle_key(create_key_event(KeyCode::Char(' ')));
        assert_eq!(query_of(msg).as_deref(), Some("my "));
    }

    #[test]
    fn test_backspace() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("hello");

        let msg = search_bar.handle_key(create_key_event(KeyCode::Backspace));
        assert_eq!(query_of(msg).as_deref(), Some("hell"));

        search_bar.set_query("");
        let msg = search_bar.handle_key(create_key_event(KeyCode::Backspace));
        assert!(msg.is_none());
    }

    #[test]
    fn test_cursor_movement() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("hello");

        assert!(search_bar.handle_key(create_key_event(KeyCode::Home)).is_none());
        let msg = search_bar.handle_key(create_key_event(KeyCode::Char('X')));
        assert_eq!(query_of(msg).as_deref(), Some("Xhello"));

        assert!(search_bar.handle_key(create_key_event(KeyCode::End)).is_none());
        let msg = search_bar.handle_key(create_key_event(KeyCode::Char('Y')));
        assert_eq!(query_of(msg).as_deref(), Some("XhelloY"));

        search_bar.handle_key(create_key_event(KeyCode::Left));
        search_bar.handle_key(create_key_event(KeyCode::Left));
        assert_eq!(search_bar.cursor_position(), 5);
        search_bar.handle_key(create_key_event(KeyCode::Right));
        assert_eq!(search_bar.cursor_position(), 6);
    }

    #[test]
    fn test_delete_key() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("hello");

        search_bar.handle_key(create_key_event(KeyCode::Home));
        let msg = search_bar.handle_key(create_key_event(KeyCode::Delete));
        assert_eq!(query_of(msg).as_deref(), Some("ello"));

        search_bar.handle_key(create_key_event(KeyCode::End));
        assert!(search_bar.handle_key(create_key_event(KeyCode::Delete)).is_none());
    }

    #[test]
    fn test_unicode_input() {
        let mut search_bar = SearchBar::new();

        search_bar.handle_key(create_key_event(KeyCode::Char('é')));
        search_bar.handle_key(create_key_event(KeyCode::Char('t')));
        let msg = search_bar.handle_key(create_key_event(KeyCode::Char('é')));
        assert_eq!(query_of(msg).as_deref(), Some("été"));

        search_bar.handle_key(create_key_event(KeyCode::Left));
        let msg = search_bar.handle_key(create_key_event(KeyCode::Backspace));
        assert_eq!(query_of(msg).as_deref(), Some("éé"));
    }

    #[test]
    fn test_ctrl_w_deletes_previous_word() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("aws invoice");

        let msg = search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('w'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(query_of(msg).as_deref(), Some("aws "));
    }

    #[test]
    fn test_ctrl_u_and_ctrl_k() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("sprint review");
        for _ in 0..6 {
            search_bar.handle_key(create_key_event(KeyCode::Left));
        }

        let msg = search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('k'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(query_of(msg).as_deref(), Some("sprint "));

        let msg = search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(query_of(msg).as_deref(), Some(""));

        // Nothing left to delete
        let msg = search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        ));
        assert!(msg.is_none());
    }

    #[test]
    fn test_alt_word_movement() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("team standup notes");

        search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('b'),
            KeyModifiers::ALT,
        ));
        assert_eq!(search_bar.cursor_position(), 13);

        search_bar.handle_key(create_key_event(KeyCode::Home));
        search_bar.handle_key(create_key_event_with_modifiers(
            KeyCode::Char('f'),
            KeyModifiers::ALT,
        ));
        assert_eq!(search_bar.cursor_position(), 5);
    }

    #[test]
    fn test_set_same_query_keeps_cursor() {
        let mut search_bar = SearchBar::new();
        search_bar.set_query("notes");
        search_bar.handle_key(create_key_event(KeyCode::Home));

        search_bar.set_query("notes");
        assert_eq!(search_bar.cursor_position(), 0);

        search_bar.set_query("");
        assert_eq!(search_bar.cursor_position(), 0);
        assert_eq!(search_bar.query(), "");
    }

    #[test]
    fn test_render_places_close_button() {
        let mut search_bar = SearchBar::new();
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| search_bar.render(f, Rect::new(0, 0, 60, 3)))
            .unwrap();

        assert_eq!(search_bar.close_area(), Rect::new(56, 1, 3, 1));
        let buffer = terminal.backend().buffer();
        let row: String = (0..60u16).map(|x| buffer[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains(OVERLAY_PLACEHOLDER));
    }
}
