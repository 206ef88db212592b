#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::result_list::*;
    use crate::interactive::ui::events::Message;
    use crate::schemas::SearchResult;
    use crate::search::fallback_results;
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

    fn find(id: &str) -> SearchResult {
        fallback_results()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap()
    }

    fn render(list: &mut ResultList, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| list.render(f, Rect::new(0, 0, width, height)))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_rows_follow_group_order_with_flat_indices() {
        let mut list = ResultList::new();
        // Ranked: the transaction outranks the repo.
        list.set_results(&[find("t1"), find("r1")]);

        assert_eq!(list.rows(), &[None, Some(1), None, Some(0)]);
    }

    #[test]
    fn test_render_shows_headings_and_titles() {
        let mut list = ResultList::new();
        list.set_results(&[find("t1"), find("r1")]);

        let lines = render(&mut list, 50, 4);

        assert!(lines[0].starts_with("REPOS"));
        assert!(lines[1].contains("atlas-app"));
        assert!(lines[2].starts_with("TRANSACTIONS"));
        assert!(lines[3].contains("AWS invoice"));
        // Selection marker sits on flat index 0, drawn last.
        assert!(lines[3].starts_with("▶"));
    }

    #[test]
    fn test_meta_is_flush_right_without_subtitle() {
        let mut list = ResultList::new();
        list.set_results(&[find("t1")]);

        let lines = render(&mut list, 50, 2);

        assert!(lines[1].contains("AWS invoice"));
        assert!(lines[1].ends_with("Paid "));
        assert_eq!(lines[1].find("Paid"), Some(lines[1].len() - 5));
    }

    #[test]
    fn test_subtitle_replaces_meta() {
        let mut result = find("t1");
        result.subtitle = Some("Quarterly hosting".to_string());
        let mut list = ResultList::new();
        list.set_results(&[result]);

        let lines = render(&mut list, 50, 2);

        assert!(lines[1].contains("AWS invoice  Quarterly hosting"));
        assert!(!lines[1].contains("Paid"));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut list = ResultList::new();
        list.set_results(fallback_results());
        assert_eq!(list.rows().len(), 20);

        list.set_selected_index(13);
        render(&mut list, 60, 5);
        assert_eq!(list.scroll_offset(), 15);

        list.set_selected_index(0);
        render(&mut list, 60, 5);
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_hit_test_maps_rows_to_results() {
        let mut list = ResultList::new();
        list.set_results(fallback_results());
        render(&mut list, 60, 5);

        assert_eq!(list.hit_test(0, 0), None); // heading
        assert_eq!(list.hit_test(5, 1), Some(0));
        assert_eq!(list.hit_test(5, 3), Some(2));
        assert_eq!(list.hit_test(5, 4), None);
        assert_eq!(list.hit_test(5, 9), None); // outside
    }

    #[test]
    fn test_new_results_reset_scroll() {
        let mut list = ResultList::new();
        list.set_results(fallback_results());
        list.set_selected_index(13);
        render(&mut list, 60, 5);
        assert!(list.scroll_offset() > 0);

        list.set_results(&[find("n1")]);
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_navigation_keys() {
        let mut list = ResultList::new();

        assert!(matches!(
            list.handle_key(create_key_event(KeyCode::Down)),
            Some(Message::SelectNext)
        ));
        assert!(matches!(
            list.handle_key(create_key_event(KeyCode::Up)),
            Some(Message::SelectPrevious)
        ));
        assert!(matches!(
            list.handle_key(create_key_event(KeyCode::Enter)),
            Some(Message::ActivateSelected)
        ));
        assert!(list.handle_key(create_key_event(KeyCode::Char('x'))).is_none());
    }
}
