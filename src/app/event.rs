// Keyboard event handling
//
// Maps key presses to state transitions. All mutation still goes through
// the AppState methods; this is just the dispatch table.

use super::AppState;
use crossterm::event::KeyCode;

/// Handle a key press. Returns `false` when the application should exit.
///
/// # Key Bindings
/// - `q`, `Q` - Quit
/// - `Left` / `Right` - Previous / next category (starts a fetch)
/// - `Up` / `Down` - Move the card cursor
/// - `Enter` - Select the laureate under the cursor
/// - `Tab` / `BackTab` - Step through map markers
/// - `PageDown` / `PageUp` - Scroll the popup roster by a page
/// - `1`-`9` - Follow the popup's numbered link (visible page)
/// - `Esc` - Clear the selection
/// - `r`, `R` - Reset the view
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    // A notice is blocking: any key dismisses it, nothing else happens.
    if app.notice.is_some() {
        app.dismiss_notice();
        return true;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
            false
        }
        KeyCode::Left => {
            app.prev_category();
            true
        }
        KeyCode::Right => {
            app.next_category();
            true
        }
        KeyCode::Up => {
            app.cursor_up();
            true
        }
        KeyCode::Down => {
            app.cursor_down();
            true
        }
        KeyCode::Enter => {
            app.select_under_cursor();
            true
        }
        KeyCode::Tab => {
            app.cycle_marker(1);
            true
        }
        KeyCode::BackTab => {
            app.cycle_marker(-1);
            true
        }
        KeyCode::PageDown => {
            app.popup_scroll_down();
            true
        }
        KeyCode::PageUp => {
            app.popup_scroll_up();
            true
        }
        KeyCode::Esc => {
            app.clear_selection();
            true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_view();
            true
        }
        KeyCode::Char(c @ '1'..='9') => {
            app.follow_popup_link(c as usize - '1' as usize);
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, CategoryContext, CategoryResponse, RawLaureate};
    use crate::app::Selection;

    #[test]
    fn quit_key_stops_the_app() {
        let mut app = AppState::new("http://unused.invalid");
        assert!(app.running);

        let keep_running = handle_key_event(&mut app, KeyCode::Char('q'));

        assert!(!keep_running);
        assert!(!app.running);
    }

    #[test]
    fn any_key_dismisses_a_notice_and_does_nothing_else() {
        let mut app = AppState::new("http://unused.invalid");
        app.notice = Some("Failed to load laureate data".to_string());

        let keep_running = handle_key_event(&mut app, KeyCode::Char('q'));

        // Even the quit key only dismisses the notice.
        assert!(keep_running);
        assert!(app.running);
        assert!(app.notice.is_none());
    }

    #[test]
    fn category_keys_cycle_the_selector_and_start_a_fetch() {
        let mut app = AppState::new("http://unused.invalid");
        let initial = app.context_index;

        handle_key_event(&mut app, KeyCode::Right);
        assert_eq!(app.context_index, initial + 1);
        assert!(app.pending_seq.is_some());

        handle_key_event(&mut app, KeyCode::Left);
        assert_eq!(app.context_index, initial);
    }

    #[test]
    fn escape_clears_the_selection() {
        let mut app = AppState::new("http://unused.invalid");
        handle_key_event(&mut app, KeyCode::Esc);
        assert_eq!(app.selection, Selection::Idle);
    }

    #[test]
    fn page_keys_scroll_the_roster() {
        let laureates = (0..12)
            .map(|i| RawLaureate {
                laureate_id: format!("m{i}"),
                name: format!("Laureate m{i}"),
                prize_year: 1950,
                category: None,
                achievement: "for testing".to_string(),
                birth_lat: 40.0,
                birth_lon: -74.0,
                birth_location: "Birthville".to_string(),
                work_lat: 40.0,
                work_lon: -74.0,
                work_location: "Workburg".to_string(),
                work_years: "1945-1950".to_string(),
                shared_with: Vec::new(),
            })
            .collect();
        let mut app = AppState::new("http://unused.invalid");
        app.apply_laureates(
            CategoryResponse {
                category: "Physics".to_string(),
                laureates,
            },
            CategoryContext::Single(Category::Physics),
        );
        app.select_group_marker(0);

        handle_key_event(&mut app, KeyCode::PageDown);
        assert_eq!(app.scene.popup.as_ref().unwrap().scroll, 9);

        handle_key_event(&mut app, KeyCode::PageUp);
        assert_eq!(app.scene.popup.as_ref().unwrap().scroll, 0);
    }
}
