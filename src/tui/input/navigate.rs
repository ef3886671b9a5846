use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::Direction;
use crate::tui::app::{App, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Any key dismisses the last message
    app.message = None;

    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Views
        (KeyModifiers::NONE, KeyCode::Tab) => {
            let next = app.view.next();
            app.set_view(next);
        }
        (_, KeyCode::Char('1')) => app.set_view(View::Today),
        (_, KeyCode::Char('2')) => app.set_view(View::Progress),
        (_, KeyCode::Char('3')) => app.set_view(View::Trends),
        (_, KeyCode::Char('g')) if app.view == View::Trends => app.cycle_granularity(),
        (_, KeyCode::Char('r')) => app.reload(),

        _ if app.view == View::Today => handle_today(app, key),
        _ => {}
    }
}

fn handle_today(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor_pos += 1;
            app.clamp_cursor();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor_pos = app.cursor_pos.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.cursor_bucket + 1 < app.column_count() {
                app.cursor_bucket += 1;
                app.clamp_cursor();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.cursor_bucket = app.cursor_bucket.saturating_sub(1);
            app.clamp_cursor();
        }

        // Edits
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('K') => app.move_selected(Direction::Up),
        KeyCode::Char('J') => app.move_selected(Direction::Down),
        KeyCode::Char('a') => app.begin_add(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::model::task::HOLDING_TANK;
    use crate::tui::app::{App, Mode, View};
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::{ch, key};
    use crate::tui::render::test_helpers::test_app;
    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            handle_key(app, ch(c));
        }
    }

    #[test]
    fn cursor_moves_between_columns() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        press(&mut app, "lll");
        assert_eq!(app.cursor_bucket, 2);
        assert_eq!(app.column_bucket(app.cursor_bucket), HOLDING_TANK);
        press(&mut app, "hhhh");
        assert_eq!(app.cursor_bucket, 0);
    }

    #[test]
    fn cursor_stays_inside_column() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        press(&mut app, "jjjj");
        assert_eq!(app.cursor_pos, 1); // Health has two tasks
        press(&mut app, "kkkk");
        assert_eq!(app.cursor_pos, 0);
    }

    #[test]
    fn space_toggles_and_shift_moves() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        handle_key(&mut app, ch(' '));
        assert!(app.tasks[0].completed);

        press(&mut app, "J");
        assert_eq!(app.cursor_pos, 1);
        assert_eq!(app.tasks[0].name, "Run");
        assert_eq!(app.tasks[1].name, "Stretch");
        assert!(app.tasks[1].completed);
    }

    #[test]
    fn tab_cycles_views() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, View::Progress);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, View::Trends);
        assert!(app.trend.is_some());
        press(&mut app, "g");
        assert_eq!(app.granularity.label(), "week");
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, View::Today);
    }

    #[test]
    fn edit_keys_only_apply_to_today() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        press(&mut app, "2 ");
        assert!(!app.tasks[0].completed);
        press(&mut app, "a");
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn help_and_quit() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        press(&mut app, "?");
        assert!(app.show_help);
        press(&mut app, "q");
        assert!(!app.should_quit);
        handle_key(&mut app, key(KeyCode::Esc));
        press(&mut app, "q");
        assert!(app.should_quit);
    }
}
