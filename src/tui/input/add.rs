use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

/// Keys while the add-task prompt is open: type the name, Tab/BackTab to
/// pick the bucket, Enter to add, Esc to cancel.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.cancel_add(),
        KeyCode::Enter => return app.submit_add(),
        _ => {}
    }

    let buckets = app.board.settings.buckets.len();
    let prompt = &mut app.add;
    match (key.modifiers, key.code) {
        (_, KeyCode::Tab) => prompt.bucket = (prompt.bucket + 1) % buckets,
        (_, KeyCode::BackTab) => prompt.bucket = (prompt.bucket + buckets - 1) % buckets,

        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.cursor = next;
            }
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => prompt.cursor = 0,
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            prompt.cursor = prompt.buffer.len();
        }

        // Word backspace (Alt or Ctrl)
        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            let start = unicode::word_boundary_left(&prompt.buffer, prompt.cursor);
            prompt.buffer.drain(start..prompt.cursor);
            prompt.cursor = start;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let start = unicode::word_boundary_left(&prompt.buffer, prompt.cursor);
            prompt.buffer.drain(start..prompt.cursor);
            prompt.cursor = start;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.buffer.drain(prev..prompt.cursor);
                prompt.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&prompt.buffer, prompt.cursor) {
                prompt.buffer.drain(prompt.cursor..next);
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            prompt.buffer.insert(prompt.cursor, c);
            prompt.cursor += c.len_utf8();
        }
        _ => {}
    }
}
