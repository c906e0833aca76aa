use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::viewport::Direction;

/// Handle a key event.
///
/// Every key except the first `g` of `gg` drops a pending `g`.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if key.code == KeyCode::Char('g') && !ctrl {
        app.press_top_key();
        return;
    }
    app.clear_pending();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if ctrl => app.quit(),

        KeyCode::Up => app.move_cursor(Direction::Up),
        KeyCode::Char('k') if !ctrl => app.move_cursor(Direction::Up),
        KeyCode::Down => app.move_cursor(Direction::Down),
        KeyCode::Char('j') if !ctrl => app.move_cursor(Direction::Down),

        KeyCode::Char('u') if ctrl => app.half_page(Direction::Up),
        KeyCode::Char('d') if ctrl => app.half_page(Direction::Down),
        KeyCode::Char('b') if ctrl => app.full_page(Direction::Up),
        KeyCode::Char('f') if ctrl => app.full_page(Direction::Down),

        KeyCode::Char('G') => app.jump_bottom(),

        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),

        _ => {}
    }
}
