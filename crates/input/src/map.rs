//! Mapping from terminal events to application actions and pointer events.

use crate::types::{AppAction, PointerEvent, Vec2};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to application actions.
pub fn handle_key_event(key: KeyEvent) -> Option<AppAction> {
    if should_quit(key) {
        return Some(AppAction::Quit);
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(AppAction::RestartLevel),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => Some(AppAction::NextLevel),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a mouse event to a pointer event in world space.
///
/// Only the left button drives the puzzle. Plain moves are forwarded too so a
/// drag keeps following the cursor on terminals that report them.
pub fn pointer_event(mouse: MouseEvent, to_world: impl Fn(u16, u16) -> Vec2) -> Option<PointerEvent> {
    let world = || to_world(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Pressed(world())),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::Moved(world()))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Released(world())),
        _ => None,
    }
}
