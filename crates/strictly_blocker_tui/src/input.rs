//! Keyboard input decoded into directions.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strictly_blocker::{Direction, InputSource};
use tracing::{debug, instrument};

/// What a key press means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Resolve a move (possibly `Stay`).
    Move(Direction),
    /// Leave the game.
    Quit,
}

/// Decodes a key press.
///
/// Arrow keys, WASD and HJKL move; `q`, Esc and Ctrl-C quit. Any other key
/// is a press of no direction.
#[instrument]
pub fn decode_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Direction::Right,
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => Direction::Stay,
    };
    KeyAction::Move(direction)
}

/// Blocking keyboard reader.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    type Error = std::io::Error;

    fn next_direction(&mut self) -> Result<Option<Direction>, Self::Error> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = decode_key(key);
                    debug!(?action, "Key decoded");
                    return Ok(match action {
                        KeyAction::Move(direction) => Some(direction),
                        KeyAction::Quit => None,
                    });
                }
                // Redraw on resize.
                Event::Resize(..) => return Ok(Some(Direction::Stay)),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode_key(press(KeyCode::Up)), KeyAction::Move(Direction::Up));
        assert_eq!(decode_key(press(KeyCode::Down)), KeyAction::Move(Direction::Down));
        assert_eq!(decode_key(press(KeyCode::Left)), KeyAction::Move(Direction::Left));
        assert_eq!(decode_key(press(KeyCode::Right)), KeyAction::Move(Direction::Right));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(decode_key(press(KeyCode::Char('w'))), KeyAction::Move(Direction::Up));
        assert_eq!(decode_key(press(KeyCode::Char('h'))), KeyAction::Move(Direction::Left));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(decode_key(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(decode_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            decode_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(decode_key(press(KeyCode::Char('x'))), KeyAction::Move(Direction::Stay));
        assert_eq!(decode_key(press(KeyCode::Enter)), KeyAction::Move(Direction::Stay));
    }
}
