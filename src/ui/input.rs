/// Input layer: non-blocking key polling and key→step mapping.
///
/// The game is turn-based (one cell per key press), so unlike a
/// hold-to-run action game there is no held-key tracking here; press
/// events are all that matter.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Wait up to `timeout` for a key press. Repeat and release events are
/// dropped so one physical press is one turn.
pub fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// WASD / arrow keys to a unit grid step. The y axis grows downward,
/// matching the renderer's row order.
pub fn movement(code: KeyCode) -> Option<(i32, i32)> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some((0, -1)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some((0, 1)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some((-1, 0)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some((1, 0)),
        _ => None,
    }
}

/// Tracks the two-key `:q` chord that saves and quits mid-game.
pub struct QuitChord {
    armed: bool,
}

impl QuitChord {
    pub fn new() -> Self {
        QuitChord { armed: false }
    }

    /// Feed one key. Returns true when `:` followed by `q` completes.
    /// Any other key after `:` disarms the chord.
    pub fn offer(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(':') => {
                self.armed = true;
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if self.armed => {
                self.armed = false;
                true
            }
            _ => {
                self.armed = false;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_mapping() {
        assert_eq!(movement(KeyCode::Char('w')), Some((0, -1)));
        assert_eq!(movement(KeyCode::Down), Some((0, 1)));
        assert_eq!(movement(KeyCode::Char('A')), Some((-1, 0)));
        assert_eq!(movement(KeyCode::Right), Some((1, 0)));
        assert_eq!(movement(KeyCode::Char('p')), None);
    }

    #[test]
    fn quit_chord_fires_only_on_colon_then_q() {
        let mut chord = QuitChord::new();
        assert!(!chord.offer(KeyCode::Char('q'))); // bare q does nothing
        assert!(!chord.offer(KeyCode::Char(':')));
        assert!(chord.offer(KeyCode::Char('q')));

        assert!(!chord.offer(KeyCode::Char(':')));
        assert!(!chord.offer(KeyCode::Char('x'))); // disarms
        assert!(!chord.offer(KeyCode::Char('q')));
    }
}
