//! Terminal input: event → command mapping and the per-tick flap latch.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// What a terminal event asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    Restart,
    Quit,
}

/// Map one terminal event to a command. Unrecognized input yields `None`.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => command_for_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => Some(Command::Flap),
            _ => None,
        },
        _ => None,
    }
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char(' ') => Some(Command::Flap),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Collapses any number of flap presses between two ticks into one.
#[derive(Debug, Default)]
pub struct FlapLatch {
    pressed: bool,
}

impl FlapLatch {
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Sample and clear.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    pub fn clear(&mut self) {
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_space_and_click_flap() {
        assert_eq!(command_for(&key(KeyCode::Char(' '))), Some(Command::Flap));
        assert_eq!(
            command_for(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Command::Flap)
        );
    }

    #[test]
    fn test_any_mouse_button_flaps() {
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            assert_eq!(
                command_for(&mouse(MouseEventKind::Down(button))),
                Some(Command::Flap)
            );
        }
        assert_eq!(command_for(&mouse(MouseEventKind::Up(MouseButton::Left))), None);
    }

    #[test]
    fn test_other_input_ignored() {
        assert_eq!(command_for(&key(KeyCode::Up)), None);
        assert_eq!(command_for(&key(KeyCode::Enter)), None);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&mouse(MouseEventKind::Moved)), None);
        assert_eq!(command_for(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(command_for(&release), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            command_for(&Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Command::Quit)
        );
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Some(Command::Restart));
    }

    #[test]
    fn test_latch_collapses_presses() {
        let mut latch = FlapLatch::default();
        assert!(!latch.take());
        latch.press();
        latch.press();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_latch_clear() {
        let mut latch = FlapLatch::default();
        latch.press();
        latch.clear();
        assert!(!latch.take());
    }
}
