use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key input as understood by the wizard stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardInput {
    Char(char),
    Backspace,
    Up,
    Down,
    Submit,
    Abort,
}

pub fn map_key(key: KeyEvent) -> Option<WizardInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(WizardInput::Abort),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(WizardInput::Char(c)),
        KeyCode::Backspace => Some(WizardInput::Backspace),
        KeyCode::Enter => Some(WizardInput::Submit),
        KeyCode::Up => Some(WizardInput::Up),
        KeyCode::Down => Some(WizardInput::Down),
        _ => None,
    }
}
