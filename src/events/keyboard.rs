use crate::mappings::KeyNames;
use std::fmt;

/// Состояние клавиши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    /// Значение поля value для EV_KEY
    pub fn value(self) -> i32 {
        match self {
            KeyState::Pressed => 1,
            KeyState::Released => 0,
        }
    }
}

/// Код клавиши (evdev коды)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KeyNames::reverse_translate(self.0) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "KEY_{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_display() {
        assert_eq!(KeyCode(29).to_string(), "ctrl");
        assert_eq!(KeyCode(20).to_string(), "t");
        assert_eq!(KeyCode(999).to_string(), "KEY_999");
    }

    #[test]
    fn test_key_state_values() {
        assert_eq!(KeyState::Pressed.value(), 1);
        assert_eq!(KeyState::Released.value(), 0);
    }
}
