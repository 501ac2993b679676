use crate::error::{Result, TimerError};
use crate::events::KeyCode;
use crate::mappings::KeyNames;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Сочетание клавиш, заданное строкой вида `ctrl+shift+esc`.
///
/// Хранит исходную строку (она же пишется в settings.json) и коды клавиш
/// в порядке нажатия.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    raw: String,
    keys: SmallVec<[KeyCode; 4]>,
}

impl Hotkey {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(TimerError::Validation("Сочетание клавиш не может быть пустым".to_string()));
        }

        let mut keys = SmallVec::new();
        for part in raw.split('+') {
            if part.is_empty() {
                return Err(crate::timer_error!(
                    validation,
                    "Пустое имя клавиши в сочетании '{}'",
                    raw
                ));
            }
            keys.push(KeyCode(KeyNames::translate(part)?));
        }

        Ok(Self {
            raw: raw.to_string(),
            keys,
        })
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Hotkey {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}
