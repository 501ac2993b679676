pub mod hotkey;
pub mod keyboard;
pub mod progress;
pub mod window;

pub use hotkey::Hotkey;
pub use keyboard::{KeyCode, KeyState};
pub use progress::{ProgressRow, RunOutcome, WorkerEvent};
pub use window::WindowInfo;

/// События для виртуальной клавиатуры
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualKeyEvent {
    pub key_code: KeyCode,
    pub state: KeyState,
}

impl VirtualKeyEvent {
    pub fn new(key_code: KeyCode, state: KeyState) -> Self {
        Self { key_code, state }
    }

    pub fn press(key_code: KeyCode) -> Self {
        Self::new(key_code, KeyState::Pressed)
    }

    pub fn release(key_code: KeyCode) -> Self {
        Self::new(key_code, KeyState::Released)
    }

    /// Последовательность событий для сочетания: нажатия по порядку,
    /// затем отпускания в обратном порядке
    pub fn chord(hotkey: &Hotkey) -> Vec<VirtualKeyEvent> {
        let keys = hotkey.keys();
        keys.iter()
            .copied()
            .map(Self::press)
            .chain(keys.iter().rev().copied().map(Self::release))
            .collect()
    }
}
