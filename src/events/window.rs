use std::fmt;

/// Окно верхнего уровня, найденное при старте.
///
/// `id` — непрозрачный идентификатор конкретного бэкенда (X11 id для
/// wmctrl/xdotool, con_id для sway), `title` — отображаемое имя.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowInfo {
    pub id: String,
    pub title: String,
    pub class: String,
}

impl WindowInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            class: String::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Подпись для выпадающего списка
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "\"{}\" [{}]", self.title, self.id)
        } else {
            write!(f, "\"{}\" ({}) [{}]", self.title, self.class, self.id)
        }
    }
}
