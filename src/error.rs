use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка сериализации настроек: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ошибка uinput: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Неизвестная клавиша: {0}")]
    InvalidKey(String),

    #[error("Ошибка менеджера окон: {0}")]
    WindowTool(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Задача уже выполняется")]
    Busy,

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<figment::Error> for TimerError {
    fn from(err: figment::Error) -> Self {
        TimerError::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! timer_error {
    (validation, $($arg:tt)*) => {
        $crate::error::TimerError::Validation(format!($($arg)*))
    };
    (invalid_key, $($arg:tt)*) => {
        $crate::error::TimerError::InvalidKey(format!($($arg)*))
    };
    (window_tool, $($arg:tt)*) => {
        $crate::error::TimerError::WindowTool(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::TimerError::Permission(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::TimerError::Internal(format!($($arg)*))
    };
}
