use std::fmt;

/// Подпись вместо оставшегося/общего времени в режиме без ограничения повторов
pub const UNBOUNDED_LABEL: &str = "Бесконечный цикл";

/// Перевести секунды в строку `HH:MM:SS`.
///
/// Округление до целых секунд к ближайшему чётному при .5, часы не
/// сворачиваются по модулю 24.
pub fn convert_seconds_to_hms(seconds: f64) -> String {
    let total = seconds.max(0.0).round_ties_even() as u64;
    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Строка таблицы прогресса: всё выводится из `completed * interval`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRow {
    pub completed: u64,
    pub elapsed_secs: f64,
    /// `None` в режиме без ограничения повторов
    pub remaining_secs: Option<f64>,
    pub total_secs: Option<f64>,
}

impl ProgressRow {
    /// Строка, с которой таблица начинается до первого запуска
    pub fn initial() -> Self {
        Self {
            completed: 0,
            elapsed_secs: 0.0,
            remaining_secs: Some(0.0),
            total_secs: Some(0.0),
        }
    }

    pub fn compute(completed: u64, interval: f64, counts: Option<u64>) -> Self {
        let elapsed_secs = completed as f64 * interval;
        let (remaining_secs, total_secs) = match counts {
            Some(counts) => (
                Some(counts.saturating_sub(completed) as f64 * interval),
                Some(counts as f64 * interval),
            ),
            None => (None, None),
        };

        Self {
            completed,
            elapsed_secs,
            remaining_secs,
            total_secs,
        }
    }

    pub fn elapsed(&self) -> String {
        convert_seconds_to_hms(self.elapsed_secs)
    }

    pub fn remaining(&self) -> String {
        self.remaining_secs
            .map(convert_seconds_to_hms)
            .unwrap_or_else(|| UNBOUNDED_LABEL.to_string())
    }

    pub fn total(&self) -> String {
        self.total_secs
            .map(convert_seconds_to_hms)
            .unwrap_or_else(|| UNBOUNDED_LABEL.to_string())
    }
}

/// Чем закончился запуск
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Выполнено заданное число повторов
    Completed,
    /// Остановлено пользователем
    Stopped,
    /// Инъекция клавиш завершилась ошибкой
    Failed(String),
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "Выполнено"),
            RunOutcome::Stopped => write!(f, "Остановлено"),
            RunOutcome::Failed(reason) => write!(f, "Ошибка: {}", reason),
        }
    }
}

/// Сообщения от рабочего потока к интерфейсу
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Started,
    Progress(ProgressRow),
    Finished { outcome: RunOutcome, completed: u64 },
}
