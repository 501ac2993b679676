use crate::error::Result;
use crate::events::WindowInfo;

/// Бэкенд менеджера окон: перечисление окон верхнего уровня и вывод окна на передний план
pub trait WindowBackend: Send + Sync {
    /// Имя для логов
    fn name(&self) -> &'static str;

    /// Проверить, что утилита установлена и работает в текущей сессии
    fn probe(&self) -> Result<()>;

    fn list_windows(&self) -> Result<Vec<WindowInfo>>;

    /// Best-effort: успех означает только то, что команда принята
    fn focus(&self, window: &WindowInfo) -> Result<()>;
}
