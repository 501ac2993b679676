//! Каталог окон: перечисление окон верхнего уровня при старте и вывод
//! выбранного окна на передний план.
//!
//! Модуль ничего не знает о таймере и сочетаниях клавиш; рабочий поток
//! получает только `Arc<dyn WindowBackend>` для фокусировки.

mod command;
mod directory;
mod dry_run;
mod sway;
mod r#trait;
mod wmctrl;
mod xdotool;

pub use self::directory::WindowDirectory;
pub use self::r#trait::WindowBackend;
