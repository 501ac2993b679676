use super::dry_run::DryRunBackend;
use super::r#trait::WindowBackend;
use super::sway::SwayBackend;
use super::wmctrl::WmctrlBackend;
use super::xdotool::XdotoolBackend;
use crate::events::WindowInfo;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DesktopEnvironment {
    Kde,
    Sway,
    X11Generic,
    Unknown,
}

fn detect_desktop_environment() -> DesktopEnvironment {
    if std::env::var_os("SWAYSOCK").is_some() {
        return DesktopEnvironment::Sway;
    }

    if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
        if desktop.to_lowercase().contains("kde") {
            return DesktopEnvironment::Kde;
        }
    }

    match std::env::var("XDG_SESSION_TYPE").as_deref() {
        Ok("x11") => DesktopEnvironment::X11Generic,
        _ => DesktopEnvironment::Unknown,
    }
}

/// Порядок опроса бэкендов для среды рабочего стола
fn candidates(env: DesktopEnvironment) -> Vec<Arc<dyn WindowBackend>> {
    let sway: Arc<dyn WindowBackend> = Arc::new(SwayBackend::new());
    let kdotool: Arc<dyn WindowBackend> = Arc::new(XdotoolBackend::kdotool());
    let wmctrl: Arc<dyn WindowBackend> = Arc::new(WmctrlBackend::new());
    let xdotool: Arc<dyn WindowBackend> = Arc::new(XdotoolBackend::xdotool());

    match env {
        DesktopEnvironment::Sway => vec![sway, wmctrl, xdotool],
        DesktopEnvironment::Kde => vec![kdotool, wmctrl, xdotool],
        DesktopEnvironment::X11Generic => vec![wmctrl, xdotool],
        DesktopEnvironment::Unknown => vec![wmctrl, xdotool, kdotool, sway],
    }
}

/// Снимок окон верхнего уровня, сделанный один раз при старте.
///
/// Список не обновляется: закрытые после старта окна остаются в нём,
/// новые не появляются.
pub struct WindowDirectory {
    backend: Option<Arc<dyn WindowBackend>>,
    windows: Vec<WindowInfo>,
}

impl WindowDirectory {
    /// Найти рабочий бэкенд и перечислить окна
    pub fn discover(dry_run: bool) -> Self {
        if dry_run {
            return Self::with_backend(Arc::new(DryRunBackend));
        }

        let env = detect_desktop_environment();
        info!("Обнаружена среда рабочего стола: {:?}", env);

        for backend in candidates(env) {
            match backend.probe() {
                Ok(()) => {
                    info!("Используем {} для работы с окнами", backend.name());
                    return Self::with_backend(backend);
                }
                Err(e) => info!("{} недоступен: {}", backend.name(), e),
            }
        }

        warn!("Ни один способ работы с окнами не работает, выбор окна недоступен");
        Self {
            backend: None,
            windows: Vec::new(),
        }
    }

    pub fn with_backend(backend: Arc<dyn WindowBackend>) -> Self {
        let windows = match backend.list_windows() {
            Ok(windows) => windows,
            Err(e) => {
                warn!("{}: не удалось получить список окон: {}", backend.name(), e);
                Vec::new()
            }
        };
        info!("Найдено окон: {}", windows.len());

        Self {
            backend: Some(backend),
            windows,
        }
    }

    pub fn windows(&self) -> &[WindowInfo] {
        &self.windows
    }

    pub fn backend(&self) -> Option<Arc<dyn WindowBackend>> {
        self.backend.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_directory_has_fake_windows() {
        let directory = WindowDirectory::discover(true);
        assert_eq!(directory.windows().len(), 3);

        let backend = directory.backend().unwrap();
        assert_eq!(backend.name(), "dry-run");
        assert!(backend.focus(&directory.windows()[0]).is_ok());
    }

    #[test]
    fn test_sway_is_tried_first_under_sway() {
        let names: Vec<&str> = candidates(DesktopEnvironment::Sway)
            .iter()
            .map(|b| b.name())
            .collect();
        assert_eq!(names, vec!["swaymsg", "wmctrl", "xdotool"]);
    }
}
