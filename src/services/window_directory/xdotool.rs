use super::command::run_tool;
use super::r#trait::WindowBackend;
use crate::error::Result;
use crate::events::WindowInfo;
use tracing::debug;

/// xdotool и kdotool (KDE Wayland) понимают одинаковые команды
pub struct XdotoolBackend {
    program: &'static str,
    search_args: &'static [&'static str],
}

impl XdotoolBackend {
    pub fn xdotool() -> Self {
        Self {
            program: "xdotool",
            search_args: &["search", "--onlyvisible", "--name", "."],
        }
    }

    pub fn kdotool() -> Self {
        Self {
            program: "kdotool",
            search_args: &["search", "--name", "."],
        }
    }
}

impl WindowBackend for XdotoolBackend {
    fn name(&self) -> &'static str {
        self.program
    }

    fn probe(&self) -> Result<()> {
        run_tool(self.program, &["getactivewindow"]).map(|_| ())
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let ids = run_tool(self.program, self.search_args)?;

        let mut windows = Vec::new();
        for id in ids.lines().map(str::trim).filter(|id| !id.is_empty()) {
            match run_tool(self.program, &["getwindowname", id]) {
                Ok(title) => windows.push(WindowInfo::new(id, title.trim())),
                // Окно могло закрыться между search и getwindowname
                Err(e) => debug!("{}: пропускаем окно {}: {}", self.program, id, e),
            }
        }
        Ok(windows)
    }

    fn focus(&self, window: &WindowInfo) -> Result<()> {
        run_tool(self.program, &["windowactivate", &window.id]).map(|_| ())
    }
}
