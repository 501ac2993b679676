use super::command::run_tool;
use super::r#trait::WindowBackend;
use crate::error::Result;
use crate::events::WindowInfo;

pub struct WmctrlBackend;

impl WmctrlBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Первое слово строки и остаток
fn next_field(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Строка `wmctrl -l`: `<id> <desktop> <host> <title>`
fn parse_line(line: &str) -> Option<WindowInfo> {
    let (id, rest) = next_field(line);
    if !id.starts_with("0x") {
        return None;
    }
    let (_desktop, rest) = next_field(rest);
    let (_host, rest) = next_field(rest);
    Some(WindowInfo::new(id, rest.trim()))
}

impl WindowBackend for WmctrlBackend {
    fn name(&self) -> &'static str {
        "wmctrl"
    }

    fn probe(&self) -> Result<()> {
        run_tool("wmctrl", &["-m"]).map(|_| ())
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let stdout = run_tool("wmctrl", &["-l"])?;
        Ok(stdout.lines().filter_map(parse_line).collect())
    }

    fn focus(&self, window: &WindowInfo) -> Result<()> {
        run_tool("wmctrl", &["-i", "-a", &window.id]).map(|_| ())
    }
}
