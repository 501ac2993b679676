use crate::error::{Result, TimerError};
use std::process::Command;
use tracing::debug;

/// Запустить внешнюю утилиту и вернуть её stdout
pub fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    debug!("Запуск {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| TimerError::WindowTool(format!("{} не найден: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("{} вернул ошибку: {}", program, stderr.trim());
        return Err(TimerError::WindowTool(format!(
            "{} {} завершился с {}: {}",
            program,
            args.join(" "),
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
