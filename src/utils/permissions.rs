use crate::error::{Result, TimerError};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing::{info, warn};

const UINPUT_DEVICE: &str = "/dev/uinput";

/// Проверить права доступа к /dev/uinput
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    check_uinput_access(Path::new(UINPUT_DEVICE))?;
    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

fn check_uinput_access(device: &Path) -> Result<()> {
    if !device.exists() {
        warn!("{} не существует, возможно модуль uinput не загружен", device.display());
        return Ok(()); // Не критичная ошибка, модуль может быть загружен позже
    }

    // Открытие на запись проверяет реальные права, а не только биты режима
    match OpenOptions::new().write(true).open(device) {
        Ok(_) => {
            info!("Доступ к {} подтвержден", device.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(TimerError::Permission(format!(
            "Нет прав на запись в {}. Выполните:\n{}",
            device.display(),
            get_setup_commands().join("\n")
        ))),
        Err(e) => Err(crate::timer_error!(
            permission,
            "Не удалось открыть {}: {}",
            device.display(),
            e
        )),
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группу 'input'");
            warn!("   и запускать приложение от имени обычного пользователя");
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

/// Получить рекомендуемые команды для настройки прав доступа
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "sudo usermod -a -G input $USER".to_string(),
        "sudo modprobe uinput".to_string(),
        "echo 'uinput' | sudo tee /etc/modules-load.d/uinput.conf".to_string(),
        "# После выполнения команд перезайдите в систему".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_commands() {
        let commands = get_setup_commands();
        assert!(!commands.is_empty());
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
        assert!(commands.iter().any(|cmd| cmd.contains("modprobe")));
    }

    #[test]
    fn test_missing_device_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_uinput_access(&dir.path().join("uinput")).is_ok());
    }
}
