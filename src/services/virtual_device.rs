use crate::error::{Result, TimerError};
use crate::events::{Hotkey, VirtualKeyEvent};
use parking_lot::Mutex;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const EV_SYN: i32 = 0;
const EV_KEY: i32 = 1;
const SYN_REPORT: i32 = 0;

// Композитор подхватывает новое устройство не сразу, ранние события теряются
const DEVICE_SETTLE: Duration = Duration::from_millis(200);

/// Отправка сочетаний клавиш в систему
pub trait KeystrokeInjector: Send + Sync {
    fn send_hotkey(&self, hotkey: &Hotkey) -> Result<()>;
}

pub struct VirtualDevice {
    device: Option<Mutex<uinput::Device>>,
    device_name: String,
    dry_run: bool,
}

impl VirtualDevice {
    pub fn new(device_name: &str, dry_run: bool) -> Result<Self> {
        info!("Инициализация VirtualDevice '{}' (dry_run: {})", device_name, dry_run);

        let device = if dry_run {
            None
        } else {
            Some(Mutex::new(Self::create_virtual_device(device_name)?))
        };

        Ok(Self {
            device,
            device_name: device_name.to_string(),
            dry_run,
        })
    }

    fn create_virtual_device(device_name: &str) -> Result<uinput::Device> {
        info!("Создание виртуального устройства uinput '{}' для инъекции клавиш", device_name);

        let virtual_device = uinput::default()?
            .name(device_name)?
            .event(uinput::event::Keyboard::All)?
            .create()
            .map_err(|e| {
                TimerError::Internal(format!(
                    "Не удалось создать виртуальное устройство '{}': {}",
                    device_name, e
                ))
            })?;

        thread::sleep(DEVICE_SETTLE);
        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(virtual_device)
    }

    pub fn send_event(&self, event: VirtualKeyEvent) -> Result<()> {
        if self.dry_run {
            info!("[DRY RUN] Виртуальное событие: {} {:?}", event.key_code, event.state);
            return Ok(());
        }

        let device = self
            .device
            .as_ref()
            .ok_or_else(|| TimerError::Internal("Виртуальное устройство недоступно".to_string()))?;
        let mut device = device.lock();

        let keycode = event.key_code.value() as i32;
        device.write(EV_KEY, keycode, event.state.value()).map_err(|e| {
            TimerError::Internal(format!("Не удалось отправить событие клавиши {}: {}", keycode, e))
        })?;
        device
            .write(EV_SYN, SYN_REPORT, 0)
            .map_err(|e| TimerError::Internal(format!("Не удалось синхронизировать события: {}", e)))?;

        debug!("Виртуальное событие {} {:?} отправлено", event.key_code, event.state);
        Ok(())
    }

    /// Отпустить все клавиши сочетания, ошибки только логируются
    fn release_all(&self, hotkey: &Hotkey) {
        for key in hotkey.keys().iter().rev() {
            if let Err(e) = self.send_event(VirtualKeyEvent::release(*key)) {
                warn!("Не удалось отпустить {}: {}", key, e);
            }
        }
    }
}

impl KeystrokeInjector for VirtualDevice {
    fn send_hotkey(&self, hotkey: &Hotkey) -> Result<()> {
        debug!("Отправка сочетания {} через '{}'", hotkey, self.device_name);

        for event in VirtualKeyEvent::chord(hotkey) {
            if let Err(e) = self.send_event(event) {
                // Не оставляем модификаторы зажатыми
                self.release_all(hotkey);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        if !self.dry_run {
            info!("Закрытие виртуального устройства '{}'", self.device_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_device_accepts_hotkeys() {
        let device = VirtualDevice::new("test device", true).unwrap();
        let hotkey = Hotkey::parse("ctrl+shift+esc").unwrap();
        assert!(device.send_hotkey(&hotkey).is_ok());
    }
}
