use crate::error::{Result, TimerError};
use crate::events::Hotkey;
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";
pub const ENV_PREFIX: &str = "HOTKEY_TIMER_";

/// Содержимое settings.json
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Интервал между нажатиями, секунды
    pub interval: f64,
    /// Число повторов, `null` — без ограничения
    #[serde(default)]
    pub counts: Option<u64>,
    pub hotkey: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: 1.0,
            counts: Some(1),
            hotkey: "ctrl+shift+esc".to_string(),
        }
    }
}

/// Проверенные параметры запуска
#[derive(Debug, Clone, PartialEq)]
pub struct TimerPlan {
    pub interval: Duration,
    pub interval_secs: f64,
    pub counts: Option<u64>,
    pub hotkey: Hotkey,
}

impl Settings {
    /// Прочитать настройки. Если файла нет — записать значения по умолчанию.
    /// Переменные окружения `HOTKEY_TIMER_*` перекрывают значения из файла.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env(path.as_ref(), Env::prefixed(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Env) -> Result<Self> {
        let base = match fs::read_to_string(path) {
            Ok(raw) => Figment::new().merge(Json::string(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Файл настроек {:?} не найден, создаём со значениями по умолчанию", path);
                let defaults = Settings::default();
                defaults.save(path)?;
                Figment::from(Serialized::defaults(defaults))
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = base.merge(env).extract()?;

        debug!("Настройки загружены из {:?}: {:?}", path, settings);
        Ok(settings)
    }

    /// Перезаписать файл целиком
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        debug!("Настройки сохранены в {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.plan().map(|_| ())
    }

    /// Проверить значения и подготовить параметры для рабочего потока
    pub fn plan(&self) -> Result<TimerPlan> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(TimerError::Validation("Интервал должен быть больше 0".to_string()));
        }
        let interval = Duration::try_from_secs_f64(self.interval).map_err(|_| {
            crate::timer_error!(validation, "Слишком большой интервал: {}", self.interval)
        })?;

        if self.counts == Some(0) {
            return Err(TimerError::Validation(
                "Число повторов должно быть больше 0 или пустым".to_string(),
            ));
        }

        let hotkey = Hotkey::parse(&self.hotkey)?;

        Ok(TimerPlan {
            interval,
            interval_secs: self.interval,
            counts: self.counts,
            hotkey,
        })
    }
}

/// Значения полей ввода в том виде, как их набрал пользователь
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub interval: String,
    pub counts: String,
    pub hotkey: String,
}

impl From<&Settings> for SettingsForm {
    fn from(settings: &Settings) -> Self {
        Self {
            interval: settings.interval.to_string(),
            counts: settings.counts.map(|c| c.to_string()).unwrap_or_default(),
            hotkey: settings.hotkey.clone(),
        }
    }
}

impl SettingsForm {
    /// Разобрать поля формы. Пустое поле повторов означает запуск без ограничения.
    pub fn parse(&self) -> Result<Settings> {
        let interval: f64 = self
            .interval
            .trim()
            .parse()
            .map_err(|_| crate::timer_error!(validation, "Интервал должен быть числом: '{}'", self.interval))?;

        let counts_raw = self.counts.trim();
        let counts = if counts_raw.is_empty() {
            None
        } else {
            // Отрицательные числа разбираются отдельно, чтобы выдать понятную ошибку
            match counts_raw.parse::<i64>() {
                Ok(n) if n <= 0 => {
                    return Err(TimerError::Validation(
                        "Число повторов должно быть больше 0 или пустым".to_string(),
                    ))
                }
                Ok(n) => Some(n as u64),
                Err(_) => {
                    return Err(crate::timer_error!(
                        validation,
                        "Число повторов должно быть целым числом: '{}'",
                        self.counts
                    ))
                }
            }
        };

        let settings = Settings {
            interval,
            counts,
            hotkey: self.hotkey.clone(),
        };
        settings.validate()?;
        Ok(settings)
    }
}
