use anyhow::Result;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
pub mod mappings;
mod services;
mod style;
mod ui;
mod utils;

use config::{Settings, DEFAULT_SETTINGS_PATH};
use services::{TimerWorker, VirtualDevice, WindowDirectory};

#[derive(Parser, Debug)]
#[command(name = "hotkey-timer")]
#[command(about = "Утилита для периодического нажатия сочетания клавиш")]
struct Args {
    /// Путь к файлу настроек
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Режим сухого запуска (без реальных нажатий и смены фокуса)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    init_tracing(&args.log_level)?;

    info!("Запуск Hotkey Timer v{}", env!("CARGO_PKG_VERSION"));

    // Загрузка настроек
    let settings = match Settings::load(&args.settings) {
        Ok(settings) => {
            info!("Настройки загружены из: {}", args.settings.display());
            settings
        }
        Err(e) => {
            error!(
                "Не удалось прочитать {}: {}. Используются значения по умолчанию",
                args.settings.display(),
                e
            );
            Settings::default()
        }
    };

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    } else {
        // Проверка прав доступа
        utils::permissions::check_permissions()?;
    }

    // Инициализация компонентов
    let virtual_device = Arc::new(VirtualDevice::new("Hotkey Timer Virtual Keyboard", args.dry_run)?);
    let window_directory = WindowDirectory::discover(args.dry_run);
    let worker = TimerWorker::new(virtual_device, window_directory.backend());

    let app = ui::HotkeyTimerApp::new(
        &settings,
        window_directory.windows().to_vec(),
        worker,
        args.settings.clone(),
    );

    info!("Все компоненты инициализированы");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 480.0])
            .with_min_inner_size([460.0, 380.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Hotkey Timer",
        native_options,
        Box::new(|cc| {
            style::apply_style(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Ошибка графического интерфейса: {}", e))?;

    info!("Hotkey Timer завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
