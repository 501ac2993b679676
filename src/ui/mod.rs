//! Egui-интерфейс: форма настроек, кнопки управления и таблица прогресса.
//!
//! Всё состояние окна лежит в `GuiState`; рабочий поток сообщает о
//! прогрессе через канал, который разбирается в начале каждого кадра.

pub mod panels;

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use eframe::{egui, App};
use tracing::{error, info, warn};

use crate::config::{Settings, SettingsForm};
use crate::error::TimerError;
use crate::events::{ProgressRow, RunOutcome, WindowInfo, WorkerEvent};
use crate::services::TimerWorker;
use panels::controls::ControlAction;

/// Отображаемое состояние запуска
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    NotStarted,
    Running,
    /// Остановка запрошена, поток доживает текущий цикл
    Stopping,
    Finished(RunOutcome),
}

/// Модальное сообщение об ошибке
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: &'static str,
    pub message: String,
}

impl ErrorDialog {
    /// Некорректные значения в форме
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            title: "Ошибка ввода",
            message: message.into(),
        }
    }

    /// Рабочий поток не удалось запустить
    pub fn launch(message: impl Into<String>) -> Self {
        Self {
            title: "Ошибка запуска",
            message: message.into(),
        }
    }
}

/// Состояние окна
pub struct GuiState {
    pub form: SettingsForm,
    pub windows: Vec<WindowInfo>,
    /// `None` — окно не выбрано, фокус не меняется
    pub selected_window: Option<usize>,
    pub status: RunStatus,
    /// Новые строки в начале
    pub rows: Vec<ProgressRow>,
    pub error_dialog: Option<ErrorDialog>,

    events_tx: mpsc::Sender<WorkerEvent>,
    events_rx: mpsc::Receiver<WorkerEvent>,
}

impl GuiState {
    pub fn new(settings: &Settings, windows: Vec<WindowInfo>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            form: SettingsForm::from(settings),
            windows,
            selected_window: None,
            status: RunStatus::NotStarted,
            rows: vec![ProgressRow::initial()],
            error_dialog: None,
            events_tx,
            events_rx,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, RunStatus::Running | RunStatus::Stopping)
    }

    fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Started => {
                if self.status != RunStatus::Stopping {
                    self.status = RunStatus::Running;
                }
            }
            WorkerEvent::Progress(row) => self.rows.insert(0, row),
            WorkerEvent::Finished { outcome, .. } => self.status = RunStatus::Finished(outcome),
        }
    }
}

pub struct HotkeyTimerApp {
    state: GuiState,
    worker: TimerWorker,
    settings_path: PathBuf,
}

impl HotkeyTimerApp {
    pub fn new(settings: &Settings, windows: Vec<WindowInfo>, worker: TimerWorker, settings_path: PathBuf) -> Self {
        Self {
            state: GuiState::new(settings, windows),
            worker,
            settings_path,
        }
    }

    /// Проверить форму, сохранить настройки и запустить рабочий поток
    pub fn start(&mut self) {
        if self.worker.is_running() {
            self.state.error_dialog = Some(ErrorDialog::launch(TimerError::Busy.to_string()));
            return;
        }

        let parsed = self.state.form.parse().and_then(|settings| {
            let plan = settings.plan()?;
            Ok((settings, plan))
        });
        let (settings, plan) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Некорректный ввод: {}", e);
                self.state.error_dialog = Some(ErrorDialog::input(e.to_string()));
                return;
            }
        };

        if let Err(e) = settings.save(&self.settings_path) {
            error!("Не удалось сохранить настройки в {:?}: {}", self.settings_path, e);
        }

        let target = self
            .state
            .selected_window
            .and_then(|i| self.state.windows.get(i).cloned());

        match self.worker.start(plan, target, self.state.events_tx.clone()) {
            Ok(()) => self.state.status = RunStatus::Running,
            Err(e) => {
                error!("Не удалось запустить: {}", e);
                self.state.error_dialog = Some(ErrorDialog::launch(e.to_string()));
            }
        }
    }

    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.worker.stop();
            self.state.status = RunStatus::Stopping;
        }
    }

    /// Разобрать накопившиеся события рабочего потока (без блокировки)
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.state.events_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.error_dialog.clone() else {
            return;
        };

        let response = egui::Modal::new(egui::Id::new("error_dialog")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.heading(dialog.title);
            ui.add_space(6.0);
            ui.label(dialog.message);
            ui.add_space(6.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.button("OK").clicked()
            })
            .inner
        });

        if response.inner || response.should_close() {
            self.state.error_dialog = None;
        }
    }
}

impl App for HotkeyTimerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let running = self.state.is_running();
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Настройки").strong());
                panels::settings::show(ui, &mut self.state, !running);
            });
            ui.add_space(6.0);

            action = panels::controls::show(ui, running);
            ui.add_space(6.0);

            ui.group(|ui| panels::progress::show(ui, &self.state));
        });

        match action {
            Some(ControlAction::Start) => self.start(),
            Some(ControlAction::Stop) => self.stop(),
            None => {}
        }

        self.show_error_dialog(ctx);

        // Рабочий поток не будит интерфейс, поэтому опрашиваем канал по таймеру
        if self.state.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for HotkeyTimerApp {
    fn drop(&mut self) {
        if self.worker.is_running() {
            info!("Окно закрыто, останавливаем рабочий поток");
            self.worker.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::VirtualDevice;
    use std::sync::Arc;
    use std::time::Instant;

    fn app_in(dir: &tempfile::TempDir) -> HotkeyTimerApp {
        let device = Arc::new(VirtualDevice::new("test", true).unwrap());
        let worker = TimerWorker::new(device, None);
        HotkeyTimerApp::new(
            &Settings::default(),
            vec![WindowInfo::new("1", "Editor")],
            worker,
            dir.path().join("settings.json"),
        )
    }

    fn wait_finished(app: &mut HotkeyTimerApp) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !matches!(app.state.status, RunStatus::Finished(_)) {
            assert!(Instant::now() < deadline, "run did not finish");
            std::thread::sleep(Duration::from_millis(5));
            app.drain_events();
        }
    }

    #[test]
    fn test_initial_state() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);

        assert_eq!(app.state.status, RunStatus::NotStarted);
        assert_eq!(app.state.rows, vec![ProgressRow::initial()]);
        assert_eq!(app.state.form.hotkey, "ctrl+shift+esc");
        assert_eq!(app.state.selected_window, None);
    }

    #[test]
    fn test_invalid_interval_shows_error_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.state.form.interval = "0".to_string();

        app.start();

        let dialog = app.state.error_dialog.as_ref().unwrap();
        assert_eq!(dialog.title, "Ошибка ввода");
        assert_eq!(app.state.status, RunStatus::NotStarted);
        assert!(!app.worker.is_running());
        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_start_saves_settings_and_fills_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.state.form = SettingsForm {
            interval: "0.01".to_string(),
            counts: "3".to_string(),
            hotkey: "ctrl+alt+t".to_string(),
        };

        app.start();
        assert!(app.state.is_running());
        wait_finished(&mut app);

        assert_eq!(app.state.status, RunStatus::Finished(RunOutcome::Completed));
        let completed: Vec<u64> = app.state.rows.iter().map(|r| r.completed).collect();
        assert_eq!(completed, vec![3, 2, 1, 0]);

        let saved = Settings::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(saved.interval, 0.01);
        assert_eq!(saved.counts, Some(3));
        assert_eq!(saved.hotkey, "ctrl+alt+t");
    }

    #[test]
    fn test_stop_marks_stopping_then_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.state.form.interval = "0.01".to_string();
        app.state.form.counts = String::new();

        app.start();
        app.stop();
        assert_eq!(app.state.status, RunStatus::Stopping);

        wait_finished(&mut app);
        assert_eq!(app.state.status, RunStatus::Finished(RunOutcome::Stopped));
    }

    #[test]
    fn test_start_while_running_reports_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.state.form.interval = "0.05".to_string();
        app.state.form.counts = String::new();

        app.start();
        assert!(app.state.error_dialog.is_none());

        app.start();
        let dialog = app.state.error_dialog.clone().unwrap();
        assert_eq!(dialog, ErrorDialog::launch(TimerError::Busy.to_string()));
        assert_ne!(dialog.title, "Ошибка ввода");

        app.stop();
        wait_finished(&mut app);
        assert_eq!(app.state.status, RunStatus::Finished(RunOutcome::Stopped));
    }
}
