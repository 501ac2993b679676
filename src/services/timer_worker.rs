use crate::config::TimerPlan;
use crate::debug_if_enabled;
use crate::error::{Result, TimerError};
use crate::events::{ProgressRow, RunOutcome, WindowInfo, WorkerEvent};
use crate::services::{KeystrokeInjector, WindowBackend};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info, warn};

// Менеджеру окон нужно время, чтобы переключить фокус до нажатия
const FOCUS_SETTLE: Duration = Duration::from_millis(100);

/// Общее состояние запуска: флаг остановки выставляет интерфейс,
/// счётчик ведёт рабочий поток
#[derive(Debug, Default)]
pub struct RunState {
    stop_requested: AtomicBool,
    completed: AtomicU64,
}

impl RunState {
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.stop_requested.store(false, Ordering::Release);
        self.completed.store(0, Ordering::Release);
    }

    fn increment(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Сбрасывает признак активного запуска при выходе из потока
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Всё, что нужно рабочему потоку на один запуск
struct Cycle {
    plan: TimerPlan,
    target: Option<WindowInfo>,
    injector: Arc<dyn KeystrokeInjector>,
    windows: Option<Arc<dyn WindowBackend>>,
    state: Arc<RunState>,
    events: Sender<WorkerEvent>,
}

pub struct TimerWorker {
    injector: Arc<dyn KeystrokeInjector>,
    windows: Option<Arc<dyn WindowBackend>>,
    state: Arc<RunState>,
    active: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TimerWorker {
    pub fn new(injector: Arc<dyn KeystrokeInjector>, windows: Option<Arc<dyn WindowBackend>>) -> Self {
        info!(
            "Инициализация TimerWorker (менеджер окон: {})",
            windows.as_ref().map(|w| w.name()).unwrap_or("нет")
        );

        Self {
            injector,
            windows,
            state: Arc::new(RunState::default()),
            active: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub fn state(&self) -> &Arc<RunState> {
        &self.state
    }

    /// Запустить рабочий поток. Второй запуск поверх активного отклоняется.
    pub fn start(
        &self,
        plan: TimerPlan,
        target: Option<WindowInfo>,
        events: Sender<WorkerEvent>,
    ) -> Result<()> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Запуск отклонён: предыдущий запуск ещё не завершён");
            return Err(TimerError::Busy);
        }
        let guard = ActiveGuard(Arc::clone(&self.active));

        self.state.reset();

        info!(
            "Запуск: сочетание {}, интервал {}с, повторов {}, окно {}",
            plan.hotkey,
            plan.interval_secs,
            plan.counts.map(|c| c.to_string()).unwrap_or_else(|| "∞".to_string()),
            target.as_ref().map(|w| w.to_string()).unwrap_or_else(|| "нет".to_string())
        );

        let cycle = Cycle {
            plan,
            target,
            injector: Arc::clone(&self.injector),
            windows: self.windows.clone(),
            state: Arc::clone(&self.state),
            events,
        };

        let handle = thread::Builder::new()
            .name("timer-worker".to_string())
            .spawn(move || {
                let events = cycle.events.clone();
                let outcome = cycle.run();
                let completed = cycle.state.completed();
                info!("Запуск завершён: {} (нажатий: {})", outcome, completed);
                // Освобождаем слот до уведомления, чтобы интерфейс мог сразу запустить снова
                drop(guard);
                let _ = events.send(WorkerEvent::Finished { outcome, completed });
            })?;

        // Завершённый поток предыдущего запуска просто отсоединяется
        *self.handle.lock() = Some(handle);
        Ok(())
    }

    /// Попросить поток остановиться в начале следующего цикла
    pub fn stop(&self) {
        if self.is_running() {
            info!("Запрошена остановка после текущего цикла");
            self.state.request_stop();
        }
    }

    /// Дождаться завершения текущего потока
    #[cfg(test)]
    pub fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("Рабочий поток завершился паникой");
            }
        }
    }
}

impl Cycle {
    fn run(&self) -> RunOutcome {
        let _ = self.events.send(WorkerEvent::Started);

        loop {
            if let Some(counts) = self.plan.counts {
                if self.state.completed() >= counts {
                    return RunOutcome::Completed;
                }
            }

            if self.state.is_stop_requested() {
                return RunOutcome::Stopped;
            }

            self.focus_target();

            if let Err(e) = self.injector.send_hotkey(&self.plan.hotkey) {
                error!("Ошибка отправки сочетания {}: {}", self.plan.hotkey, e);
                return RunOutcome::Failed(e.to_string());
            }

            let completed = self.state.increment();
            debug_if_enabled!("Нажатие #{} отправлено", completed);

            let row = ProgressRow::compute(completed, self.plan.interval_secs, self.plan.counts);
            let _ = self.events.send(WorkerEvent::Progress(row));

            thread::sleep(self.plan.interval);
        }
    }

    fn focus_target(&self) {
        let (Some(window), Some(backend)) = (&self.target, &self.windows) else {
            return;
        };

        match backend.focus(window) {
            Ok(()) => thread::sleep(FOCUS_SETTLE),
            Err(e) => warn!("Не удалось вывести окно {} на передний план: {}", window, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::events::Hotkey;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Instant;

    #[derive(Default)]
    struct RecordingInjector {
        sent: Mutex<Vec<String>>,
        fail_after: Option<usize>,
    }

    impl KeystrokeInjector for RecordingInjector {
        fn send_hotkey(&self, hotkey: &Hotkey) -> Result<()> {
            let mut sent = self.sent.lock();
            if self.fail_after.is_some_and(|n| sent.len() >= n) {
                return Err(TimerError::Internal("device gone".to_string()));
            }
            sent.push(hotkey.as_str().to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingWindows {
        focused: Mutex<Vec<String>>,
    }

    impl WindowBackend for RecordingWindows {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn probe(&self) -> Result<()> {
            Ok(())
        }

        fn list_windows(&self) -> Result<Vec<WindowInfo>> {
            Ok(Vec::new())
        }

        fn focus(&self, window: &WindowInfo) -> Result<()> {
            self.focused.lock().push(window.id.clone());
            Ok(())
        }
    }

    fn plan(interval: f64, counts: Option<u64>, hotkey: &str) -> TimerPlan {
        Settings {
            interval,
            counts,
            hotkey: hotkey.to_string(),
        }
        .plan()
        .unwrap()
    }

    /// Собрать события до Finished включительно
    fn collect_until_finished(rx: &Receiver<WorkerEvent>) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        loop {
            let event = rx
                .recv_timeout(Duration::from_secs(10))
                .expect("worker did not finish in time");
            let finished = matches!(event, WorkerEvent::Finished { .. });
            events.push(event);
            if finished {
                return events;
            }
        }
    }

    fn rows(events: &[WorkerEvent]) -> Vec<ProgressRow> {
        events
            .iter()
            .filter_map(|e| match e {
                WorkerEvent::Progress(row) => Some(*row),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bounded_run_emits_exactly_counts_rows() {
        let injector = Arc::new(RecordingInjector::default());
        let worker = TimerWorker::new(injector.clone(), None);
        let (tx, rx) = mpsc::channel();

        let started = Instant::now();
        worker.start(plan(0.02, Some(3), "ctrl+alt+t"), None, tx).unwrap();
        let events = collect_until_finished(&rx);
        worker.join();

        assert_eq!(events.first(), Some(&WorkerEvent::Started));
        assert_eq!(
            events.last(),
            Some(&WorkerEvent::Finished {
                outcome: RunOutcome::Completed,
                completed: 3
            })
        );

        let rows = rows(&events);
        assert_eq!(rows.iter().map(|r| r.completed).collect::<Vec<_>>(), vec![1, 2, 3]);
        let last = rows.last().unwrap();
        assert_eq!(last.remaining(), "00:00:00");
        assert_eq!(last.elapsed(), last.total());

        assert_eq!(injector.sent.lock().len(), 3);
        assert!(started.elapsed() >= Duration::from_millis(60));
        assert!(!worker.is_running());
    }

    #[test]
    fn test_stop_ends_unbounded_run() {
        let injector = Arc::new(RecordingInjector::default());
        let worker = TimerWorker::new(injector.clone(), None);
        let (tx, rx) = mpsc::channel();

        worker.start(plan(0.02, None, "f5"), None, tx).unwrap();

        let mut seen = 0;
        while seen < 2 {
            if let WorkerEvent::Progress(_) = rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                seen += 1;
            }
        }
        worker.stop();
        let events = collect_until_finished(&rx);
        worker.join();

        let Some(WorkerEvent::Finished { outcome, completed }) = events.last() else {
            panic!("no finish event");
        };
        assert_eq!(*outcome, RunOutcome::Stopped);
        assert_eq!(*completed, seen + rows(&events).len() as u64);
        assert_eq!(injector.sent.lock().len() as u64, *completed);

        // После остановки счётчик не растёт
        thread::sleep(Duration::from_millis(60));
        assert_eq!(worker.state().completed(), *completed);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let worker = TimerWorker::new(Arc::new(RecordingInjector::default()), None);
        let (tx, rx) = mpsc::channel();

        worker.start(plan(0.05, None, "a"), None, tx.clone()).unwrap();
        let second = worker.start(plan(0.05, None, "b"), None, tx);
        assert!(matches!(second, Err(TimerError::Busy)));

        worker.stop();
        collect_until_finished(&rx);
        worker.join();
        assert!(!worker.is_running());
    }

    #[test]
    fn test_injection_failure_ends_run_and_frees_worker() {
        let injector = Arc::new(RecordingInjector {
            fail_after: Some(2),
            ..Default::default()
        });
        let worker = TimerWorker::new(injector, None);
        let (tx, rx) = mpsc::channel();

        worker.start(plan(0.01, Some(5), "a"), None, tx.clone()).unwrap();
        let events = collect_until_finished(&rx);
        worker.join();

        assert!(matches!(
            events.last(),
            Some(WorkerEvent::Finished { outcome: RunOutcome::Failed(_), completed: 2 })
        ));
        assert!(!worker.is_running());

        // Следующий запуск начинается с нуля
        worker.start(plan(0.01, Some(1), "a"), None, tx).unwrap();
        let events = collect_until_finished(&rx);
        worker.join();
        assert!(matches!(
            events.last(),
            Some(WorkerEvent::Finished { outcome: RunOutcome::Failed(_), completed: 0 })
        ));
    }

    #[test]
    fn test_target_window_is_focused_before_each_press() {
        let windows = Arc::new(RecordingWindows::default());
        let worker = TimerWorker::new(Arc::new(RecordingInjector::default()), Some(windows.clone()));
        let (tx, rx) = mpsc::channel();

        let target = WindowInfo::new("0x42", "Editor");
        worker.start(plan(0.01, Some(2), "ctrl+s"), Some(target), tx.clone()).unwrap();
        collect_until_finished(&rx);
        worker.join();
        assert_eq!(*windows.focused.lock(), vec!["0x42", "0x42"]);

        worker.start(plan(0.01, Some(2), "ctrl+s"), None, tx).unwrap();
        collect_until_finished(&rx);
        worker.join();
        assert_eq!(windows.focused.lock().len(), 2);
    }
}
