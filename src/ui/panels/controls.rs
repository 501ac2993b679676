use eframe::egui;

/// Действие пользователя в панели управления
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
}

/// Кнопки «Стоп» и «Старт»: доступна только одна из них
pub fn show(ui: &mut egui::Ui, running: bool) -> Option<ControlAction> {
    let mut action = None;

    ui.columns(2, |columns| {
        let width = columns[0].available_width();
        let stop = columns[0].add_enabled(
            running,
            egui::Button::new("⏹ Стоп").min_size(egui::vec2(width, 32.0)),
        );
        if stop.clicked() {
            action = Some(ControlAction::Stop);
        }

        let start = columns[1].add_enabled(
            !running,
            egui::Button::new("▶ Старт").min_size(egui::vec2(width, 32.0)),
        );
        if start.clicked() {
            action = Some(ControlAction::Start);
        }
    });

    action
}
