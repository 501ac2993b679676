use crate::style::{IDLE_COLOR, PENDING_COLOR, RUNNING_COLOR, STOPPED_COLOR};
use crate::ui::{GuiState, RunStatus};
use eframe::egui;

const HEADERS: [&str; 4] = ["Выполнено", "Прошло", "Осталось", "Всего"];

/// Строка состояния и таблица прогресса, новые строки сверху
pub fn show(ui: &mut egui::Ui, state: &GuiState) {
    let (text, color) = status_label(&state.status);
    ui.horizontal(|ui| {
        ui.label("Состояние:");
        ui.colored_label(color, egui::RichText::new(text).strong());
    });
    ui.separator();

    ui.columns(HEADERS.len(), |columns| {
        for (column, header) in columns.iter_mut().zip(HEADERS) {
            column.vertical_centered(|ui| ui.label(egui::RichText::new(header).strong()));
        }
    });

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + ui.spacing().item_spacing.y;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, row_height, state.rows.len(), |ui, range| {
            for row in &state.rows[range] {
                let cells = [row.completed.to_string(), row.elapsed(), row.remaining(), row.total()];
                ui.columns(cells.len(), |columns| {
                    for (column, cell) in columns.iter_mut().zip(cells.iter()) {
                        column.vertical_centered(|ui| ui.monospace(cell));
                    }
                });
            }
        });
}

fn status_label(status: &RunStatus) -> (String, egui::Color32) {
    match status {
        RunStatus::NotStarted => ("Не запущено".to_string(), IDLE_COLOR),
        RunStatus::Running => ("Выполняется...".to_string(), RUNNING_COLOR),
        RunStatus::Stopping => ("Останавливается...".to_string(), PENDING_COLOR),
        RunStatus::Finished(outcome) => (outcome.to_string(), STOPPED_COLOR),
    }
}
