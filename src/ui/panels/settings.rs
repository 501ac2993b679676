use crate::ui::GuiState;
use eframe::egui;

const NO_WINDOW: &str = "Нет";

/// Форма настроек: интервал, число повторов, сочетание и окно для фокуса
pub fn show(ui: &mut egui::Ui, state: &mut GuiState, editable: bool) {
    ui.add_enabled_ui(editable, |ui| {
        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let field_width = ui.available_width().max(200.0);

                ui.label("Интервал (сек):");
                ui.add(egui::TextEdit::singleline(&mut state.form.interval).desired_width(field_width));
                ui.end_row();

                ui.label("Повторов (пусто — бесконечно):");
                ui.add(egui::TextEdit::singleline(&mut state.form.counts).desired_width(field_width));
                ui.end_row();

                ui.label("Сочетание (например: ctrl+shift+esc):");
                ui.add(egui::TextEdit::singleline(&mut state.form.hotkey).desired_width(field_width));
                ui.end_row();

                ui.label("Окно для фокуса:");
                let selected_text = state
                    .selected_window
                    .and_then(|i| state.windows.get(i))
                    .map(|w| w.display_name().to_string())
                    .unwrap_or_else(|| NO_WINDOW.to_string());
                egui::ComboBox::from_id_salt("target_window")
                    .selected_text(selected_text)
                    .width(field_width)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut state.selected_window, None, NO_WINDOW);
                        for (i, window) in state.windows.iter().enumerate() {
                            ui.selectable_value(&mut state.selected_window, Some(i), window.display_name())
                                .on_hover_text(window.to_string());
                        }
                    });
                ui.end_row();
            });
    });
}
