use crate::app::GanttApp;
use crate::ui::theme;
use egui::{RichText, Ui};

/// Render the top toolbar: week navigation and the visible date range.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui.button("◀  Previous").clicked() {
            app.previous_week();
        }
        if ui.button("Today").clicked() {
            app.this_week();
        }
        if ui.button("Next  ▶").clicked() {
            app.next_week();
        }

        ui.separator();

        let first = app.window.first_day();
        let last = app.window.end().date().pred_opt().unwrap_or(first);
        ui.label(
            RichText::new(format!(
                "{} – {}",
                first.format("%a %d %b %Y"),
                last.format("%a %d %b %Y"),
            ))
            .font(theme::font_header())
            .color(theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new("Drag bars to move · Drag the right edge to resize")
                    .font(theme::font_sub())
                    .color(theme::TEXT_DIM),
            );
        });
    });
}
