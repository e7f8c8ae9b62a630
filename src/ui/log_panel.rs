//! Session log panel
//!
//! Scrollable, stick-to-bottom view of a sink's records. Every record
//! renders — there is no level filtering — with a per-level color and an
//! optional timestamp column. The Clear button empties the sink; that is
//! an explicit user action, not a retention policy.

use eframe::egui;

use crate::sink::SinkHandle;
use crate::ui::level_color;

/// Session log panel component
pub struct LogPanel {
    /// Render the timestamp column
    show_timestamps: bool,
    /// Font size for record text
    font_size: f32,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            show_timestamps: true,
            font_size: 13.0,
        }
    }

    pub fn set_show_timestamps(&mut self, show: bool) {
        self.show_timestamps = show;
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Render the sink's records
    pub fn render(&mut self, ui: &mut egui::Ui, sink: &SinkHandle) {
        let font = egui::FontId::monospace(self.font_size);

        ui.horizontal(|ui| {
            let sink_ref = sink.borrow();
            ui.label(
                egui::RichText::new(format!("{} · {} records", sink_ref.name(), sink_ref.len()))
                    .small()
                    .color(egui::Color32::from_rgb(130, 130, 145)),
            );
            drop(sink_ref);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    sink.borrow_mut().clear();
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("log-panel")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for record in sink.borrow().records() {
                    let color = level_color(record.level);
                    let line = if self.show_timestamps {
                        format!(
                            "{} {:5} {}",
                            record.timestamp.format("%H:%M:%S"),
                            record.level.tag(),
                            record.message
                        )
                    } else {
                        format!("{:5} {}", record.level.tag(), record.message)
                    };
                    ui.label(egui::RichText::new(line).font(font.clone()).color(color));
                }
            });
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}
