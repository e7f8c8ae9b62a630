//! Debug panel
//!
//! Read-only view of the engine's live state: global bindings, instance
//! environments, registered commands with their doc strings, and
//! evaluation statistics. The snapshot button serializes the whole state
//! to JSON and emits it into the session sink.

use eframe::egui;

use crate::script::{Engine, Value};
use crate::sink::SinkHandle;

/// Debug panel component
pub struct DebugPanel {
    font_size: f32,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self { font_size: 13.0 }
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Render engine state sections
    pub fn render(&mut self, ui: &mut egui::Ui, engine: &Engine, sink: &SinkHandle) {
        let font = egui::FontId::monospace(self.font_size);

        let stats = engine.stats();
        ui.horizontal(|ui| {
            let last = stats
                .last_duration
                .map(|d| format!("{:.1}ms", d.as_secs_f64() * 1000.0))
                .unwrap_or_else(|| "-".to_string());
            ui.label(
                egui::RichText::new(format!(
                    "evaluations: {} · errors: {} · last: {}",
                    stats.evaluations, stats.errors, last
                ))
                .small(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Snapshot to log").clicked() {
                    match serde_json::to_string_pretty(&engine.snapshot()) {
                        Ok(json) => sink.borrow_mut().info(format!("engine snapshot\n{}", json)),
                        Err(e) => sink.borrow_mut().error(format!("snapshot failed: {}", e)),
                    }
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("debug-panel")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.collapsing("Globals", |ui| {
                    let globals = engine.globals();
                    for (name, value) in globals.borrow().iter() {
                        if matches!(value, Value::Command(_)) {
                            continue;
                        }
                        ui.label(
                            egui::RichText::new(format!("{} = {}", name, value.quoted()))
                                .font(font.clone()),
                        );
                    }
                });

                ui.collapsing("Instances", |ui| {
                    for (name, table) in engine.instances() {
                        ui.collapsing(name.clone(), |ui| {
                            for (key, value) in table.borrow().iter() {
                                ui.label(
                                    egui::RichText::new(format!("{} = {}", key, value.quoted()))
                                        .font(font.clone()),
                                );
                            }
                        });
                    }
                });

                ui.collapsing("Commands", |ui| {
                    for (name, command) in engine.commands() {
                        ui.label(
                            egui::RichText::new(format!("{} - {}", name, command.doc()))
                                .font(font.clone()),
                        );
                    }
                });
            });
    }
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}
