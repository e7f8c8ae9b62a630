//! UI components and rendering
//!
//! The egui widgets of the developer kit: the evaluation console, the
//! session log panel, and the debug panel. All of them render inside
//! whatever container the caller provides (the kit uses floating
//! `egui::Window`s).

pub mod console;
pub mod debug_panel;
pub mod log_panel;

// Re-exports for convenience
pub use console::ConsolePanel;
pub use debug_panel::DebugPanel;
pub use log_panel::LogPanel;

use eframe::egui;

use crate::models::LogLevel;

/// Per-level text colors shared by the log panel and the transcript
pub fn level_color(level: LogLevel) -> egui::Color32 {
    match level {
        LogLevel::Info => egui::Color32::from_rgb(200, 200, 210),
        LogLevel::Debug => egui::Color32::from_rgb(130, 160, 200),
        LogLevel::Warning => egui::Color32::from_rgb(230, 190, 80),
        LogLevel::Error => egui::Color32::from_rgb(235, 110, 100),
    }
}
