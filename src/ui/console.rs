//! Evaluation console component
//!
//! A multi-line command buffer pinned under a scrollable transcript.
//! **Ctrl+Enter** is the trigger gesture; plain Enter edits the buffer,
//! so multi-line editing and submission never collide. On trigger the
//! buffer is read verbatim — it is not cleared and not trimmed — echoed
//! into the transcript, and handed to the engine for evaluation in the
//! scope the console was bound to at construction.
//!
//! The console performs no syntax validation, no input sanitization, and
//! no permission check; it is a development tool for trusted local use.
//! An evaluation error becomes a transcript entry and the event loop
//! keeps running.

use eframe::egui;
use tracing::{debug, warn};

use crate::models::{EntryKind, TranscriptEntry};
use crate::script::{Engine, EvalScope, Value};

/// Evaluation console component
pub struct ConsolePanel {
    /// Scope injected text is evaluated against; fixed at construction
    scope: EvalScope,
    /// The command buffer, owned by the text widget
    buffer: String,
    /// Display history: inputs, output, results, errors
    transcript: Vec<TranscriptEntry>,
    /// Font size for the buffer and transcript
    font_size: f32,
}

impl ConsolePanel {
    /// Create a console bound to the given evaluation scope
    pub fn new(scope: EvalScope) -> Self {
        Self {
            scope,
            buffer: String::new(),
            transcript: Vec::new(),
            font_size: 13.0,
        }
    }

    /// Create a console with a greeting notice at the top of the transcript
    pub fn with_greeting(scope: EvalScope, greeting: &str) -> Self {
        let mut panel = Self::new(scope);
        if !greeting.is_empty() {
            panel.transcript.push(TranscriptEntry::notice(greeting));
        }
        panel
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// The scope this console was bound to
    pub fn scope(&self) -> &EvalScope {
        &self.scope
    }

    /// Current command buffer contents
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the command buffer contents
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// The transcript, oldest entry first
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Render the transcript and the command buffer
    pub fn render(&mut self, ui: &mut egui::Ui, engine: &mut Engine) {
        let font = egui::FontId::monospace(self.font_size);

        // Transcript above, input pinned below
        let input_height = self.font_size * 6.0;
        egui::ScrollArea::vertical()
            .id_salt("console-transcript")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .max_height(ui.available_height() - input_height)
            .show(ui, |ui| {
                for entry in &self.transcript {
                    let color = entry_color(entry.kind);
                    ui.label(
                        egui::RichText::new(format!("{}{}", entry.prefix(), entry.text))
                            .font(font.clone())
                            .color(color),
                    );
                }
            });

        ui.separator();

        let response = ui.add(
            egui::TextEdit::multiline(&mut self.buffer)
                .id_salt("console-buffer")
                .font(font)
                .desired_width(f32::INFINITY)
                .desired_rows(3)
                .hint_text("scriptlet…")
                .lock_focus(true),
        );

        // Ctrl+Enter submits; bare Enter stays an ordinary newline edit
        if response.has_focus()
            && ui.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::Enter))
        {
            self.submit(engine);
        }

        ui.label(
            egui::RichText::new("Ctrl+Enter to evaluate")
                .small()
                .color(egui::Color32::from_rgb(130, 130, 145)),
        );
    }

    /// Trigger handler: read the buffer verbatim and evaluate it.
    ///
    /// The buffer is left untouched. Console builtins (`clear`, `help`,
    /// `bindings`) are handled here and never reach the engine.
    pub fn submit(&mut self, engine: &mut Engine) {
        let text = self.buffer.clone();
        self.transcript.push(TranscriptEntry::input(text.clone()));

        match text.trim() {
            "clear" => {
                self.transcript.clear();
                return;
            }
            "help" => {
                self.push_help();
                return;
            }
            "bindings" => {
                self.push_bindings(engine);
                return;
            }
            _ => {}
        }

        match engine.eval(&text, &self.scope) {
            Ok(evaluation) => {
                debug!(duration = ?evaluation.duration, "console evaluation ok");
                for line in evaluation.output {
                    self.transcript.push(TranscriptEntry::output(line));
                }
                if evaluation.value != Value::Nil {
                    self.transcript
                        .push(TranscriptEntry::result(evaluation.value.quoted()));
                }
            }
            Err(err) => {
                // Fail loud, keep running: the error is shown and the
                // next trigger evaluates normally.
                warn!("console evaluation failed: {}", err);
                self.transcript.push(TranscriptEntry::error(err.to_string()));
            }
        }
    }

    fn push_help(&mut self) {
        for line in [
            "Console commands:",
            "  clear     - clear the transcript",
            "  bindings  - list registered commands and scope names",
            "  help      - show this help",
            "",
            "Ctrl+Enter evaluates the buffer; Enter inserts a newline.",
            "The buffer is kept after evaluation.",
        ] {
            self.transcript.push(TranscriptEntry::notice(line));
        }
    }

    fn push_bindings(&mut self, engine: &Engine) {
        self.transcript.push(TranscriptEntry::notice("Commands:"));
        for (name, command) in engine.commands() {
            self.transcript.push(TranscriptEntry::notice(format!(
                "  {} - {}",
                name,
                command.doc()
            )));
        }

        let globals = engine.globals();
        let names: Vec<String> = globals
            .borrow()
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Command(_)))
            .map(|(k, v)| format!("  {} = {}", k, v.quoted()))
            .collect();
        if !names.is_empty() {
            self.transcript.push(TranscriptEntry::notice("Globals:"));
            for line in names {
                self.transcript.push(TranscriptEntry::notice(line));
            }
        }

        if let EvalScope::Instance(name) = &self.scope {
            self.transcript
                .push(TranscriptEntry::notice(format!("self -> instance '{}':", name)));
            if let Some(instance) = engine.instance(name) {
                for (key, value) in instance.borrow().iter() {
                    self.transcript
                        .push(TranscriptEntry::notice(format!("  {} = {}", key, value.quoted())));
                }
            }
        }
    }
}

fn entry_color(kind: EntryKind) -> egui::Color32 {
    match kind {
        EntryKind::Input => egui::Color32::from_rgb(150, 150, 165),
        EntryKind::Output => egui::Color32::from_rgb(210, 210, 220),
        EntryKind::Result => egui::Color32::from_rgb(140, 220, 140),
        EntryKind::Error => egui::Color32::from_rgb(235, 110, 100),
        EntryKind::Notice => egui::Color32::from_rgb(130, 160, 200),
    }
}
