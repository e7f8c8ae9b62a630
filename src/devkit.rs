//! The developer kit bundle
//!
//! One engine, one session sink, and three floating windows: the
//! evaluation console, the session log, and the debug view. The kit is
//! constructed explicitly by the host application and passed down by
//! reference — there is no global instance. F12 toggles the whole kit.

use std::rc::Rc;

use eframe::egui;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::models::LogLevel;
use crate::script::{args, Engine, EvalScope, HostCommand, Value};
use crate::sink::{LogSink, SinkHandle};
use crate::ui::{ConsolePanel, DebugPanel, LogPanel};

/// Bundles the engine, the session sink, and the kit windows
pub struct DevKit {
    engine: Engine,
    sink: SinkHandle,
    console: ConsolePanel,
    log_panel: LogPanel,
    debug_panel: DebugPanel,
    /// Master visibility toggle (F12)
    visible: bool,
    show_console: bool,
    show_log: bool,
    show_debug: bool,
}

impl DevKit {
    /// Construct the kit: engine with the built-in command surface, a
    /// session sink, and a console bound to the configured scope.
    ///
    /// A scope value of `"module"` binds the global environment; any
    /// other value names an instance environment, created here if needed,
    /// that injected text reaches through `self`.
    pub fn new(config: &Config) -> Self {
        let sink = LogSink::shared(config.logging.sink_name.clone());
        let mut engine = Engine::new();
        register_builtins(&mut engine, &sink);

        let scope = if config.console.scope == "module" {
            EvalScope::Module
        } else {
            engine.make_instance(config.console.scope.clone());
            EvalScope::Instance(config.console.scope.clone())
        };
        info!(?scope, "developer kit ready");

        let font_size = config.ui.font_size as f32;
        let mut console = ConsolePanel::with_greeting(scope, &config.console.greeting);
        console.set_font_size(font_size);
        let mut log_panel = LogPanel::new();
        log_panel.set_show_timestamps(config.logging.show_timestamps);
        log_panel.set_font_size(font_size);
        let mut debug_panel = DebugPanel::new();
        debug_panel.set_font_size(font_size);

        Self {
            engine,
            sink,
            console,
            log_panel,
            debug_panel,
            visible: true,
            show_console: config.console.open_on_start,
            show_log: true,
            show_debug: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Shared handle to the session sink
    pub fn sink(&self) -> SinkHandle {
        self.sink.clone()
    }

    pub fn console(&self) -> &ConsolePanel {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut ConsolePanel {
        &mut self.console
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn toggle_console(&mut self) {
        self.show_console = !self.show_console;
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
    }

    /// Render the kit windows and handle the F12 master toggle
    pub fn show(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::F12)) {
            self.toggle();
        }
        if !self.visible {
            return;
        }

        let Self {
            engine,
            sink,
            console,
            log_panel,
            debug_panel,
            show_console,
            show_log,
            show_debug,
            ..
        } = self;

        egui::Window::new("Console")
            .open(show_console)
            .default_size([560.0, 400.0])
            .show(ctx, |ui| console.render(ui, engine));

        egui::Window::new("Session Log")
            .open(show_log)
            .default_size([560.0, 300.0])
            .show(ctx, |ui| log_panel.render(ui, sink));

        egui::Window::new("Debug")
            .open(show_debug)
            .default_size([420.0, 360.0])
            .show(ctx, |ui| debug_panel.render(ui, engine, sink));
    }
}

/// Install the built-in command surface: `print`, the `log` group, and
/// `trace` (the script-side wrap_logging).
fn register_builtins(engine: &mut Engine, sink: &SinkHandle) {
    engine.register(HostCommand::new(
        "print",
        "Print values to the console transcript",
        |ctx, args, kwargs| {
            args::no_kwargs("print", &kwargs)?;
            ctx.print_line(
                args.iter()
                    .map(|v| v.render())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            Ok(Value::Nil)
        },
    ));

    let levels = [
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("warning", LogLevel::Warning),
        ("error", LogLevel::Error),
    ];
    for (name, level) in levels {
        let sink = sink.clone();
        engine.register_grouped(
            "log",
            HostCommand::new(
                name,
                format!("Emit a {} record into the session log", name),
                move |_ctx, args, kwargs| {
                    args::require_at_least(name, &args, 1)?;
                    args::no_kwargs(name, &kwargs)?;
                    let message = args
                        .iter()
                        .map(|v| v.render())
                        .collect::<Vec<_>>()
                        .join(" ");
                    sink.borrow_mut().emit(level, message);
                    Ok(Value::Nil)
                },
            ),
        );
    }

    let trace_sink = sink.clone();
    engine.register(HostCommand::new(
        "trace",
        "Wrap a command so its calls are mirrored into the session log",
        move |_ctx, args, kwargs| {
            args::require("trace", &args, 1)?;
            args::no_kwargs("trace", &kwargs)?;
            match &args[0] {
                Value::Command(command) => Ok(Value::Command(HostCommand::wrap_logging(
                    Rc::clone(command),
                    trace_sink.clone(),
                ))),
                other => Err(Error::EvalFailed {
                    reason: format!("'trace' expects a command, got {}", other.type_name()),
                }),
            }
        },
    ));
}
