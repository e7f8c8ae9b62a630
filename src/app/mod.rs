//! Demo host application
//!
//! A small eframe app that embeds the developer kit and shows the loop
//! end to end: the central panel renders a label and a counter that live
//! in the engine's `app` instance scope, and the registered host commands
//! (`counter_add`, `set_label`, `quit`) mutate that state from the
//! console. Bind the console to the instance scope (`--scope app` or
//! `[console] scope = "app"`) and `self.count += 1` pokes the same state
//! the window is drawing.
//!
//! ## UI Layout
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Top Panel (Status Bar)                  │
//! ├─────────────────────────────────────────┤
//! │                                         │
//! │ Central Panel (Demo State)              │
//! │ - label + counter from the app scope    │
//! │                                         │
//! │   Floating kit windows:                 │
//! │   Console · Session Log · Debug         │
//! └─────────────────────────────────────────┘
//! ```

use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;
use tracing::info;

use glassbox::config::Config;
use glassbox::devkit::DevKit;
use glassbox::script::{args, Value};
use glassbox::{NAME, VERSION};

/// Name of the demo's instance scope
const APP_SCOPE: &str = "app";

/// The demo host application
pub struct GlassboxApp {
    kit: DevKit,
    /// Set by the `quit` host command; checked every frame
    quit_requested: Rc<Cell<bool>>,
    dark_mode: bool,
}

impl GlassboxApp {
    /// Build the app: construct the kit, create the `app` instance scope,
    /// and register the demo host commands against it.
    pub fn new(config: &Config) -> Self {
        let mut kit = DevKit::new(config);
        let quit_requested = Rc::new(Cell::new(false));

        let state = kit.engine_mut().make_instance(APP_SCOPE);
        {
            let mut state = state.borrow_mut();
            state.insert("count".to_string(), Value::Num(0.0));
            state.insert("label".to_string(), Value::from("hello from glassbox"));
            state.insert("label_color".to_string(), Value::from("default"));
        }

        register_demo_commands(&mut kit, state, Rc::clone(&quit_requested));
        info!("demo host ready");

        Self {
            kit,
            quit_requested,
            dark_mode: config.ui.dark_mode,
        }
    }

    pub fn kit(&self) -> &DevKit {
        &self.kit
    }

    pub fn kit_mut(&mut self) -> &mut DevKit {
        &mut self.kit
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.get()
    }

    /// Read a rendered value out of the `app` instance scope
    fn app_value(&self, key: &str) -> String {
        self.kit
            .engine()
            .instance(APP_SCOPE)
            .and_then(|table| table.borrow().get(key).map(|v| v.render()))
            .unwrap_or_default()
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("status-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("{} v{}", NAME, VERSION)).strong());
                ui.separator();
                ui.label(
                    egui::RichText::new("F12 toggles the kit · Ctrl+Enter evaluates")
                        .small()
                        .color(egui::Color32::from_rgb(130, 130, 145)),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Debug").clicked() {
                        self.kit.toggle_debug();
                    }
                    if ui.small_button("Log").clicked() {
                        self.kit.toggle_log();
                    }
                    if ui.small_button("Console").clicked() {
                        self.kit.toggle_console();
                    }
                });
            });
        });
    }

    fn render_demo_state(&mut self, ctx: &egui::Context) {
        let label = self.app_value("label");
        let count = self.app_value("count");
        let color = match self.app_value("label_color").as_str() {
            "green" => egui::Color32::from_rgb(140, 220, 140),
            "red" => egui::Color32::from_rgb(235, 110, 100),
            "blue" => egui::Color32::from_rgb(130, 160, 200),
            _ => ctx.style().visuals.text_color(),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new(label).size(28.0).color(color));
                ui.add_space(12.0);
                ui.label(egui::RichText::new(format!("count = {}", count)).size(20.0));
                ui.add_space(24.0);
                ui.label(
                    egui::RichText::new(
                        "Try in the console:  counter_add(5)   set_label(\"hi\", color=\"green\")",
                    )
                    .small()
                    .color(egui::Color32::from_rgb(130, 130, 145)),
                );
                ui.label(
                    egui::RichText::new(
                        "With --scope app:    self.count += 1; self.count",
                    )
                    .small()
                    .color(egui::Color32::from_rgb(130, 130, 145)),
                );
            });
        });
    }
}

impl eframe::App for GlassboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.render_status_bar(ctx);
        self.render_demo_state(ctx);
        self.kit.show(ctx);

        if self.quit_requested.get() {
            info!("quit requested from the console");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Install the demo host commands that mutate the `app` instance scope
fn register_demo_commands(
    kit: &mut DevKit,
    state: glassbox::script::Table,
    quit_requested: Rc<Cell<bool>>,
) {
    let engine = kit.engine_mut();

    let counter_state = state.clone();
    engine.register_fn(
        "counter_add",
        "Add a number to the demo counter and return the new value",
        move |_ctx, call_args, kwargs| {
            args::require("counter_add", &call_args, 1)?;
            args::no_kwargs("counter_add", &kwargs)?;
            let delta = args::as_num("counter_add", &call_args[0])?;

            let mut state = counter_state.borrow_mut();
            let current = match state.get("count") {
                Some(Value::Num(n)) => *n,
                _ => 0.0,
            };
            let next = current + delta;
            state.insert("count".to_string(), Value::Num(next));
            Ok(Value::Num(next))
        },
    );

    let label_state = state.clone();
    engine.register_fn(
        "set_label",
        "Set the demo label text; optional color keyword (green, red, blue)",
        move |_ctx, call_args, kwargs| {
            args::require("set_label", &call_args, 1)?;
            args::only_kwargs("set_label", &kwargs, &["color"])?;

            let mut state = label_state.borrow_mut();
            state.insert("label".to_string(), Value::from(call_args[0].render()));
            if let Some(color) = kwargs.get("color") {
                state.insert("label_color".to_string(), Value::from(color.render()));
            }
            Ok(Value::Nil)
        },
    );

    engine.register_fn(
        "quit",
        "Close the application window",
        move |_ctx, call_args, kwargs| {
            args::require("quit", &call_args, 0)?;
            args::no_kwargs("quit", &kwargs)?;
            quit_requested.set(true);
            Ok(Value::Nil)
        },
    );
}
