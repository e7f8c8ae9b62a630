//! Glassbox demo host
//!
//! A small eframe application that embeds the developer kit: a central
//! panel with live demo state, plus the floating console, session log,
//! and debug windows the kit provides.

mod app;

use std::env;
use std::path::PathBuf;
use std::process;

use eframe::egui;
use tracing::{debug, error, info, warn};

use glassbox::config::{Config, ConfigLoader};
use glassbox::error::Result;

use app::GlassboxApp;

/// Parsed command line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Window width override
    width: Option<f32>,
    /// Window height override
    height: Option<f32>,
    /// Console scope override ("module" or an instance name)
    scope: Option<String>,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--width" | "-w" => {
                    if i + 1 < args.len() {
                        app_args.width = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--height" | "-h" => {
                    if i + 1 < args.len() {
                        app_args.height = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--scope" | "-s" => {
                    if i + 1 < args.len() {
                        app_args.scope = Some(args[i + 1].clone());
                        i += 1;
                    } else {
                        return Err("Missing scope name".into());
                    }
                }
                "--help" | "-?" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("glassbox v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                _ => {
                    warn!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("Glassbox - an embeddable live developer console for egui applications");
    println!();
    println!("USAGE:");
    println!("    glassbox [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -w, --width <WIDTH>    Initial window width");
    println!("    -h, --height <HEIGHT>  Initial window height");
    println!("    -s, --scope <SCOPE>    Console scope: 'module' or an instance name");
    println!("                           (the demo exposes its state as 'app')");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    Glassbox looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $GLASSBOX_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/glassbox/config.toml");
    println!("    4. ~/.glassbox.toml");
    println!("    5. ./glassbox.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    GLASSBOX_CONFIG    Path to configuration file");
    println!("    GLASSBOX_DEBUG     Enable debug logging (1 or true)");
    println!("    RUST_LOG           Set logging level (error, warn, info, debug, trace)");
}

fn main() -> Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    // Initialize logging based on debug flag
    let debug_env = env::var("GLASSBOX_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    let log_level = if args.debug || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("starting glassbox v{}", env!("CARGO_PKG_VERSION"));
    debug!("debug logging enabled");

    let config = load_configuration(&args);
    let native_options = create_native_options(&args, &config);
    let app = GlassboxApp::new(&config);

    info!("opening window");
    if let Err(e) = eframe::run_native(
        "Glassbox",
        native_options,
        Box::new(|_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
    ) {
        error!("application failed: {}", e);
        process::exit(1);
    }

    info!("glassbox shutdown complete");
    Ok(())
}

/// Load configuration from file or defaults and apply argument overrides
fn load_configuration(args: &AppArgs) -> Config {
    debug!("loading configuration");

    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("GLASSBOX_CONFIG").ok().map(PathBuf::from));

    let mut config = if let Some(path) = &config_path {
        match ConfigLoader::load_from_file(path) {
            Ok(config) => {
                info!("configuration loaded from: {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to load config from {}: {}", path.display(), e);
                info!("falling back to default configuration");
                Config::default()
            }
        }
    } else {
        ConfigLoader::load_or_default()
    };

    if let Some(scope) = &args.scope {
        debug!("applying scope override: {}", scope);
        config.console.scope = scope.clone();
    }

    config
}

/// Create native options for the application window
fn create_native_options(args: &AppArgs, config: &Config) -> eframe::NativeOptions {
    let width = args.width.unwrap_or(config.ui.window_width);
    let height = args.height.unwrap_or(config.ui.window_height);

    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Glassbox")
            .with_app_id("glassbox")
            .with_icon(std::sync::Arc::new(create_window_icon()))
            .with_inner_size([width, height])
            .with_min_inner_size([400.0, 300.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    }
}

/// Generate a simple window icon: a pane of "glass" with a prompt chevron
fn create_window_icon() -> egui::IconData {
    let mut rgba = Vec::with_capacity(32 * 32 * 4);

    let bg_color = [30, 32, 44, 255];
    let pane_color = [52, 58, 82, 255];
    let prompt_color = [140, 220, 140, 255];

    for y in 0..32 {
        for x in 0..32 {
            let pixel = if (4..28).contains(&x) && (4..28).contains(&y) {
                // Chevron strokes around (10..18, 10..22)
                let on_upper = y >= 10 && y < 16 && (x as i32 - (8 + y as i32 - 10)).abs() < 2;
                let on_lower = y >= 16 && y < 22 && (x as i32 - (8 + 22 - y as i32 - 1)).abs() < 2;
                let on_bar = y >= 19 && y < 21 && x >= 17 && x < 24;
                if on_upper || on_lower || on_bar {
                    prompt_color
                } else {
                    pane_color
                }
            } else {
                bg_color
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    egui::IconData {
        rgba,
        width: 32,
        height: 32,
    }
}
