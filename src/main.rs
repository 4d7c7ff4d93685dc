//! scriptenv CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use scriptenv::cli::{Cli, CommandContext, CommandDispatcher};
use scriptenv::platform::{app_root, home_dir, Platform, LAUNCHER_NAME};
use scriptenv::settings::Settings;
use scriptenv::ui::{create_ui, OutputMode, UserInterface};
use scriptenv::{Result, ScriptEnvError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so they never mix with a launched script's stdout.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("scriptenv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scriptenv=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolve the platform, paths and settings once, before any script is read.
fn build_context(cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandContext> {
    let platform = Platform::current()?;
    let home = home_dir();

    let settings = match Settings::load(&app_root(platform, &home, LAUNCHER_NAME)) {
        Ok(settings) => settings,
        Err(e @ ScriptEnvError::InvalidSettings { .. }) => {
            ui.warning(&format!("{}; using defaults", e));
            Settings::default()
        }
        Err(e) => return Err(e),
    };

    Ok(CommandContext::new(platform, home, settings).with_overrides(cli))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("scriptenv starting with args: {:?}", cli);

    let mut startup_ui = create_ui(OutputMode::from_quiet(cli.quiet));
    let context = match build_context(&cli, startup_ui.as_mut()) {
        Ok(context) => context,
        Err(e) => {
            startup_ui.error(&format!("Error: {}", e));
            return exit_code(1);
        }
    };

    let mut ui = create_ui(OutputMode::from_quiet(context.settings.quiet));
    let dispatcher = CommandDispatcher::new(context);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            exit_code(1)
        }
    }
}
