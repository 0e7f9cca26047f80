//! reqlint CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use reqlint::cli::{Cli, CommandDispatcher};
use reqlint::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber.
///
/// `--debug` forces `reqlint=debug`; otherwise `RUST_LOG` applies, falling
/// back to `reqlint=info`. Logs stay off stdout so JSON output remains
/// parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("reqlint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reqlint=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn output_mode(cli: &Cli) -> OutputMode {
    match (cli.quiet, cli.verbose) {
        (true, _) => OutputMode::Quiet,
        (false, true) => OutputMode::Verbose,
        (false, false) => OutputMode::Normal,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::debug!("reqlint starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let project_root = match cli.project.clone() {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_default(),
    };

    let mut ui = create_ui(output_mode(&cli));
    let dispatcher = CommandDispatcher::new(project_root);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
