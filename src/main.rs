use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ldapsift::app::App;
use ldapsift::config::{Config, Settings};

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();

    // Classify and print the report
    let app = App::new(settings);
    let verdict = app.run(cli.input_path(), &mut std::io::stdout().lock())?;

    Ok(ExitCode::from(cli.exit_status(verdict)))
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ldapsift=debug,ldapsift_core=debug")
    } else {
        EnvFilter::new("ldapsift=info,ldapsift_core=info")
    };

    // stdout carries only the report
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
