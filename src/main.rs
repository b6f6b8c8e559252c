//! Packmon CLI entry point.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use packmon::cli::{write_completions, Cli};
use packmon::config::MonitorSettings;
use packmon::index::HttpIndexSource;
use packmon::monitor::{CycleLog, LoopExit, RunLoop};
use packmon::probe::ConcurrentProber;
use packmon::shutdown::ShutdownSignal;
use packmon::transport::{HttpTransport, Transport};
use packmon::ui::{create_observer, create_ui, OutputContext, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("packmon=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("packmon=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        write_completions(shell, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.debug);
    tracing::debug!("packmon starting with args: {:?}", cli);

    let settings = match MonitorSettings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            let ctx = OutputContext::detect(Default::default(), cli.no_color);
            create_ui(&ctx).error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let ctx = OutputContext::detect(settings.mode, cli.no_color);
    let mut ui = create_ui(&ctx);

    match run(&settings, &ctx, ui.as_mut()) {
        Ok(LoopExit::Completed) => ExitCode::SUCCESS,
        Ok(LoopExit::Interrupted) => {
            println!("Interrupted by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

fn run(
    settings: &MonitorSettings,
    ctx: &OutputContext,
    ui: &mut dyn UserInterface,
) -> packmon::Result<LoopExit> {
    let shutdown = ShutdownSignal::install()?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_timeout(settings.timeout)?);

    let source = HttpIndexSource::new(settings.index_url.clone(), Arc::clone(&transport));
    let prober = ConcurrentProber::new(transport).with_limit(settings.jobs);

    let mut monitor = RunLoop::new(Box::new(source), prober)
        .with_vendors(settings.vendors.clone())
        .with_interval(settings.interval)
        .with_shutdown(shutdown);
    if let Some(path) = &settings.log {
        monitor = monitor.with_log(CycleLog::open(path)?);
    }

    let mut observer = create_observer(ctx);
    monitor.run(ui, observer.as_mut())
}
