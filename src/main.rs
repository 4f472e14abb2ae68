use clap::Parser;
use crumbs::cli::{execute_command, output, Cli};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

const VERBOSITY_CAPPED: &str = "crumbs: -d given more than three times, using trace level";

/// Maps the `-d` count to a level; `None` as the second value means no notice.
fn verbosity_level(verbosity: u8) -> (LevelFilter, Option<&'static str>) {
    match verbosity {
        0 => (LevelFilter::WARN, None),
        1 => (LevelFilter::INFO, None),
        2 => (LevelFilter::DEBUG, None),
        3 => (LevelFilter::TRACE, None),
        _ => (LevelFilter::TRACE, Some(VERBOSITY_CAPPED)),
    }
}

fn setup_logging(verbosity: u8) {
    let (filter, notice) = verbosity_level(verbosity);
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }

    // Dependencies stay quiet below -ddd
    let noisy_modules = ["config", "clap"];
    let module_filter = filter_fn(move |metadata| {
        verbosity >= 3
            || !noisy_modules
                .iter()
                .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
