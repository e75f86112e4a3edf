use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("compliance_monitor={},tower_http=info", level))
    })
}

pub fn init_cli_logger(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };

    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // containers ship stdout to a log collector
        )
        .init();
}

/// Picks the subscriber from the configured format (`json` or `compact`).
pub fn init_logger(format: &str, level: &str, verbose: bool) {
    if format.eq_ignore_ascii_case("json") {
        init_json_logger(if verbose { "debug" } else { level });
    } else {
        init_cli_logger(verbose, level);
    }
}
