mod args;
mod commands;
mod dispatch;


use tracing_subscriber::EnvFilter;

pub use commands::build_cli;
pub use dispatch::{AstParams, EditParams, GenParams};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GROVE_LOG";

/// Log level used when `GROVE_LOG` is unset.
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
