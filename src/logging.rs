//! Logging initialization.
//!
//! Uses `tracing` with `tracing-subscriber`, writing to stderr. The level can
//! be overridden with `RUST_LOG`, e.g. `RUST_LOG=linear_tasks=debug`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "linear_tasks=info,reqwest=warn";

pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
