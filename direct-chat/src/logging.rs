//! Wrapper around `tracing_subscriber` for logging.
//!
//! Logs go to stderr. Without `RUST_LOG`, this crate logs at `INFO` and its dependencies
//! (hyper, reqwest, rustls) only at `WARN`.
//!
//! ### Example
//!
//! ```rust
//! use direct_chat::prelude::*;
//!
//! Logger::init();
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn,direct_chat=info";

pub struct Logger;

impl Logger {
    /// Configure logging application-wide.
    ///
    /// Calling this multiple times is safe. Logger will be initialized only once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();
            get_config().log_info();
        });
    }
}

fn setup_logging() {
    fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(get_config().general.tty)
        .with_file(false)
        .with_target(false)
        .finish()
        .init();
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
