//! Logging setup and crash reporting.
//!
//! Diagnostics go to stderr through `tracing` so stdout stays clean for
//! reports. `RUST_LOG` wins over the `-v` count when set.
//!
//! ```ignore
//! use firmrank::observability::{init_tracing, install_panic_hook, set_phase, Phase};
//!
//! install_panic_hook();
//! init_tracing(1);
//! let _phase = set_phase(Phase::SnapshotLoading);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_file, set_phase, ContextGuard, Phase,
    RunContext,
};
pub use panic_hook::install_panic_hook;

use tracing_subscriber::EnvFilter;

/// Default level for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
