//! # Boltslot
//!
//! Batch adjustment of bolt slot parameters in NC1 steel fabrication files.
//!
//! ## Architecture
//!
//! Boltslot is organized as a workspace with multiple crates:
//!
//! 1. **boltslot-core** - Bolt block transformer, adjustment values, thickness header
//! 2. **boltslot-settings** - Configuration files and validation
//! 3. **boltslot-batch** - Directory scanning, batch runners, run summaries
//! 4. **boltslot** - Command line binary that wires the crates together
//!
//! ## Processing modes
//!
//! - **Direct**: one adjustment for every file in the input folder
//! - **By thickness**: files grouped by the plate thickness on header lines
//!   13-15, one adjustment and one output folder per group

pub mod cli;

pub use boltslot_batch::{BatchError, BatchSummary, RunOptions};
pub use boltslot_core::{transform, Adjustment, AdjustmentRange, Thickness};
pub use boltslot_settings::Config;
pub use cli::{Cli, Command};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so the run summary on stdout stays clean
/// - RUST_LOG environment variable support (default level INFO)
/// - Optional JSON lines for log collectors
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
