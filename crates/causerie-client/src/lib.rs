pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod locks;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use commands::contacts::StatusFeed;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use ids::IdGenerator;
pub use state::AppState;

/// Install the global tracing subscriber.  `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("causerie_client=debug,causerie_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
