/*!
 * Sintra - Adaptive intersection signal controller
 *
 * Listens for vehicle position reports on the local network and derives the
 * green-light duration from how many vehicles are currently near the
 * intersection:
 * - HTTP ingest of JSON position reports (`POST /gps`)
 * - Bounded presence registry with 30 s staleness eviction
 * - Tiered green-time policy (0 / 5 / 10 / 20 s by default)
 * - Periodic status reporting and a `GET /status` snapshot
 *
 * The decision logic lives in `sintra-core-presence`; this crate is the I/O shell.
 */

pub mod config;
pub mod error;
pub mod logging;
pub mod reporter;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::{ControllerConfig, LogLevel};
pub use error::{Result, SintraError};
pub use server::{decode_report, router, serve, GpsReport, ReportRejection};
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
