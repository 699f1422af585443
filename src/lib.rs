// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod ledger;
pub mod report;
pub mod rollover;
pub mod runtime;
pub mod session_log;
pub mod store;
pub mod tracker;
pub mod util;
