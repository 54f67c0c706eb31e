pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config_path};
pub use run::{run_dry_run, run_with_wiring, DryRunOutcome, DryRunReport};
pub use wiring::{wire_updater_session, UpdaterWiring};
