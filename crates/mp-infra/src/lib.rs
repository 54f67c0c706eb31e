pub mod packages;
pub mod time;

pub use packages::{ConfiguredRoleHolderProvider, InMemoryPackageRegistry};
pub use time::TokioScheduler;
