mod provider;
mod registry;

pub use provider::ConfiguredRoleHolderProvider;
pub use registry::InMemoryPackageRegistry;
