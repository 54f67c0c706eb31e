//! Configuration domain model

pub mod provisioning_config;

pub use provisioning_config::{
    DryRunConfig, PackageConfig, ProvisioningConfig, RoleHolderConfig, UpdaterLaunchConfig,
};
