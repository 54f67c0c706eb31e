//! ManagedProvisioning bootstrap
//!
//! Wires configuration, tracing and adapters around the role holder updater
//! launch use cases.

pub mod bootstrap;
