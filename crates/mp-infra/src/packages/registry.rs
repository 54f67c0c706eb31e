use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use mp_core::config::PackageConfig;
use mp_core::ports::{PackageInstallCheckerPort, RoleHolderStubCheckerPort, TargetResolverPort};
use mp_core::{LaunchTarget, UserId};
use tracing::debug;

/// Package registry held in memory.
///
/// Stands in for the platform package manager: every package is visible to
/// every user. A suspended package stays installed but resolves nothing,
/// which is how a package looks while it is being updated.
#[derive(Default)]
pub struct InMemoryPackageRegistry {
    packages: RwLock<HashMap<String, PackageEntry>>,
}

#[derive(Debug, Clone, Default)]
struct PackageEntry {
    handled_actions: HashSet<String>,
    stub: bool,
    suspended: bool,
}

impl InMemoryPackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(packages: &[PackageConfig]) -> Self {
        let registry = Self::new();
        for package in packages {
            registry.install(package);
        }
        registry
    }

    pub fn install(&self, package: &PackageConfig) {
        let entry = PackageEntry {
            handled_actions: package.handled_actions.iter().cloned().collect(),
            stub: package.stub,
            suspended: false,
        };
        self.write().insert(package.name.clone(), entry);
        debug!(package = %package.name, "package installed");
    }

    pub fn uninstall(&self, package_name: &str) -> bool {
        self.write().remove(package_name).is_some()
    }

    /// Returns false when the package is not installed.
    pub fn set_suspended(&self, package_name: &str, suspended: bool) -> bool {
        match self.write().get_mut(package_name) {
            Some(entry) => {
                entry.suspended = suspended;
                debug!(package = package_name, suspended, "package suspension changed");
                true
            }
            None => false,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, PackageEntry>> {
        self.packages
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PackageEntry>> {
        self.packages
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PackageEntry {
    fn resolves(&self, action: &str) -> bool {
        !self.suspended && self.handled_actions.contains(action)
    }
}

impl PackageInstallCheckerPort for InMemoryPackageRegistry {
    fn is_package_installed(&self, package_name: &str) -> bool {
        self.read().contains_key(package_name)
    }
}

impl TargetResolverPort for InMemoryPackageRegistry {
    fn can_resolve(&self, target: &LaunchTarget, user: UserId) -> bool {
        let packages = self.read();
        let resolved = match target.package() {
            Some(package) => packages
                .get(package)
                .is_some_and(|entry| entry.resolves(target.action())),
            None => packages.values().any(|entry| entry.resolves(target.action())),
        };
        debug!(%target, %user, resolved, "resolving launch target");
        resolved
    }
}

impl RoleHolderStubCheckerPort for InMemoryPackageRegistry {
    fn is_stub(&self, package_name: &str) -> bool {
        self.read()
            .get(package_name)
            .is_some_and(|entry| entry.stub)
    }
}
