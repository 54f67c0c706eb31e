use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque descriptor used to ask the platform to start an external component.
///
/// Two targets are equal when action, package and extras all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaunchTarget {
    action: String,
    package: Option<String>,
    extras: BTreeMap<String, String>,
}

impl LaunchTarget {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            package: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn with_extras(mut self, extras: BTreeMap<String, String>) -> Self {
        self.extras.extend(extras);
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }
}

impl Display for LaunchTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{} -> {}", self.action, package),
            None => write!(f, "{}", self.action),
        }
    }
}
