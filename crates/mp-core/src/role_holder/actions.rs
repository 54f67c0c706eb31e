//! Action identifiers carried by launch targets.
//!
//! These are opaque to the core; only equality matters.

pub const UPDATE_DEVICE_MANAGEMENT_ROLE_HOLDER: &str =
    "android.app.action.UPDATE_DEVICE_MANAGEMENT_ROLE_HOLDER";

pub const PROVISION_MANAGED_PROFILE: &str = "android.app.action.PROVISION_MANAGED_PROFILE";
pub const PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE: &str =
    "android.app.action.PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE";
pub const PROVISION_FINANCED_DEVICE: &str = "android.app.action.PROVISION_FINANCED_DEVICE";
pub const PROVISION_FINALIZATION: &str = "android.app.action.PROVISION_FINALIZATION";

pub const ROLE_HOLDER_PROVISION_MANAGED_PROFILE: &str =
    "android.app.action.ROLE_HOLDER_PROVISION_MANAGED_PROFILE";
pub const ROLE_HOLDER_PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE: &str =
    "android.app.action.ROLE_HOLDER_PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE";
pub const ROLE_HOLDER_PROVISION_FINALIZATION: &str =
    "android.app.action.ROLE_HOLDER_PROVISION_FINALIZATION";

/// Actions a role holder must resolve before provisioning is delegated to it.
pub const ROLE_HOLDER_REQUIRED_ACTIONS: [&str; 3] = [
    ROLE_HOLDER_PROVISION_MANAGED_PROFILE,
    ROLE_HOLDER_PROVISION_MANAGED_DEVICE_FROM_TRUSTED_SOURCE,
    ROLE_HOLDER_PROVISION_FINALIZATION,
];
