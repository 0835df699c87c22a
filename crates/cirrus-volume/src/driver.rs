//! # Mount Driver Registry
//!
//! Volume mount validation is pluggable by mount type. Each driver handles
//! one [`VolumeMountType`]; the registry maps the type tag on an incoming
//! mount to its driver and delegates. Like the overlay registry, the map
//! is built once by the composition root and read-only afterwards; there
//! is no import-time global registration.

use std::collections::HashMap;

use cirrus_core::ValidationError;

use crate::disk::DiskMountDriver;
use crate::disks::{PendingDisk, PodDiskLister};
use crate::mount::{VolumeMount, VolumeMountType};
use crate::overlay::OverlayRegistry;

/// Validates one volume mount type.
pub trait VolumeMountDriver: Send + Sync {
    /// The mount type this driver handles.
    fn mount_type(&self) -> VolumeMountType;

    /// Validate a mount attached to an existing pod and normalize it.
    fn validate_create_data(
        &self,
        pod: &dyn PodDiskLister,
        mount: VolumeMount,
    ) -> Result<VolumeMount, ValidationError>;

    /// Validate a mount attached during pod creation.
    fn validate_pod_create_data(
        &self,
        mount: &VolumeMount,
        pending: &[PendingDisk],
    ) -> Result<(), ValidationError>;
}

impl VolumeMountDriver for DiskMountDriver {
    fn mount_type(&self) -> VolumeMountType {
        VolumeMountType::Disk
    }

    fn validate_create_data(
        &self,
        pod: &dyn PodDiskLister,
        mount: VolumeMount,
    ) -> Result<VolumeMount, ValidationError> {
        DiskMountDriver::validate_create_data(self, pod, mount)
    }

    fn validate_pod_create_data(
        &self,
        mount: &VolumeMount,
        pending: &[PendingDisk],
    ) -> Result<(), ValidationError> {
        DiskMountDriver::validate_pod_create_data(self, mount, pending)
    }
}

/// Immutable mapping from mount type to its driver.
pub struct MountDriverRegistry {
    drivers: HashMap<VolumeMountType, Box<dyn VolumeMountDriver>>,
}

impl MountDriverRegistry {
    /// A registry with no drivers.
    pub fn empty() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// The registry with all built-in drivers, each wired to the built-in
    /// overlay validators.
    pub fn builtin() -> Self {
        Self::empty().with_driver(Box::new(DiskMountDriver::new(OverlayRegistry::builtin())))
    }

    /// Add a driver under its own mount type, replacing any previous
    /// registration for that type.
    pub fn with_driver(mut self, driver: Box<dyn VolumeMountDriver>) -> Self {
        self.drivers.insert(driver.mount_type(), driver);
        self
    }

    /// The driver registered for a mount type, if any.
    pub fn driver(&self, mount_type: VolumeMountType) -> Option<&dyn VolumeMountDriver> {
        self.drivers.get(&mount_type).map(Box::as_ref)
    }

    fn dispatch(&self, mount_type: VolumeMountType) -> Result<&dyn VolumeMountDriver, ValidationError> {
        self.driver(mount_type).ok_or_else(|| {
            ValidationError::internal(format!("no volume mount driver registered for {mount_type}"))
        })
    }

    /// Validate a mount attached to an existing pod via its type's driver.
    pub fn validate_create_data(
        &self,
        pod: &dyn PodDiskLister,
        mount: VolumeMount,
    ) -> Result<VolumeMount, ValidationError> {
        self.dispatch(mount.mount_type)?
            .validate_create_data(pod, mount)
    }

    /// Validate a mount attached during pod creation via its type's driver.
    pub fn validate_pod_create_data(
        &self,
        mount: &VolumeMount,
        pending: &[PendingDisk],
    ) -> Result<(), ValidationError> {
        self.dispatch(mount.mount_type)?
            .validate_pod_create_data(mount, pending)
    }
}

impl Default for MountDriverRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
