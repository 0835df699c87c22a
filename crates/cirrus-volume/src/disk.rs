//! # Disk Mount Driver
//!
//! Validates and normalizes `type: disk` volume mounts. Two entry points
//! cover the two call sites:
//!
//! - [`DiskMountDriver::validate_create_data`] for mounts attached to an
//!   existing pod, where the referenced disk must resolve to its canonical
//!   id against the pod's disk list;
//! - [`DiskMountDriver::validate_pod_create_data`] for mounts attached
//!   while the pod is still being created, where disks exist only as
//!   positions in the creation request.
//!
//! Each entry point is a single linear pass that stops at the first
//! failing check. The driver holds no state besides the read-only overlay
//! registry it is constructed with.

use cirrus_core::ValidationError;

use crate::disks::{PendingDisk, PodDiskLister};
use crate::mount::{DiskVolumeSource, VolumeMount};
use crate::overlay::OverlayRegistry;

/// Driver for disk-backed volume mounts.
pub struct DiskMountDriver {
    overlays: OverlayRegistry,
}

impl DiskMountDriver {
    /// A driver dispatching overlay validation to the given registry.
    pub fn new(overlays: OverlayRegistry) -> Self {
        Self { overlays }
    }

    /// Structural checks shared by both entry points: the disk reference
    /// exists, carries one of `index` or `id`, and `index` is non-negative.
    fn check_structure(mount: &VolumeMount) -> Result<&DiskVolumeSource, ValidationError> {
        let Some(disk) = mount.disk.as_ref() else {
            return Err(ValidationError::missing("disk"));
        };
        if disk.index.is_none() && disk.id.is_empty() {
            return Err(ValidationError::missing("one of disk.index or disk.id"));
        }
        if let Some(index) = disk.index {
            if index < 0 {
                return Err(ValidationError::invalid(format!(
                    "disk.index {index} is less than 0"
                )));
            }
        }
        Ok(disk)
    }

    /// Validate a mount attached to an existing pod and normalize it.
    ///
    /// On success the returned mount's disk reference always carries the
    /// canonical disk id and no index; `index` is an input convenience
    /// only and never part of the normalized record.
    pub fn validate_create_data(
        &self,
        pod: &dyn PodDiskLister,
        mut mount: VolumeMount,
    ) -> Result<VolumeMount, ValidationError> {
        Self::check_structure(&mount)?;
        let disks = pod
            .disks()
            .map_err(|err| ValidationError::collaborator("get pod disks", err))?;
        let Some(disk) = mount.disk.as_mut() else {
            // check_structure already rejected this shape.
            return Err(ValidationError::missing("disk"));
        };
        if let Some(index) = disk.index {
            let idx = index as usize;
            if idx >= disks.len() {
                return Err(ValidationError::invalid(format!(
                    "disk.index {index} is larger than disk count {}",
                    disks.len()
                )));
            }
            let entry = &disks[idx];
            disk.id = entry.id.clone();
            disk.index = None;
            if entry.is_template_backed() && disk.sub_directory.is_empty() {
                let template_id = entry.template_id.as_deref().unwrap_or_default();
                return Err(ValidationError::missing(format!(
                    "sub_directory is required when disk has template {template_id}"
                )));
            }
        } else {
            // Scan order is list order; a disk id match and a name match
            // are equally acceptable, first hit wins.
            let Some(entry) = disks.iter().find(|d| d.id == disk.id || d.name == disk.id) else {
                return Err(ValidationError::not_found(format!("pod disk {}", disk.id)));
            };
            disk.id = entry.id.clone();
            if entry.is_template_backed() && disk.sub_directory.is_empty() {
                let template_id = entry.template_id.as_deref().unwrap_or_default();
                return Err(ValidationError::missing(format!(
                    "sub_directory is required when disk has template {template_id}"
                )));
            }
        }
        self.overlays
            .validate_create_data(disk.overlay.as_ref())
            .map_err(|err| err.wrap("validate overlay"))?;
        Ok(mount)
    }

    /// Validate a mount attached during pod creation.
    ///
    /// Only positional references are meaningful before the pod and its
    /// disks exist, so an explicit id is rejected and no overlay
    /// validation is performed. The mount is not mutated.
    pub fn validate_pod_create_data(
        &self,
        mount: &VolumeMount,
        pending: &[PendingDisk],
    ) -> Result<(), ValidationError> {
        let disk = Self::check_structure(mount)?;
        if !disk.id.is_empty() {
            return Err(ValidationError::invalid(format!(
                "disk.id {} cannot be set while the pod is being created",
                disk.id
            )));
        }
        let Some(index) = disk.index else {
            return Err(ValidationError::missing("disk.index"));
        };
        if index < 0 {
            return Err(ValidationError::invalid(format!(
                "disk.index {index} is less than 0"
            )));
        }
        let idx = index as usize;
        if idx >= pending.len() {
            return Err(ValidationError::invalid(format!(
                "disk.index {index} is larger than disk count {}",
                pending.len()
            )));
        }
        let spec = &pending[idx];
        if spec.is_image_backed() && disk.sub_directory.is_empty() {
            let image_id = spec.image_id.as_deref().unwrap_or_default();
            return Err(ValidationError::missing(format!(
                "sub_directory is required when disk has image {image_id}"
            )));
        }
        Ok(())
    }
}
