//! # Disk Collaborators
//!
//! Read-only views of the disks a mount can reference. The persistence
//! model lives elsewhere; validators see disks only through the
//! [`PodDiskLister`] seam, so tests supply literal in-memory lists.

use serde::{Deserialize, Serialize};

/// A disk already attached to a pod, as exposed by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodDisk {
    /// Canonical disk identifier.
    pub id: String,

    /// Human-readable name, usable as a lookup alias.
    #[serde(default)]
    pub name: String,

    /// Identifier of the template this disk was created from, if any.
    /// A template-backed disk requires an explicit mount sub-directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl PodDisk {
    /// Whether this disk's content originates from a template.
    pub fn is_template_backed(&self) -> bool {
        self.template_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Supplies the disks of an existing pod.
///
/// The call may hit storage and is allowed to fail; failures propagate to
/// the validator's caller wrapped with the sub-step label, never retried.
pub trait PodDiskLister {
    /// The pod's disks, in attachment order.
    fn disks(&self) -> anyhow::Result<Vec<PodDisk>>;
}

impl PodDiskLister for Vec<PodDisk> {
    fn disks(&self) -> anyhow::Result<Vec<PodDisk>> {
        Ok(self.clone())
    }
}

impl PodDiskLister for [PodDisk] {
    fn disks(&self) -> anyhow::Result<Vec<PodDisk>> {
        Ok(self.to_vec())
    }
}

/// A disk spec carried in a pod creation request, not yet persisted.
///
/// Pending disks have no identifier; mounts reference them by position
/// in the creation request only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingDisk {
    /// Image the disk will be created from, if any. An image-backed disk
    /// requires an explicit mount sub-directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,

    /// Requested disk size in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<i64>,
}

impl PendingDisk {
    /// Whether this disk's content will originate from an image.
    pub fn is_image_backed(&self) -> bool {
        self.image_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
