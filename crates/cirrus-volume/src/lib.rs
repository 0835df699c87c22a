//! # cirrus-volume — Container Volume Mount Validation
//!
//! Validates and normalizes the volume mounts of containers running inside
//! pods. A mount arrives as untrusted request payload; the driver for its
//! mount type checks its structure, resolves its disk reference against
//! the pod's disks (or the disks of a pod creation request), validates any
//! overlay sub-specification, and hands back the normalized record or a
//! typed error from `cirrus-core`.
//!
//! Every validator here is a pure function of its inputs plus registries
//! built once at composition time, so concurrent callers need no
//! synchronization. The persistence model is injected behind
//! [`PodDiskLister`]; nothing in this crate touches storage directly.

pub mod disk;
pub mod disks;
pub mod driver;
pub mod mount;
pub mod overlay;

pub use disk::DiskMountDriver;
pub use disks::{PendingDisk, PodDisk, PodDiskLister};
pub use driver::{MountDriverRegistry, VolumeMountDriver};
pub use mount::{
    DirectoryOverlay, DiskOverlay, DiskVolumeSource, MountPropagation, OverlayKind, VolumeMount,
    VolumeMountType,
};
pub use overlay::{DirectoryOverlayValidator, OverlayRegistry, OverlayValidator};
