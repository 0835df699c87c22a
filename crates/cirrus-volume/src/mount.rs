//! # Volume Mount Wire Model
//!
//! The request-payload shapes for container volume mounts. These types are
//! what callers deserialize out of a create or attach request; validation
//! and normalization happen in the drivers, never here.
//!
//! Wire names are snake_case. The overlay is a tagged union keyed by
//! `type`, so an unrecognized overlay kind is unrepresentable once a value
//! has been deserialized; [`DiskOverlay::from_json`] is the ingestion gate
//! that turns an unknown tag into a typed validation error.

use cirrus_core::ValidationError;
use serde::{Deserialize, Serialize};

/// The kind of volume mount, selecting the driver that validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMountType {
    /// Mount of a pod disk (or a sub-directory of one).
    Disk,
}

impl std::fmt::Display for VolumeMountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Disk => "disk",
        };
        f.write_str(s)
    }
}

/// How mount events propagate between host and container.
///
/// Carried through unvalidated here; the container level owns its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountPropagation {
    /// No propagation in either direction.
    Private,
    /// Host mounts become visible inside the container.
    HostToContainer,
    /// Mounts propagate in both directions.
    Bidirectional,
}

/// A container volume mount as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Selects the driver that validates this mount.
    #[serde(rename = "type")]
    pub mount_type: VolumeMountType,

    /// Path inside the container at which the volume is mounted.
    #[serde(default)]
    pub mount_path: String,

    /// Mounted read-only if true.
    #[serde(default)]
    pub read_only: bool,

    /// Mount propagation mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagation: Option<MountPropagation>,

    /// Disk source. Required for `type: disk` mounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskVolumeSource>,
}

impl VolumeMount {
    /// A disk-backed mount with the given source and defaults elsewhere.
    pub fn disk_mount(disk: DiskVolumeSource) -> Self {
        Self {
            mount_type: VolumeMountType::Disk,
            mount_path: String::new(),
            read_only: false,
            propagation: None,
            disk: Some(disk),
        }
    }
}

/// Reference to the pod disk backing a mount.
///
/// On input, exactly one of `index` and `id` identifies the disk: `index`
/// positions into a disk list supplied by the caller's context, `id` is
/// either a disk's canonical identifier or its name. After validation
/// against an existing pod, `index` is cleared and `id` always holds the
/// canonical identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskVolumeSource {
    /// Ordinal into the externally supplied disk list. Signed on the wire
    /// so a negative input deserializes and is rejected with a typed error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,

    /// Canonical disk id, or a disk name to resolve.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Sub-directory of the disk to mount. Required when the resolved disk
    /// is template- or image-backed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_directory: String,

    /// Optional overlay layered on top of the mounted disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<DiskOverlay>,
}

/// The kind tag of a disk overlay, the key into the overlay registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Directory-based lower layers.
    Directory,
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Directory => "directory",
        };
        f.write_str(s)
    }
}

/// An overlay applied on top of a mounted disk, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiskOverlay {
    /// Union-filesystem overlay with directory lower layers.
    Directory(DirectoryOverlay),
}

/// Payload of the `directory` overlay variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryOverlay {
    /// Ordered overlay lower layers, each a filesystem path.
    #[serde(default)]
    pub lower_dir: Vec<String>,
}

impl DiskOverlay {
    /// The kind tag of this overlay.
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::Directory(_) => OverlayKind::Directory,
        }
    }

    /// Deserialize an overlay from raw JSON, turning an unrecognized `type`
    /// tag into an `InvalidValue` error instead of a bare decode failure.
    ///
    /// Callers ingesting untyped payloads go through here so the tag is
    /// rejected before any registry lookup can happen.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value)
            .map_err(|err| ValidationError::invalid(format!("invalid overlay input: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_core::ErrorKind;

    #[test]
    fn test_parse_disk_mount_payload() {
        let payload = serde_json::json!({
            "type": "disk",
            "mount_path": "/data",
            "read_only": true,
            "disk": {
                "index": 0,
                "sub_directory": "app",
                "overlay": {
                    "type": "directory",
                    "lower_dir": ["/base/layer"]
                }
            }
        });
        let mount: VolumeMount = serde_json::from_value(payload).unwrap();
        assert_eq!(mount.mount_type, VolumeMountType::Disk);
        assert!(mount.read_only);
        let disk = mount.disk.unwrap();
        assert_eq!(disk.index, Some(0));
        assert_eq!(disk.sub_directory, "app");
        let overlay = disk.overlay.unwrap();
        assert_eq!(overlay.kind(), OverlayKind::Directory);
    }

    #[test]
    fn test_overlay_from_json_known_tag() {
        let overlay = DiskOverlay::from_json(serde_json::json!({
            "type": "directory",
            "lower_dir": ["/a", "/b"]
        }))
        .unwrap();
        let DiskOverlay::Directory(dir) = overlay;
        assert_eq!(dir.lower_dir, vec!["/a", "/b"]);
    }

    #[test]
    fn test_overlay_from_json_unknown_tag() {
        let err = DiskOverlay::from_json(serde_json::json!({
            "type": "block_device",
            "lower_dir": ["/a"]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("invalid overlay input"));
    }

    #[test]
    fn test_cleared_index_is_not_serialized() {
        let mut mount = VolumeMount::disk_mount(DiskVolumeSource {
            index: Some(1),
            ..Default::default()
        });
        if let Some(disk) = mount.disk.as_mut() {
            disk.index = None;
            disk.id = "d2".to_string();
        }
        let json = serde_json::to_value(&mount).unwrap();
        assert!(json["disk"].get("index").is_none());
        assert_eq!(json["disk"]["id"], "d2");
    }
}
