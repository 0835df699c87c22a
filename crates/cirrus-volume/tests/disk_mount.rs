//! Integration test: raw JSON payloads through the driver registry.
//!
//! Exercises the whole path a request takes: deserialize the wire shape,
//! dispatch on the mount type, resolve the disk reference, validate the
//! overlay, and serialize the normalized record back out.

use cirrus_core::ErrorKind;
use cirrus_volume::{MountDriverRegistry, PendingDisk, PodDisk, VolumeMount};

fn inventory() -> Vec<PodDisk> {
    vec![
        PodDisk {
            id: "disk-0393af05".to_string(),
            name: "rootfs".to_string(),
            template_id: None,
        },
        PodDisk {
            id: "disk-77cf1b61".to_string(),
            name: "appdata".to_string(),
            template_id: Some("tpl-centos9".to_string()),
        },
    ]
}

fn parse(payload: serde_json::Value) -> VolumeMount {
    serde_json::from_value(payload).expect("payload should deserialize")
}

#[test]
fn test_attach_by_index_with_overlay() {
    let registry = MountDriverRegistry::builtin();
    let mount = parse(serde_json::json!({
        "type": "disk",
        "mount_path": "/srv/app",
        "disk": {
            "index": 1,
            "sub_directory": "releases",
            "overlay": {
                "type": "directory",
                "lower_dir": ["/opt/base", "/opt/layers/runtime"]
            }
        }
    }));

    let normalized = registry.validate_create_data(&inventory(), mount).unwrap();
    let disk = normalized.disk.clone().expect("normalized mount keeps its disk");
    assert_eq!(disk.id, "disk-77cf1b61");
    assert_eq!(disk.index, None);

    // The normalized record serializes without the positional reference.
    let json = serde_json::to_value(&normalized).unwrap();
    assert!(json["disk"].get("index").is_none());
    assert_eq!(json["disk"]["id"], "disk-77cf1b61");
}

#[test]
fn test_attach_by_name_resolves_canonical_id() {
    let registry = MountDriverRegistry::builtin();
    let mount = parse(serde_json::json!({
        "type": "disk",
        "mount_path": "/data",
        "disk": { "id": "rootfs" }
    }));

    let normalized = registry.validate_create_data(&inventory(), mount).unwrap();
    assert_eq!(normalized.disk.unwrap().id, "disk-0393af05");
}

#[test]
fn test_template_disk_without_sub_directory_is_rejected() {
    let registry = MountDriverRegistry::builtin();
    let mount = parse(serde_json::json!({
        "type": "disk",
        "disk": { "id": "appdata" }
    }));

    let err = registry
        .validate_create_data(&inventory(), mount)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("tpl-centos9"));
}

#[test]
fn test_overlay_error_keeps_kind_through_context() {
    let registry = MountDriverRegistry::builtin();
    let mount = parse(serde_json::json!({
        "type": "disk",
        "disk": {
            "index": 0,
            "overlay": { "type": "directory", "lower_dir": ["/opt/base", "/"] }
        }
    }));

    let err = registry
        .validate_create_data(&inventory(), mount)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    let msg = err.to_string();
    assert!(msg.starts_with("validate overlay"), "got: {msg}");
    assert!(msg.contains("lower_dir[1]"), "got: {msg}");
}

#[test]
fn test_pod_creation_flow() {
    let registry = MountDriverRegistry::builtin();
    let pending = vec![
        PendingDisk {
            image_id: Some("img-debian13".to_string()),
            size_mb: Some(10240),
        },
        PendingDisk {
            size_mb: Some(20480),
            ..Default::default()
        },
    ];

    // Image-backed pending disk needs a sub-directory.
    let mount = parse(serde_json::json!({
        "type": "disk",
        "disk": { "index": 0 }
    }));
    let err = registry
        .validate_pod_create_data(&mount, &pending)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert!(err.to_string().contains("img-debian13"));

    // Plain pending disk by position is fine.
    let mount = parse(serde_json::json!({
        "type": "disk",
        "disk": { "index": 1 }
    }));
    registry.validate_pod_create_data(&mount, &pending).unwrap();

    // Explicit ids are meaningless before the pod exists.
    let mount = parse(serde_json::json!({
        "type": "disk",
        "disk": { "id": "disk-0393af05" }
    }));
    let err = registry
        .validate_pod_create_data(&mount, &pending)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}
