//! # Validate Subcommand
//!
//! Validates a volume mount spec file against either a pod's disk
//! inventory (attach-to-existing-pod path, prints the normalized mount) or
//! the disk list of a pod creation request (creation path, validate only).
//! Input files are JSON, or YAML when the extension says so.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::de::DeserializeOwned;

use cirrus_volume::{MountDriverRegistry, PendingDisk, PodDisk, VolumeMount};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Volume mount spec to validate (JSON or YAML).
    pub mount: PathBuf,

    /// Disks already attached to the pod (JSON or YAML list).
    #[arg(long, conflicts_with = "pending_disks")]
    pub disks: Option<PathBuf>,

    /// Disk specs of a pod creation request (JSON or YAML list).
    #[arg(long)]
    pub pending_disks: Option<PathBuf>,
}

/// Run the validate subcommand.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let registry = MountDriverRegistry::builtin();
    let mount: VolumeMount = load(&args.mount)?;

    if let Some(path) = &args.pending_disks {
        let pending: Vec<PendingDisk> = load(path)?;
        registry.validate_pod_create_data(&mount, &pending)?;
        tracing::info!(mount = %args.mount.display(), "mount spec is valid for pod creation");
        return Ok(());
    }

    let disks_path = args
        .disks
        .as_ref()
        .context("one of --disks or --pending-disks is required")?;
    let disks: Vec<PodDisk> = load(disks_path)?;
    let normalized = registry.validate_create_data(&disks, mount)?;
    tracing::debug!(mount = %args.mount.display(), "mount spec normalized");
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));
    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("parse {}", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
    }
}
