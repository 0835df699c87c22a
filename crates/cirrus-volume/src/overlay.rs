//! # Overlay Validators
//!
//! Validation of the optional overlay sub-specification of a disk mount,
//! dispatched by overlay kind. The registry is an immutable map built once
//! at composition time; lookups never observe mutation, so unsynchronized
//! concurrent reads are safe.

use std::collections::HashMap;

use cirrus_core::ValidationError;

use crate::mount::{DiskOverlay, OverlayKind};

/// Validates one overlay shape at mount creation time.
///
/// Implementations are pure functions of the overlay value. Registering an
/// implementation under a kind makes the registry dispatch that kind to it.
pub trait OverlayValidator: Send + Sync {
    /// Validate the overlay of a mount being created.
    fn validate_create_data(&self, overlay: &DiskOverlay) -> Result<(), ValidationError>;
}

/// Validator for the `directory` overlay variant.
///
/// Rules over `lower_dir`: the list is non-empty, entries are non-empty
/// strings, and no entry is the filesystem root. Entries pass through
/// unchanged; there is no normalization.
#[derive(Debug, Default)]
pub struct DirectoryOverlayValidator;

impl OverlayValidator for DirectoryOverlayValidator {
    fn validate_create_data(&self, overlay: &DiskOverlay) -> Result<(), ValidationError> {
        let DiskOverlay::Directory(dir) = overlay;
        if dir.lower_dir.is_empty() {
            return Err(ValidationError::missing("lower_dir"));
        }
        for (idx, layer) in dir.lower_dir.iter().enumerate() {
            if layer.is_empty() {
                return Err(ValidationError::missing(format!("lower_dir[{idx}]")));
            }
            if layer == "/" {
                return Err(ValidationError::invalid(format!(
                    "lower_dir[{idx}] must not be the filesystem root"
                )));
            }
        }
        Ok(())
    }
}

/// Immutable mapping from overlay kind to its validator.
///
/// Built once by the composition root and read-only thereafter. A kind the
/// type system admits but the registry lacks is a wiring fault, reported as
/// an internal error rather than a user input problem.
pub struct OverlayRegistry {
    validators: HashMap<OverlayKind, Box<dyn OverlayValidator>>,
}

impl OverlayRegistry {
    /// A registry with no validators. Useful as a builder seed and in tests
    /// exercising the miswired-registry path.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// The registry with all built-in overlay validators.
    pub fn builtin() -> Self {
        Self::empty().with_validator(OverlayKind::Directory, Box::new(DirectoryOverlayValidator))
    }

    /// Add a validator for a kind, replacing any previous registration.
    pub fn with_validator(
        mut self,
        kind: OverlayKind,
        validator: Box<dyn OverlayValidator>,
    ) -> Self {
        self.validators.insert(kind, validator);
        self
    }

    /// The validator registered for a kind, if any.
    pub fn lookup(&self, kind: OverlayKind) -> Option<&dyn OverlayValidator> {
        self.validators.get(&kind).map(Box::as_ref)
    }

    /// Validate an optional overlay.
    ///
    /// Succeeds trivially when no overlay is present. Otherwise dispatches
    /// to the validator registered for the overlay's kind.
    pub fn validate_create_data(
        &self,
        overlay: Option<&DiskOverlay>,
    ) -> Result<(), ValidationError> {
        let Some(overlay) = overlay else {
            return Ok(());
        };
        let kind = overlay.kind();
        let validator = self.lookup(kind).ok_or_else(|| {
            ValidationError::internal(format!("no overlay validator registered for {kind}"))
        })?;
        validator.validate_create_data(overlay)
    }
}

impl Default for OverlayRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
