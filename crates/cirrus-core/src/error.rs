//! # Error Types — Validation Error Taxonomy
//!
//! All request validation in the workspace fails with a [`ValidationError`].
//! The taxonomy is deliberately small: a field that should have been set,
//! a value that is malformed or out of range, or a referenced object that
//! does not exist. Everything else is either an internal configuration fault
//! or a failure of an injected collaborator, both of which are kept distinct
//! from user input problems.
//!
//! ## Design
//!
//! - Wrapping an error with [`ValidationError::wrap`] adds a short context
//!   label ("get pod disks", "validate overlay") while preserving the
//!   underlying kind; callers branch on [`ValidationError::kind`], never on
//!   message text.
//! - The first failing check aborts the whole validation. There is no retry
//!   or partial success, so no variant carries recovery state.

use thiserror::Error;

/// Classification of a [`ValidationError`], stable across context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is absent or empty.
    MissingField,
    /// A value is malformed, out of range, or a disallowed combination.
    InvalidValue,
    /// A referenced object does not exist in the supplied scope.
    NotFound,
    /// A configuration fault inside the process, not a user input problem.
    Internal,
    /// An injected collaborator failed; the cause is passed through as-is.
    Collaborator,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Collaborator => "collaborator",
        };
        f.write_str(s)
    }
}

/// A validation failure surfaced to the caller of a validator.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is malformed, out of range, or a disallowed combination.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A referenced object does not exist in the supplied scope.
    #[error("not found: {0}")]
    NotFound(String),

    /// The process is miswired (e.g. a registry entry is missing for a
    /// kind that the type system admits). Never caused by user input.
    #[error("internal fault: {0}")]
    Internal(String),

    /// A short contextual label around an inner validation error,
    /// identifying which sub-step failed.
    #[error("{context}: {source}")]
    Context {
        /// Label for the sub-step that failed.
        context: String,
        /// The underlying error, kind preserved.
        #[source]
        source: Box<ValidationError>,
    },

    /// Failure of an injected collaborator (disk list retrieval and the
    /// like), propagated without reinterpretation.
    #[error("{context}: {source}")]
    Collaborator {
        /// Label for the external call that failed.
        context: String,
        /// The collaborator's own error.
        #[source]
        source: anyhow::Error,
    },
}

impl ValidationError {
    /// A `MissingField` error for the named field.
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingField(what.into())
    }

    /// An `InvalidValue` error with the given description.
    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidValue(what.into())
    }

    /// A `NotFound` error for the named reference.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// An `Internal` configuration fault.
    pub fn internal(what: impl Into<String>) -> Self {
        Self::Internal(what.into())
    }

    /// Wrap a collaborator failure with a label naming the external call.
    pub fn collaborator(context: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Collaborator {
            context: context.into(),
            source,
        }
    }

    /// Wrap this error with a context label, preserving its kind.
    pub fn wrap(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The kind of this error, looking through any context wrapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
            Self::Context { source, .. } => source.kind(),
            Self::Collaborator { .. } => ErrorKind::Collaborator,
        }
    }

    /// The HTTP status class the transport layer should use for this error.
    ///
    /// User input kinds are 4xx; internal and collaborator faults are the
    /// only 5xx conditions.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::MissingField | ErrorKind::InvalidValue => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal | ErrorKind::Collaborator => 500,
        }
    }
}
