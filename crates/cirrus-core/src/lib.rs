//! # cirrus-core — Foundational Types for the Cirrus Compute Stack
//!
//! Defines the error taxonomy shared by every validation surface in the
//! workspace. Request validators classify failures into a small, fixed set
//! of kinds; the transport layer maps those kinds onto status codes without
//! inspecting message text.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cirrus-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;

pub use error::{ErrorKind, ValidationError};
