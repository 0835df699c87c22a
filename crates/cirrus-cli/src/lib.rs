//! # cirrus-cli — Subcommand Handlers
//!
//! Library side of the `cirrus` binary. Each subcommand has an args
//! struct and a handler in its own module.

pub mod validate;
