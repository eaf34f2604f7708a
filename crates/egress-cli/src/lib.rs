//! Egress CLI library.
//!
//! This crate provides the output formatting used by the `egress-cli`
//! binary.

pub mod output;
