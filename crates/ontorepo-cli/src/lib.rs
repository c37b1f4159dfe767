//! # Ontorepo CLI Library
//!
//! Command-line access to the URI resolver, the resource mapper and the
//! syntax table.

pub mod commands;

pub use commands::*;
