//! Embeddable core library for mcmaker.
//!
//! Provides a clap-free entry point that turns a list of
//! [`Operation`](mcmaker_types::ops::Operation)s into a rendered
//! MachineConfig.
//!
//! # Port traits
//!
//! Output is abstracted behind [`WritePort`](ports::WritePort). The
//! [`adapters`] module provides a filesystem/stdout implementation and an
//! in-memory one for embedding and tests.
//!
//! # Entry points
//!
//! - [`build_document`](pipeline::build_document): apply operations to a fresh builder
//! - [`run_build`](pipeline::run_build): build, render, and write the document

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export builder types so embedders don't need mcmaker-edit directly.
pub use mcmaker_edit::{BuildError, ConflictError, McMaker};
