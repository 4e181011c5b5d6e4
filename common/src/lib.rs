//! # mcping common
//!
//! Domain models and collaborator seams shared by the session pipeline and the CLI.
//!
//! * **[`network`]**: address families, targets and local interface matching.
//! * **[`resolver`]**: traits for name resolution and interface enumeration.
//! * **[`config`]**: session options and their validation.
//! * **[`error`]**: the error type every stage returns.

pub mod config;
pub mod error;
pub mod network;
pub mod resolver;
pub mod utils;

pub use error::SessionError;
