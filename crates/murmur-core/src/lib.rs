//! # Murmur Core
//!
//! The domain layer of the Murmur platform.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ports;

pub use error::RepoError;
