//! Garage Door Common Library
//!
//! This crate provides the shared door types, constants and configuration
//! loading utilities for all garage door workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Pin ranges, timing bounds and defaults
//! - [`door`] - Door state model, door configuration and external codes
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use garage_common::prelude::*;
//!
//! let config = DoorConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod consts;
pub mod door;
pub mod prelude;
