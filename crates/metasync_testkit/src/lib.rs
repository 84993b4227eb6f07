//! # metasync testkit
//!
//! Test utilities for metasync.
//!
//! This crate provides:
//! - `FakeEngine`, an in-memory stand-in for the remote engine's metadata
//!   endpoint, with failure injection
//! - Helpers wiring a `MetadataClient` to it over a loopback transport
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use metasync_testkit::prelude::*;
//!
//! #[test]
//! fn reset_clears() {
//!     let client = loopback_client(FakeEngine::new());
//!     client.reset_metadata().unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use engine::*;
pub use fixtures::*;
pub use generators::*;
