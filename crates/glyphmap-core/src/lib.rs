//! Glyphmap Core
//!
//! Shared building blocks for the glyphmap crates: fast hash collections,
//! small geometry value types, logging setup and profiling hooks.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
