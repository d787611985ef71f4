//! Vector math re-exported from [`glam`].
//!
//! World-space positions, cell sizes and scroll factors are `Vec2`; padding
//! measured in whole cells is `IVec2`.

pub use glam::{IVec2, Vec2};
