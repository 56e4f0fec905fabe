//! Layout conversion at the import boundary.
//!
//! Interpolation and traversal operate purely on column-major [`glam`] types;
//! source conventions (row-major matrices, w-first quaternions) are converted
//! exactly once, here.

use glam::{Mat4, Quat};

/// Builds a [`Mat4`] from a row-major 4×4 array, as exported by Assimp-style
/// importers.
#[must_use]
pub fn mat4_from_row_major(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// Builds a [`Quat`] from w-first components.
#[must_use]
pub fn quat_from_wxyz(w: f32, x: f32, y: f32, z: f32) -> Quat {
    Quat::from_xyzw(x, y, z, w)
}
