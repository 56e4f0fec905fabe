use std::ops::Index;

use glam::Mat4;

use crate::skeleton::BoneId;

/// Capacity of the output palette and of the shader-side uniform array.
pub const MAX_BONES: usize = 100;

/// The bone matrix palette: one final `global * inverse_bind` matrix per bone,
/// indexed by [`BoneId`].
///
/// All entries start as identity. A traversal only overwrites the entries of
/// bones it touches; the rest keep their last written value until the caller
/// explicitly calls [`BonePalette::reset`]. The backing storage is
/// index-aligned with the shared [`Skeleton`](crate::Skeleton), so
/// `matrices()[i]` is the skinning matrix for bone id `i`.
#[derive(Debug, Clone)]
pub struct BonePalette {
    matrices: Vec<Mat4>,
}

impl BonePalette {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matrices: vec![Mat4::IDENTITY; MAX_BONES],
        }
    }

    /// Reinitializes every entry to identity.
    pub fn reset(&mut self) {
        self.matrices.fill(Mat4::IDENTITY);
    }

    /// Writes the skinning matrix for `id`. Ids at or beyond [`MAX_BONES`]
    /// are dropped, mirroring the per-vertex influence capacity policy.
    pub fn set(&mut self, id: BoneId, matrix: Mat4) {
        if let Some(slot) = self.matrices.get_mut(id) {
            *slot = matrix;
        }
    }

    /// The full palette, ready for upload (`bytemuck::cast_slice` works on
    /// the returned slice).
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

impl Default for BonePalette {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<BoneId> for BonePalette {
    type Output = Mat4;

    fn index(&self, id: BoneId) -> &Mat4 {
        &self.matrices[id]
    }
}
