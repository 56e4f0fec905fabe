use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::skeleton::BoneId;

/// Hard cap on the number of bones that can influence a single vertex.
pub const MAX_BONE_INFLUENCE: usize = 4;

/// Sentinel marking an unused influence slot.
pub const UNSET_BONE: i32 = -1;

/// Smallest weight stored for an influence submitted with weight 0, so the
/// slot stays numerically distinguishable from an unset one.
pub const WEIGHT_EPSILON: f32 = 1e-6;

/// One skinned mesh vertex as handed to the GPU.
///
/// `bone_ids[i]` / `weights[i]` slot pairs are filled in submission order;
/// unused slots hold `-1` / `0.0`. The layout is `#[repr(C)]` and Pod so a
/// vertex buffer can be uploaded with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinnedVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub bone_ids: [i32; MAX_BONE_INFLUENCE],
    pub weights: [f32; MAX_BONE_INFLUENCE],
}

impl SkinnedVertex {
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
            bone_ids: [UNSET_BONE; MAX_BONE_INFLUENCE],
            weights: [0.0; MAX_BONE_INFLUENCE],
        }
    }

    /// Records one `(bone, weight)` influence in the first free slot.
    ///
    /// A weight of exactly 0 is stored as [`WEIGHT_EPSILON`]. Returns `false`
    /// when all slots are taken; the influence is then dropped. The cap is a
    /// capacity limit, not an error.
    pub fn add_influence(&mut self, bone: BoneId, weight: f32) -> bool {
        for slot in 0..MAX_BONE_INFLUENCE {
            if self.bone_ids[slot] == UNSET_BONE {
                self.bone_ids[slot] = bone as i32;
                self.weights[slot] = if weight == 0.0 { WEIGHT_EPSILON } else { weight };
                return true;
            }
        }
        false
    }

    /// Number of occupied influence slots.
    #[must_use]
    pub fn influence_count(&self) -> usize {
        self.bone_ids.iter().filter(|&&id| id != UNSET_BONE).count()
    }
}

impl Default for SkinnedVertex {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec2::ZERO)
    }
}

/// Import-time helper: writes one bone's `(vertex index, weight)` pairs into
/// the vertex buffer.
///
/// Influences that do not fit (vertex already has [`MAX_BONE_INFLUENCE`]
/// bones) are dropped, as are pairs whose vertex index is out of bounds.
/// Returns the number of dropped influences; the count is also traced so an
/// importer can surface it without changing the default silent behavior.
pub fn assign_bone_weights(
    vertices: &mut [SkinnedVertex],
    bone: BoneId,
    influences: &[(usize, f32)],
) -> usize {
    let mut dropped = 0;
    for &(vertex, weight) in influences {
        let recorded = vertices
            .get_mut(vertex)
            .is_some_and(|v| v.add_influence(bone, weight));
        if !recorded {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::trace!("bone {bone}: dropped {dropped} influence(s) over vertex capacity");
    }
    dropped
}
