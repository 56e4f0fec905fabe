use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::animation::tracks::Keyframes;
use crate::skeleton::{BoneId, Skeleton};

/// Rate assumed when an animation source reports no tick rate.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

/// One animated bone: position, rotation and scale channels sampled together.
#[derive(Debug, Clone)]
pub struct BoneTrack {
    pub bone_name: String,
    pub position: Keyframes<Vec3>,
    pub rotation: Keyframes<Quat>,
    pub scale: Keyframes<Vec3>,
}

impl BoneTrack {
    #[must_use]
    pub fn new(
        bone_name: impl Into<String>,
        position: Keyframes<Vec3>,
        rotation: Keyframes<Quat>,
        scale: Keyframes<Vec3>,
    ) -> Self {
        Self {
            bone_name: bone_name.into(),
            position,
            rotation,
            scale,
        }
    }

    /// The bone's local transform at `time` (in ticks).
    ///
    /// Composition order is fixed: `Translate * Rotate * Scale`, translation
    /// outermost.
    #[must_use]
    pub fn local_transform(&self, time: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.sample(time),
            self.rotation.sample(time),
            self.position.sample(time),
        )
    }
}

/// Importer-facing description of one node of the skeleton hierarchy.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub name: String,
    pub local_transform: Mat4,
    pub children: Vec<NodeData>,
}

impl NodeData {
    #[must_use]
    pub fn new(name: impl Into<String>, local_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            local_transform,
            children: Vec::new(),
        }
    }

    /// Appends a child node, builder style.
    #[must_use]
    pub fn child(mut self, child: NodeData) -> Self {
        self.children.push(child);
        self
    }
}

/// Hierarchy node with name lookups resolved into indices at load time, so
/// the per-frame traversal never hashes a string.
#[derive(Debug, Clone)]
pub(crate) struct ClipNode {
    pub(crate) rest_transform: Mat4,
    pub(crate) bone: Option<BoneId>,
    pub(crate) track: Option<usize>,
    pub(crate) children: Vec<ClipNode>,
}

impl ClipNode {
    fn resolve(
        data: &NodeData,
        skeleton: &Skeleton,
        track_of: &FxHashMap<&str, usize>,
    ) -> Self {
        Self {
            rest_transform: data.local_transform,
            bone: skeleton.id(&data.name),
            track: track_of.get(data.name.as_str()).copied(),
            children: data
                .children
                .iter()
                .map(|c| Self::resolve(c, skeleton, track_of))
                .collect(),
        }
    }
}

/// A loaded animation clip: duration, tick rate, per-bone tracks and the
/// resolved node hierarchy. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    ticks_per_second: f32,
    tracks: Vec<BoneTrack>,
    root: ClipNode,
}

impl AnimationClip {
    /// Builds a clip against the shared skeleton.
    ///
    /// Bones animated by the clip but never seen by the mesh importer are
    /// appended to the skeleton with an identity inverse bind; existing ids
    /// are never reassigned. Node names resolve to bone ids and track
    /// indices here, once.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        ticks_per_second: f32,
        root: &NodeData,
        tracks: Vec<BoneTrack>,
        skeleton: &mut Skeleton,
    ) -> Self {
        let name = name.into();
        let ticks_per_second = if ticks_per_second > 0.0 {
            ticks_per_second
        } else {
            DEFAULT_TICKS_PER_SECOND
        };

        let before = skeleton.len();
        let mut track_of: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, track) in tracks.iter().enumerate() {
            skeleton.get_or_insert(&track.bone_name, Mat4::IDENTITY);
            track_of.insert(track.bone_name.as_str(), index);
        }
        let root = ClipNode::resolve(root, skeleton, &track_of);

        log::debug!(
            "clip '{}' loaded: {} bone track(s), {} new bone(s), {} ticks at {} tps",
            name,
            tracks.len(),
            skeleton.len() - before,
            duration,
            ticks_per_second,
        );

        Self {
            name,
            duration,
            ticks_per_second,
            tracks,
            root,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip length in ticks.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[BoneTrack] {
        &self.tracks
    }

    #[inline]
    pub(crate) fn root(&self) -> &ClipNode {
        &self.root
    }
}
