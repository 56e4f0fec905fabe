use std::sync::Arc;

use glam::Mat4;

use crate::animation::clip::{AnimationClip, ClipNode};
use crate::palette::BonePalette;
use crate::skeleton::Skeleton;

/// Advances a time cursor through an [`AnimationClip`] and rebuilds the bone
/// matrix palette once per frame.
///
/// The player owns its palette and shares the active clip through an [`Arc`];
/// swapping clips replaces the handle, and the previous clip is released as
/// soon as the last handle drops. Playback loops unconditionally; there is
/// no end-of-clip event.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: Arc<AnimationClip>,
    current_time: f32,
    playback_rate: f32,
    palette: BonePalette,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            current_time: 0.0,
            playback_rate: 1.0,
            palette: BonePalette::new(),
        }
    }

    /// Swaps the active clip and rewinds the cursor to 0.
    ///
    /// The palette is left untouched: entries for bones the new
    /// clip never animates keep their last written value until the next
    /// traversal overwrites them. Call [`AnimationPlayer::reset_palette`]
    /// first for a clean switch.
    pub fn play(&mut self, clip: Arc<AnimationClip>) {
        self.clip = clip;
        self.current_time = 0.0;
    }

    /// Reinitializes every palette entry to identity.
    pub fn reset_palette(&mut self) {
        self.palette.reset();
    }

    /// Advances the cursor by `dt` seconds and recomputes the palette.
    ///
    /// The cursor wraps modulo the clip duration, which also keeps every
    /// sample inside the keyframe range. `skeleton` must be the table the
    /// active clip was built against; palette slot `i` corresponds to bone
    /// id `i` in it.
    pub fn advance(&mut self, dt: f32, skeleton: &Skeleton) {
        let duration = self.clip.duration();
        if duration <= 0.0 {
            return;
        }

        self.current_time += self.clip.ticks_per_second() * dt * self.playback_rate;
        self.current_time %= duration;
        if self.current_time < 0.0 {
            // reverse playback wraps in from the far end
            self.current_time += duration;
        }

        let clip = Arc::clone(&self.clip);
        Self::visit(
            &mut self.palette,
            &clip,
            skeleton,
            clip.root(),
            Mat4::IDENTITY,
            self.current_time,
        );
    }

    /// Depth-first composition: every node contributes either its sampled
    /// track transform or its rest transform, and every node known to the
    /// skeleton writes `global * inverse_bind` into its palette slot.
    fn visit(
        palette: &mut BonePalette,
        clip: &AnimationClip,
        skeleton: &Skeleton,
        node: &ClipNode,
        parent: Mat4,
        time: f32,
    ) {
        let local = node
            .track
            .map_or(node.rest_transform, |i| clip.tracks()[i].local_transform(time));
        let global = parent * local;

        if let Some(id) = node.bone {
            if let Some(inverse_bind) = skeleton.inverse_bind(id) {
                palette.set(id, global * *inverse_bind);
            }
        }

        for child in &node.children {
            Self::visit(palette, clip, skeleton, child, global, time);
        }
    }

    /// Current cursor position in ticks.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.current_time
    }

    /// Playback speed multiplier (1.0 = real time, negative = reverse).
    #[inline]
    #[must_use]
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate;
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn palette(&self) -> &BonePalette {
        &self.palette
    }

    /// The palette as a plain matrix slice, ready for upload.
    #[inline]
    #[must_use]
    pub fn bone_matrices(&self) -> &[Mat4] {
        self.palette.matrices()
    }
}
