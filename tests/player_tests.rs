//! Animation Player Tests
//!
//! Tests for:
//! - End-to-end palette evaluation over a two-bone hierarchy
//! - Time advance and unconditional loop wrap
//! - Clip switching (time reset, stale palette entries, explicit reset)
//! - Non-animated helper nodes passing through their rest transform
//! - Palette capacity policy

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use marrow::animation::{AnimationClip, AnimationPlayer, BoneTrack, Keyframes, NodeData};
use marrow::palette::MAX_BONES;
use marrow::skeleton::Skeleton;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn static_track(name: &str) -> BoneTrack {
    BoneTrack::new(
        name,
        Keyframes::constant(Vec3::ZERO),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    )
}

/// The reference rig: "hip" (id 0) with child "knee" (id 1), identity binds,
/// and a 10-tick clip at 1 tick/sec moving the knee from origin to (0, 1, 0).
/// The hip has no track and rests at identity.
fn knee_rig() -> (Skeleton, Arc<AnimationClip>) {
    let mut skeleton = Skeleton::new();
    skeleton.get_or_insert("hip", Mat4::IDENTITY);
    skeleton.get_or_insert("knee", Mat4::IDENTITY);

    let knee_track = BoneTrack::new(
        "knee",
        Keyframes::new("knee.position", vec![0.0, 10.0], vec![Vec3::ZERO, Vec3::Y]).unwrap(),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );

    let root = NodeData::new("hip", Mat4::IDENTITY).child(NodeData::new("knee", Mat4::IDENTITY));
    let clip = AnimationClip::new("bend", 10.0, 1.0, &root, vec![knee_track], &mut skeleton);
    (skeleton, Arc::new(clip))
}

// ============================================================================
// End-to-End Palette Evaluation
// ============================================================================

#[test]
fn knee_palette_at_midpoint() {
    let (skeleton, clip) = knee_rig();
    let mut player = AnimationPlayer::new(clip);

    player.advance(5.0, &skeleton);

    assert!(approx(player.time(), 5.0));
    let palette = player.bone_matrices();
    assert!(palette[0].abs_diff_eq(Mat4::IDENTITY, EPSILON));
    assert!(palette[1].abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)), EPSILON));
}

#[test]
fn advance_accumulates_across_frames() {
    let (skeleton, clip) = knee_rig();
    let mut player = AnimationPlayer::new(clip);

    player.advance(3.0, &skeleton);
    player.advance(4.0, &skeleton);

    assert!(approx(player.time(), 7.0));
    let knee = player.bone_matrices()[1];
    assert!(knee.abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.7, 0.0)), EPSILON));
}

#[test]
fn parent_transform_composes_into_children() {
    let mut skeleton = Skeleton::new();
    skeleton.get_or_insert("hip", Mat4::IDENTITY);
    skeleton.get_or_insert("knee", Mat4::IDENTITY);

    let hip_track = BoneTrack::new(
        "hip",
        Keyframes::constant(Vec3::new(2.0, 0.0, 0.0)),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );
    let knee_track = BoneTrack::new(
        "knee",
        Keyframes::constant(Vec3::new(0.0, 1.0, 0.0)),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );

    let root = NodeData::new("hip", Mat4::IDENTITY).child(NodeData::new("knee", Mat4::IDENTITY));
    let clip = AnimationClip::new(
        "pose",
        1.0,
        1.0,
        &root,
        vec![hip_track, knee_track],
        &mut skeleton,
    );

    let mut player = AnimationPlayer::new(Arc::new(clip));
    player.advance(0.25, &skeleton);

    let palette = player.bone_matrices();
    assert!(palette[0].abs_diff_eq(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)), EPSILON));
    // knee = hip global * knee local
    assert!(palette[1].abs_diff_eq(Mat4::from_translation(Vec3::new(2.0, 1.0, 0.0)), EPSILON));
}

#[test]
fn helper_node_passes_through_rest_transform() {
    let mut skeleton = Skeleton::new();
    skeleton.get_or_insert("hip", Mat4::IDENTITY);

    // "armature" is not a bone and has no track: its rest transform still
    // flows into the hip below it
    let root = NodeData::new("armature", Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)))
        .child(NodeData::new("hip", Mat4::IDENTITY));
    let clip = AnimationClip::new("idle", 1.0, 1.0, &root, vec![static_track("hip")], &mut skeleton);

    let mut player = AnimationPlayer::new(Arc::new(clip));
    player.advance(0.5, &skeleton);

    let hip = player.bone_matrices()[0];
    assert!(hip.abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)), EPSILON));
}

#[test]
fn inverse_bind_is_applied() {
    let mut skeleton = Skeleton::new();
    let bind = Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0));
    skeleton.get_or_insert("hip", bind);

    let hip_track = BoneTrack::new(
        "hip",
        Keyframes::constant(Vec3::new(0.0, 3.0, 0.0)),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );
    let root = NodeData::new("hip", Mat4::IDENTITY);
    let clip = AnimationClip::new("raise", 1.0, 1.0, &root, vec![hip_track], &mut skeleton);

    let mut player = AnimationPlayer::new(Arc::new(clip));
    player.advance(0.1, &skeleton);

    // global * inverse_bind = Translate(0,3,0) * Translate(0,-1,0)
    let expected = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
    assert!(player.bone_matrices()[0].abs_diff_eq(expected, EPSILON));
}

// ============================================================================
// Loop Wrap
// ============================================================================

#[test]
fn advancing_exactly_one_cycle_wraps_to_zero() {
    let (skeleton, clip) = knee_rig();
    let duration_seconds = clip.duration() / clip.ticks_per_second();
    let mut player = AnimationPlayer::new(clip);

    player.advance(duration_seconds, &skeleton);
    assert!(approx(player.time(), 0.0));
}

#[test]
fn wrap_keeps_time_in_range() {
    let (skeleton, clip) = knee_rig();
    let mut player = AnimationPlayer::new(clip.clone());

    player.advance(23.0, &skeleton); // 23 mod 10
    assert!(approx(player.time(), 3.0));
    assert!(player.time() >= 0.0 && player.time() < clip.duration());
}

#[test]
fn reverse_playback_wraps_from_far_end() {
    let (skeleton, clip) = knee_rig();
    let mut player = AnimationPlayer::new(clip);
    player.set_playback_rate(-1.0);

    player.advance(3.0, &skeleton);
    assert!(approx(player.time(), 7.0));
}

// ============================================================================
// Clip Switching
// ============================================================================

#[test]
fn play_resets_time_to_zero() {
    let (skeleton, clip) = knee_rig();
    let mut player = AnimationPlayer::new(clip.clone());

    player.advance(6.0, &skeleton);
    assert!(approx(player.time(), 6.0));

    player.play(clip);
    assert!(approx(player.time(), 0.0));

    // the next advance computes from the reset baseline
    player.advance(2.0, &skeleton);
    assert!(approx(player.time(), 2.0));
    let knee = player.bone_matrices()[1];
    assert!(knee.abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.2, 0.0)), EPSILON));
}

#[test]
fn switching_clips_leaves_untouched_bones_stale() {
    let mut skeleton = Skeleton::new();
    skeleton.get_or_insert("hip", Mat4::IDENTITY);
    skeleton.get_or_insert("knee", Mat4::IDENTITY);

    let full_root =
        NodeData::new("hip", Mat4::IDENTITY).child(NodeData::new("knee", Mat4::IDENTITY));
    let knee_track = BoneTrack::new(
        "knee",
        Keyframes::constant(Vec3::new(0.0, 5.0, 0.0)),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );
    let bend = Arc::new(AnimationClip::new(
        "bend",
        1.0,
        1.0,
        &full_root,
        vec![knee_track],
        &mut skeleton,
    ));

    // the second clip's hierarchy only contains the hip
    let hip_only_root = NodeData::new("hip", Mat4::IDENTITY);
    let sway = Arc::new(AnimationClip::new(
        "sway",
        1.0,
        1.0,
        &hip_only_root,
        vec![static_track("hip")],
        &mut skeleton,
    ));

    let mut player = AnimationPlayer::new(bend);
    player.advance(0.5, &skeleton);
    let stale_knee = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
    assert!(player.bone_matrices()[1].abs_diff_eq(stale_knee, EPSILON));

    // switch without resetting: the knee entry keeps its last written value
    player.play(sway);
    player.advance(0.5, &skeleton);
    assert!(player.bone_matrices()[1].abs_diff_eq(stale_knee, EPSILON));

    // explicit reset restores identity for bones the clip never touches
    player.reset_palette();
    player.advance(0.1, &skeleton);
    assert!(player.bone_matrices()[1].abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

// ============================================================================
// Palette Capacity
// ============================================================================

#[test]
fn palette_starts_as_identity() {
    let (_, clip) = knee_rig();
    let player = AnimationPlayer::new(clip);

    assert_eq!(player.palette().len(), MAX_BONES);
    for matrix in player.bone_matrices() {
        assert_eq!(*matrix, Mat4::IDENTITY);
    }
}

#[test]
fn bones_beyond_capacity_are_dropped_without_panic() {
    let mut skeleton = Skeleton::new();
    for i in 0..=MAX_BONES {
        skeleton.get_or_insert(&format!("bone{i}"), Mat4::IDENTITY);
    }
    assert_eq!(skeleton.len(), MAX_BONES + 1);

    // a node bound to id 100 writes nowhere, but traversal must not panic
    let over = format!("bone{MAX_BONES}");
    let root = NodeData::new(over.clone(), Mat4::IDENTITY);
    let clip = AnimationClip::new("over", 1.0, 1.0, &root, vec![static_track(&over)], &mut skeleton);

    let mut player = AnimationPlayer::new(Arc::new(clip));
    player.advance(0.5, &skeleton);
    assert_eq!(player.palette().len(), MAX_BONES);
}
