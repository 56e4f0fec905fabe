//! Builds a two-bone rig in code, plays a short bend clip and dumps the
//! resulting bone palette frame by frame.
//!
//! Run with `cargo run --example pose_dump`.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use marrow::animation::{AnimationClip, AnimationPlayer, BoneTrack, Keyframes, NodeData};
use marrow::skeleton::Skeleton;

fn main() {
    env_logger::init();

    let mut skeleton = Skeleton::new();
    skeleton.get_or_insert("hip", Mat4::IDENTITY);
    skeleton.get_or_insert("knee", Mat4::from_translation(Vec3::new(0.0, -0.5, 0.0)));

    let hip_track = BoneTrack::new(
        "hip",
        Keyframes::constant(Vec3::ZERO),
        Keyframes::new(
            "hip.rotation",
            vec![0.0, 12.0, 24.0],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_z(0.4),
                Quat::IDENTITY,
            ],
        )
        .expect("hip rotation keys"),
        Keyframes::constant(Vec3::ONE),
    );
    let knee_track = BoneTrack::new(
        "knee",
        Keyframes::new(
            "knee.position",
            vec![0.0, 12.0, 24.0],
            vec![Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.5, 0.0)],
        )
        .expect("knee position keys"),
        Keyframes::constant(Quat::IDENTITY),
        Keyframes::constant(Vec3::ONE),
    );

    let root = NodeData::new("hip", Mat4::IDENTITY).child(NodeData::new("knee", Mat4::IDENTITY));
    let bend = AnimationClip::new(
        "bend",
        24.0,
        24.0,
        &root,
        vec![hip_track, knee_track],
        &mut skeleton,
    );

    let mut player = AnimationPlayer::new(Arc::new(bend));

    let frames = 8;
    let dt = 1.0 / frames as f32;
    for frame in 0..frames {
        player.advance(dt, &skeleton);
        println!("frame {frame} (t = {:.2} ticks)", player.time());
        for (name, id) in [("hip", 0), ("knee", 1)] {
            let m = player.bone_matrices()[id];
            let p = m.w_axis;
            println!("  {name:<5} -> translation ({:+.3}, {:+.3}, {:+.3})", p.x, p.y, p.z);
        }
    }
}
