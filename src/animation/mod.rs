pub mod clip;
pub mod player;
pub mod tracks;
mod values;

pub use clip::{AnimationClip, BoneTrack, DEFAULT_TICKS_PER_SECOND, NodeData};
pub use player::AnimationPlayer;
pub use tracks::Keyframes;
pub use values::Interpolate;
