//! Animation module driving camera and object motion from keyframe curves
//!
//! Sequences are loaded from YAML, their channels evaluated per frame, and
//! the resulting camera applied to the scene before projection.

mod rig;
mod sequence;
mod pipeline;

pub use rig::{CameraRig, ObjectMotion, Vec3Track, view_matrix};
pub use sequence::{
    CameraInput, ChannelInput, KnotInput, ObjectInput, RotationInput, Sequence, SequenceInput,
    TangentMode, Vec3Input,
};
pub use pipeline::Frame;
