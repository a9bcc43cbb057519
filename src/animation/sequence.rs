//! YAML description of an animated sequence
//!
//! A sequence bundles the curve channels that drive the camera (and an
//! optional object motion) together with the scene vertices they act on.
//! Loading validates the input and compiles every channel into a [`Spline`].

use log::debug;
use serde::Deserialize;

use super::rig::{CameraRig, ObjectMotion, Vec3Track};
use crate::error::SequenceError;
use crate::math::{Knot, Spline, Vec3};

/// How knot tangents are obtained after loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TangentMode {
    /// Derive tangents from neighbouring knot values
    #[default]
    CatmullRom,
    /// Keep the tangents written in the file (zero when omitted)
    Manual,
}

/// A knot is either a bare value or a `{ value, tangent }` pair
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum KnotInput {
    Value(f32),
    Knot(Knot),
}

impl From<KnotInput> for Knot {
    fn from(input: KnotInput) -> Self {
        match input {
            KnotInput::Value(value) => Knot::new(value, 0.0),
            KnotInput::Knot(knot) => knot,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInput {
    #[serde(default)]
    pub closed: bool,
    pub knots: Vec<KnotInput>,
    #[serde(default)]
    pub tangents: TangentMode,
}

impl ChannelInput {
    pub fn compile(&self, name: &str) -> Result<Spline, SequenceError> {
        if self.knots.is_empty() {
            return Err(SequenceError::EmptyChannel {
                channel: name.to_string(),
            });
        }

        let knots = self.knots.iter().map(|&k| Knot::from(k)).collect();
        let mut spline = Spline::from_knots(knots, self.closed);
        if self.tangents == TangentMode::CatmullRom {
            spline.attach_catmull_rom_tangents();
        }
        Ok(spline)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vec3Input {
    pub x: ChannelInput,
    pub y: ChannelInput,
    pub z: ChannelInput,
}

impl Vec3Input {
    fn compile(&self, name: &str) -> Result<Vec3Track, SequenceError> {
        Ok(Vec3Track {
            x: self.x.compile(&format!("{}.x", name))?,
            y: self.y.compile(&format!("{}.y", name))?,
            z: self.z.compile(&format!("{}.z", name))?,
        })
    }
}

/// Camera channels, either spherical angles or a free direction vector
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraInput {
    Angles {
        azimuth: ChannelInput,
        elevation: ChannelInput,
        position: Vec3Input,
    },
    Vector {
        direction: Vec3Input,
        position: Vec3Input,
    },
}

/// Optional per-axis Euler rotation channels (degrees)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RotationInput {
    pub x: Option<ChannelInput>,
    pub y: Option<ChannelInput>,
    pub z: Option<ChannelInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectInput {
    #[serde(default)]
    pub rotation: RotationInput,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    #[serde(default)]
    pub translation: Vec3,
}

fn unit_scale() -> f32 {
    1.0
}

impl Default for ObjectInput {
    fn default() -> Self {
        Self {
            rotation: RotationInput::default(),
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

/// Top-level YAML document
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceInput {
    pub name: String,
    pub frames: usize,
    pub viewer: Vec3,
    pub camera: CameraInput,
    #[serde(default)]
    pub object: ObjectInput,
    #[serde(default)]
    pub vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
}

/// Compiled, ready-to-play sequence
#[derive(Debug, Clone)]
pub struct Sequence {
    pub name: String,
    /// Frames per unit of curve time
    pub frames: usize,
    /// Screen centre (x, y) and focal distance (z) used for projection
    pub viewer: Vec3,
    pub camera: CameraRig,
    pub object: ObjectMotion,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl Sequence {
    /// Parse and compile a sequence from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, SequenceError> {
        let input: SequenceInput = serde_yaml::from_str(yaml)?;
        Self::from_input(input)
    }

    pub fn from_input(input: SequenceInput) -> Result<Self, SequenceError> {
        if input.frames == 0 {
            return Err(SequenceError::NoFrames);
        }
        if input.viewer.z == 0.0 {
            return Err(SequenceError::ZeroViewerDistance);
        }
        if !input.normals.is_empty() && input.normals.len() != input.vertices.len() {
            return Err(SequenceError::NormalCountMismatch {
                vertices: input.vertices.len(),
                normals: input.normals.len(),
            });
        }

        let camera = match &input.camera {
            CameraInput::Angles {
                azimuth,
                elevation,
                position,
            } => CameraRig::Angles {
                azimuth: azimuth.compile("azimuth")?,
                elevation: elevation.compile("elevation")?,
                position: position.compile("position")?,
            },
            CameraInput::Vector { direction, position } => CameraRig::Vector {
                direction: direction.compile("direction")?,
                position: position.compile("position")?,
            },
        };

        let rotation = &input.object.rotation;
        let compile_axis = |channel: &Option<ChannelInput>, name: &str| {
            channel.as_ref().map(|c| c.compile(name)).transpose()
        };
        let object = ObjectMotion {
            rotation: [
                compile_axis(&rotation.x, "rotation.x")?,
                compile_axis(&rotation.y, "rotation.y")?,
                compile_axis(&rotation.z, "rotation.z")?,
            ],
            scale: input.object.scale,
            translation: input.object.translation,
        };

        let vertices: Vec<Vec3> = input.vertices.into_iter().map(Vec3::from).collect();
        let normals: Vec<Vec3> = input.normals.into_iter().map(Vec3::from).collect();

        debug!(
            "loaded sequence '{}': {} vertices, {} normals, {} frames per unit",
            input.name,
            vertices.len(),
            normals.len(),
            input.frames
        );

        Ok(Self {
            name: input.name,
            frames: input.frames,
            viewer: input.viewer,
            camera,
            object,
            vertices,
            normals,
        })
    }

    /// Look up a compiled channel by its dotted name, e.g. `azimuth`,
    /// `position.z` or `rotation.y`
    pub fn channel(&self, name: &str) -> Result<&Spline, SequenceError> {
        self.camera
            .channel(name)
            .or_else(|| self.object.channel(name))
            .ok_or_else(|| SequenceError::UnknownChannel {
                name: name.to_string(),
            })
    }
}
