use crate::math::{Mat4, Spline, Vec3};

/// Three scalar channels animating one vector
#[derive(Debug, Clone)]
pub struct Vec3Track {
    pub x: Spline,
    pub y: Spline,
    pub z: Spline,
}

impl Vec3Track {
    pub fn evaluate(&self, t: f32) -> Vec3 {
        Vec3::new(self.x.evaluate(t), self.y.evaluate(t), self.z.evaluate(t))
    }

    fn channel(&self, axis: &str) -> Option<&Spline> {
        match axis {
            "x" => Some(&self.x),
            "y" => Some(&self.y),
            "z" => Some(&self.z),
            _ => None,
        }
    }
}

/// Curves driving the camera, one spline per scalar parameter
#[derive(Debug, Clone)]
pub enum CameraRig {
    /// Spherical look direction in radians plus an eye position
    Angles {
        azimuth: Spline,
        elevation: Spline,
        position: Vec3Track,
    },
    /// Free look direction plus an eye position
    Vector {
        direction: Vec3Track,
        position: Vec3Track,
    },
}

impl CameraRig {
    /// Camera matrix at timeline position `t`
    pub fn camera_at(&self, t: f32) -> Mat4 {
        match self {
            CameraRig::Angles {
                azimuth,
                elevation,
                position,
            } => Mat4::camera_from_angles(
                azimuth.evaluate(t),
                elevation.evaluate(t),
                position.evaluate(t),
            ),
            CameraRig::Vector { direction, position } => {
                Mat4::camera_from_vector(direction.evaluate(t), position.evaluate(t))
            }
        }
    }

    pub fn channel(&self, name: &str) -> Option<&Spline> {
        let (group, axis) = name.split_once('.').unwrap_or((name, ""));
        match (self, group) {
            (CameraRig::Angles { azimuth, .. }, "azimuth") if axis.is_empty() => Some(azimuth),
            (CameraRig::Angles { elevation, .. }, "elevation") if axis.is_empty() => {
                Some(elevation)
            }
            (CameraRig::Angles { position, .. }, "position") => position.channel(axis),
            (CameraRig::Vector { direction, .. }, "direction") => direction.channel(axis),
            (CameraRig::Vector { position, .. }, "position") => position.channel(axis),
            _ => None,
        }
    }
}

/// Rigid motion applied to the scene before viewing: uniform scale, Euler
/// rotation in degrees, then a fixed translation
#[derive(Debug, Clone)]
pub struct ObjectMotion {
    pub rotation: [Option<Spline>; 3],
    pub scale: f32,
    pub translation: Vec3,
}

impl Default for ObjectMotion {
    fn default() -> Self {
        Self {
            rotation: [None, None, None],
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

impl ObjectMotion {
    /// Rotation angles (degrees) at `t`; missing channels stay at zero
    pub fn angles_at(&self, t: f32) -> Vec3 {
        let angle = |channel: &Option<Spline>| channel.as_ref().map_or(0.0, |s| s.evaluate(t));
        Vec3::new(
            angle(&self.rotation[0]),
            angle(&self.rotation[1]),
            angle(&self.rotation[2]),
        )
    }

    pub fn model_at(&self, t: f32) -> Mat4 {
        let angles = self.angles_at(t);
        let tr = self.translation;
        Mat4::scaling(self.scale, self.scale, self.scale)
            .multiply(&Mat4::rotation(angles.x, angles.y, angles.z))
            .multiply(&Mat4::translation(tr.x, tr.y, tr.z))
    }

    pub fn channel(&self, name: &str) -> Option<&Spline> {
        let index = match name {
            "rotation.x" => 0,
            "rotation.y" => 1,
            "rotation.z" => 2,
            _ => return None,
        };
        self.rotation[index].as_ref()
    }
}

/// World-to-camera transform for a camera matrix built by
/// [`Mat4::camera_from_vector`]: move the eye to the origin, then project
/// onto the right/up/forward axes held in the camera's columns.
pub fn view_matrix(camera: &Mat4) -> Mat4 {
    let eye = camera.translation_part();
    Mat4::translation(-eye.x, -eye.y, -eye.z).multiply(&camera.without_translation())
}
