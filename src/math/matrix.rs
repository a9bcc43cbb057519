use super::{Vec2, Vec3};

/// 4x4 affine transform in homogeneous coordinates, row-major.
///
/// Points are row vectors multiplied from the left (`p' = p * M`), so the
/// translation lives in row 3 (columns 0..3) and column 3 is reserved for
/// perspective terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4 {
    pub data: [[f32; 4]; 4],
}

impl Mat4 {
    /// Zero-filled matrix
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity() -> Self {
        let mut m = Self::new();
        for (i, row) in m.data.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = if i == j { 1.0 } else { 0.0 };
            }
        }
        m
    }

    pub fn from_rows(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// Combined Euler rotation, X then Y then Z. Angles are in degrees.
    pub fn rotation(angle_x: f32, angle_y: f32, angle_z: f32) -> Self {
        let (sin_x, cos_x) = angle_x.to_radians().sin_cos();
        let (sin_y, cos_y) = angle_y.to_radians().sin_cos();
        let (sin_z, cos_z) = angle_z.to_radians().sin_cos();

        let mut m = Self::identity();
        m.data[0][0] = cos_y * cos_z;
        m.data[0][1] = cos_y * sin_z;
        m.data[0][2] = -sin_y;
        m.data[1][0] = sin_x * sin_y * cos_z - cos_x * sin_z;
        m.data[1][1] = sin_x * sin_y * sin_z + cos_x * cos_z;
        m.data[1][2] = sin_x * cos_y;
        m.data[2][0] = cos_x * sin_y * cos_z + sin_x * sin_z;
        m.data[2][1] = cos_x * sin_y * sin_z - sin_x * cos_z;
        m.data[2][2] = cos_x * cos_y;
        m
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0][0] = x;
        m.data[1][1] = y;
        m.data[2][2] = z;
        m
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[3][0] = x;
        m.data[3][1] = y;
        m.data[3][2] = z;
        m
    }

    /// Off-axis perspective for a viewer at `(viewer_x, viewer_y)` with focal
    /// distance `viewer_z`. Meant to be applied with [`Mat4::transform_points`].
    pub fn perspective(viewer_x: f32, viewer_y: f32, viewer_z: f32) -> Self {
        let mut m = Self::identity();
        m.data[3][0] = -viewer_x;
        m.data[3][1] = -viewer_y;
        m.data[2][3] = 1.0 / viewer_z;
        m.data[3][3] = 0.0;
        m
    }

    /// Camera basis looking along `direction` from `position`.
    ///
    /// The up axis is `position` with its component along the view direction
    /// removed, so it depends on where the camera sits rather than on a fixed
    /// world-up. When `position` is parallel to `direction` the up and right
    /// axes collapse to zero; close to parallel they swing with rounding noise.
    pub fn camera_from_vector(direction: Vec3, position: Vec3) -> Self {
        let d = direction.normalize();
        let u = (position - d.scale(position.dot(&d))).normalize();
        let r = u.cross(&d);

        let mut m = Self::identity();
        m.data[0][0] = r.x;
        m.data[1][0] = r.y;
        m.data[2][0] = r.z;
        m.data[3][0] = position.x;
        m.data[0][1] = u.x;
        m.data[1][1] = u.y;
        m.data[2][1] = u.z;
        m.data[3][1] = position.y;
        m.data[0][2] = d.x;
        m.data[1][2] = d.y;
        m.data[2][2] = d.z;
        m.data[3][2] = position.z;
        m
    }

    /// Camera looking along spherical angles in radians; elevation is measured
    /// from the Z axis.
    pub fn camera_from_angles(azimuth: f32, elevation: f32, position: Vec3) -> Self {
        let (sin_az, cos_az) = azimuth.sin_cos();
        let (sin_el, cos_el) = elevation.sin_cos();
        let direction = Vec3::new(sin_el * cos_az, sin_el * sin_az, cos_el);
        Self::camera_from_vector(direction, position)
    }

    /// `self * other`
    pub fn multiply(&self, other: &Mat4) -> Self {
        let mut result = Self::new();
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[i][k] * other.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }
        result
    }

    /// `transpose(self) * other`.
    ///
    /// Equals `inverse(self) * other` only while the upper-left 3x3 of `self`
    /// is orthonormal and its translation row is zero. Scaled or sheared
    /// matrices give wrong results.
    pub fn inverse_multiply(&self, other: &Mat4) -> Self {
        let mut result = Self::new();
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[k][i] * other.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }
        result
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::new();
        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = self.data[j][i];
            }
        }
        result
    }

    /// Translation row as a vector
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.data[3][0], self.data[3][1], self.data[3][2])
    }

    /// Copy with the translation row cleared
    pub fn without_translation(&self) -> Self {
        let mut m = *self;
        m.data[3][0] = 0.0;
        m.data[3][1] = 0.0;
        m.data[3][2] = 0.0;
        m
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.data;
        Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        )
    }

    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        let m = &self.data;
        Vec3::new(
            m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
            m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
            m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
        )
    }

    /// Batch point transform (translation applied). `dst` and `src` must have
    /// the same length.
    pub fn transform_points(&self, dst: &mut [Vec3], src: &[Vec3]) {
        debug_assert_eq!(dst.len(), src.len(), "transform buffers differ in length");
        for (out, p) in dst.iter_mut().zip(src) {
            *out = self.transform_point(*p);
        }
    }

    pub fn transform_points_in_place(&self, points: &mut [Vec3]) {
        for p in points.iter_mut() {
            *p = self.transform_point(*p);
        }
    }

    /// Batch direction transform (translation ignored), for normals and
    /// velocities.
    pub fn transform_directions(&self, dst: &mut [Vec3], src: &[Vec3]) {
        debug_assert_eq!(dst.len(), src.len(), "transform buffers differ in length");
        for (out, d) in dst.iter_mut().zip(src) {
            *out = self.transform_direction(*d);
        }
    }

    pub fn transform_directions_in_place(&self, directions: &mut [Vec3]) {
        for d in directions.iter_mut() {
            *d = self.transform_direction(*d);
        }
    }

    /// Row-major flat copy
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, row) in self.data.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        out
    }
}

/// Perspective divide onto the screen plane.
///
/// Every `src[i].z` must be non-zero. A zero depth is not checked and yields
/// infinite or NaN coordinates.
pub fn project_to_2d(dst: &mut [Vec2], src: &[Vec3], viewer: Vec3) {
    debug_assert_eq!(dst.len(), src.len(), "projection buffers differ in length");
    for (out, p) in dst.iter_mut().zip(src) {
        *out = Vec2::new(
            p.x / p.z * viewer.z + viewer.x,
            p.y / p.z * viewer.z + viewer.y,
        );
    }
}
