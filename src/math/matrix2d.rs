use super::Point;

/// 3x3 affine transform for flat screen-space shapes, row-major with the
/// translation in row 2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat3 {
    pub data: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn identity() -> Self {
        let mut m = Self::default();
        for i in 0..3 {
            m.data[i][i] = 1.0;
        }
        m
    }

    /// Rotation in degrees
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        let mut m = Self::identity();
        m.data[0][0] = cos;
        m.data[1][0] = -sin;
        m.data[0][1] = sin;
        m.data[1][1] = cos;
        m
    }

    pub fn scaling(x: f32, y: f32) -> Self {
        let mut m = Self::identity();
        m.data[0][0] = x;
        m.data[1][1] = y;
        m
    }

    pub fn translation(x: f32, y: f32) -> Self {
        let mut m = Self::identity();
        m.data[2][0] = x;
        m.data[2][1] = y;
        m
    }

    pub fn multiply(&self, other: &Mat3) -> Self {
        let mut result = Self::default();
        for i in 0..3 {
            for j in 0..3 {
                result.data[i][j] = (0..3).map(|k| self.data[i][k] * other.data[k][j]).sum();
            }
        }
        result
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::default();
        for i in 0..3 {
            for j in 0..3 {
                result.data[i][j] = self.data[j][i];
            }
        }
        result
    }

    /// Map integer points through the transform. Results are truncated and
    /// saturate at the `i16` range.
    pub fn transform_points(&self, dst: &mut [Point], src: &[Point]) {
        debug_assert_eq!(dst.len(), src.len(), "transform buffers differ in length");
        let m = &self.data;
        for (out, p) in dst.iter_mut().zip(src) {
            let x = p.x as f32;
            let y = p.y as f32;
            *out = Point::new(
                (m[0][0] * x + m[1][0] * y + m[2][0]) as i16,
                (m[0][1] * x + m[1][1] * y + m[2][1]) as i16,
            );
        }
    }
}
