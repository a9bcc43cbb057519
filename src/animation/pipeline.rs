//! Per-frame evaluation: curves → camera → scene transform → projection

use log::{trace, warn};

use super::rig::view_matrix;
use super::sequence::Sequence;
use crate::math::{project_to_2d, Mat4, Point, Vec2, Vec3};

/// Output buffers for one rendered frame. Reused across frames so the
/// per-frame loop does not allocate once the buffers have grown.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Camera matrix the frame was rendered with
    pub camera: Mat4,
    /// Vertices in camera space
    pub view: Vec<Vec3>,
    /// Normals rotated into camera space (no translation)
    pub normals: Vec<Vec3>,
    /// Screen-space coordinates after the perspective divide
    pub projected: Vec<Vec2>,
    /// Integer coordinates for the rasterizer
    pub points: Vec<Point>,
    /// Vertices at or behind the eye plane; their projection is not meaningful
    pub behind_eye: usize,
}

impl Frame {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            camera: Mat4::identity(),
            view: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            projected: Vec::with_capacity(vertices),
            points: Vec::with_capacity(vertices),
            behind_eye: 0,
        }
    }

    fn resize(&mut self, vertices: usize, normals: usize) {
        self.view.resize(vertices, Vec3::ZERO);
        self.normals.resize(normals, Vec3::ZERO);
        self.projected.resize(vertices, Vec2::ZERO);
        self.points.resize(vertices, Point::default());
    }

    /// Projected points flattened as `[x0, y0, x1, y1, ...]`
    pub fn flat_points(&self) -> Vec<i16> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn flat_projected(&self) -> Vec<f32> {
        self.projected.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

impl Sequence {
    /// Timeline position of a frame
    pub fn time_at(&self, frame: usize) -> f32 {
        frame as f32 / self.frames as f32
    }

    pub fn camera_at(&self, frame: usize) -> Mat4 {
        self.camera.camera_at(self.time_at(frame))
    }

    /// Combined object and view transform for a frame
    pub fn transform_at(&self, frame: usize) -> (Mat4, Mat4) {
        let t = self.time_at(frame);
        let camera = self.camera.camera_at(t);
        let transform = self.object.model_at(t).multiply(&view_matrix(&camera));
        (camera, transform)
    }

    /// Evaluate every channel for `frame` and push the scene through the
    /// transform and projection stages into `out`
    pub fn render_frame(&self, frame: usize, out: &mut Frame) {
        let (camera, transform) = self.transform_at(frame);

        out.resize(self.vertices.len(), self.normals.len());
        out.camera = camera;

        transform.transform_points(&mut out.view, &self.vertices);
        transform.transform_directions(&mut out.normals, &self.normals);

        out.behind_eye = out.view.iter().filter(|p| p.z <= 0.0).count();
        if out.behind_eye > 0 {
            warn!(
                "frame {}: {} of {} vertices at or behind the eye plane",
                frame,
                out.behind_eye,
                out.view.len()
            );
        }

        project_to_2d(&mut out.projected, &out.view, self.viewer);
        for (point, p) in out.points.iter_mut().zip(&out.projected) {
            *point = Point::from(*p);
        }

        trace!(
            "frame {} (t = {:.4}): {} points projected",
            frame,
            self.time_at(frame),
            out.points.len()
        );
    }

    /// Convenience wrapper allocating a fresh frame
    pub fn render(&self, frame: usize) -> Frame {
        let mut out = Frame::with_capacity(self.vertices.len());
        self.render_frame(frame, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STILL_YAML: &str = r#"
name: "still"
frames: 4
viewer: { x: 160.0, y: 100.0, z: 200.0 }
camera:
  mode: vector
  direction:
    x: { knots: [0.0] }
    y: { knots: [0.0] }
    z: { knots: [1.0] }
  position:
    x: { knots: [0.0] }
    y: { knots: [10.0] }
    z: { knots: [-200.0] }
vertices:
  - [0.0, 10.0, 0.0]
  - [20.0, 10.0, 0.0]
  - [0.0, 10.0, -300.0]
normals:
  - [0.0, 0.0, -1.0]
  - [1.0, 0.0, 0.0]
  - [0.0, 1.0, 0.0]
"#;

    const SPIN_YAML: &str = r#"
name: "spin"
frames: 4
viewer: { x: 0.0, y: 0.0, z: 100.0 }
camera:
  mode: angles
  azimuth: { knots: [0.0] }
  elevation: { knots: [0.0] }
  position:
    x: { knots: [0.0] }
    y: { knots: [1.0] }
    z: { knots: [-100.0] }
object:
  rotation:
    z: { closed: true, knots: [0, 90, 180, 270], tangents: manual }
vertices:
  - [10.0, 0.0, 0.0]
"#;

    #[test]
    fn test_time_at() {
        let seq = Sequence::from_yaml(STILL_YAML).unwrap();
        assert_eq!(seq.time_at(0), 0.0);
        assert_eq!(seq.time_at(2), 0.5);
        assert_eq!(seq.time_at(6), 1.5);
    }

    #[test]
    fn test_render_centre_vertex() {
        let seq = Sequence::from_yaml(STILL_YAML).unwrap();
        let frame = seq.render(0);

        // straight ahead at the focal distance lands on the screen centre
        assert!((frame.view[0].z - 200.0).abs() < 1e-4);
        assert!((frame.projected[0].x - 160.0).abs() < 1e-4);
        assert!((frame.projected[0].y - 100.0).abs() < 1e-4);
        assert_eq!(frame.points[0], Point::new(160, 100));

        // 20 units right at depth 200 with focal 200 moves 20 pixels
        assert_eq!(frame.points[1], Point::new(180, 100));
    }

    #[test]
    fn test_render_counts_vertices_behind_eye() {
        let seq = Sequence::from_yaml(STILL_YAML).unwrap();
        let frame = seq.render(0);
        assert_eq!(frame.behind_eye, 1);
        assert!(frame.view[2].z < 0.0);
    }

    #[test]
    fn test_render_rotates_normals_without_translation() {
        let seq = Sequence::from_yaml(STILL_YAML).unwrap();
        let frame = seq.render(0);
        assert!((frame.normals[0].z + 1.0).abs() < 1e-5);
        assert!((frame.normals[1].x - 1.0).abs() < 1e-5);
        assert!((frame.normals[2].y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_render_frame_reuses_buffers() {
        let seq = Sequence::from_yaml(STILL_YAML).unwrap();
        let mut frame = Frame::default();
        seq.render_frame(0, &mut frame);
        let first = frame.points.clone();
        seq.render_frame(3, &mut frame);
        assert_eq!(frame.points.len(), 3);
        // constant channels: every frame looks the same
        assert_eq!(frame.points, first);
        assert_eq!(frame.flat_points().len(), 6);
        assert_eq!(frame.flat_projected().len(), 6);
    }

    #[test]
    fn test_object_rotation_follows_curve() {
        let seq = Sequence::from_yaml(SPIN_YAML).unwrap();
        let rotation = seq.channel("rotation.z").unwrap();
        assert_eq!(rotation.effective_knot_count() - 1, 3);

        // frame 0: no rotation, vertex 10 units right of the eye at depth 100
        let frame = seq.render(0);
        assert!((frame.view[0].x - 10.0).abs() < 1e-3);
        assert!((frame.projected[0].x - 10.0).abs() < 1e-3);

        // t = 1/3 reaches the 90 degree knot: the vertex swings onto the y axis
        let mut seq = seq;
        seq.frames = 3;
        let frame = seq.render(1);
        assert!(frame.view[0].x.abs() < 1e-3);
        // eye sits one unit up, so the rotated vertex ends nine units above it
        assert!((frame.view[0].y - 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_camera_at_matches_rig() {
        let seq = Sequence::from_yaml(SPIN_YAML).unwrap();
        let expected = Mat4::camera_from_angles(0.0, 0.0, Vec3::new(0.0, 1.0, -100.0));
        assert_eq!(seq.camera_at(0), expected);
        assert_eq!(seq.render(2).camera, expected);
    }
}
