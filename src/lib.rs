use wasm_bindgen::prelude::*;
use js_sys::{Float32Array, Int16Array};

pub mod animation;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod math;

pub use animation::{Frame, Sequence};
pub use error::SequenceError;
pub use math::{Mat4, Point, Spline, Vec2, Vec3};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    logging::init(log::LevelFilter::Info);
}

/// Sequence playback exposed to JavaScript
#[wasm_bindgen]
pub struct SequencePlayer {
    sequence: Sequence,
    /// Buffers of the most recently rendered frame
    frame: Frame,
}

#[wasm_bindgen]
impl SequencePlayer {
    /// Load a sequence from YAML
    #[wasm_bindgen(constructor)]
    pub fn new(yaml: &str) -> Result<SequencePlayer, JsValue> {
        let sequence = Sequence::from_yaml(yaml).map_err(to_js_error)?;
        let frame = Frame::with_capacity(sequence.vertices.len());

        log::info!(
            "sequence '{}' ready: {} vertices",
            sequence.name,
            sequence.vertices.len()
        );

        Ok(Self { sequence, frame })
    }

    #[wasm_bindgen]
    pub fn name(&self) -> String {
        self.sequence.name.clone()
    }

    /// Frames per unit of curve time
    #[wasm_bindgen]
    pub fn frames_per_unit(&self) -> u32 {
        saturating_u32(self.sequence.frames)
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> u32 {
        saturating_u32(self.sequence.vertices.len())
    }

    /// Render a frame; returns integer screen points as `[x0, y0, x1, y1, ...]`
    #[wasm_bindgen]
    pub fn render(&mut self, frame: u32) -> Int16Array {
        self.sequence.render_frame(frame as usize, &mut self.frame);
        Int16Array::from(&self.frame.flat_points()[..])
    }

    /// Render a frame; returns float screen coordinates
    #[wasm_bindgen]
    pub fn projected(&mut self, frame: u32) -> Float32Array {
        self.sequence.render_frame(frame as usize, &mut self.frame);
        Float32Array::from(&self.frame.flat_projected()[..])
    }

    /// Vertices at or behind the eye in the last rendered frame
    #[wasm_bindgen]
    pub fn behind_eye(&self) -> u32 {
        saturating_u32(self.frame.behind_eye)
    }

    /// Camera matrix for a frame, 16 floats row-major
    #[wasm_bindgen]
    pub fn camera_matrix(&self, frame: u32) -> Float32Array {
        let camera = self.sequence.camera_at(frame as usize);
        Float32Array::from(&camera.to_array()[..])
    }

    /// Resample a named channel (`azimuth`, `position.x`, `rotation.z`, ...)
    /// into a lookup table of `steps` values
    #[wasm_bindgen]
    pub fn bake_channel(&self, name: &str, steps: u32) -> Result<Float32Array, JsValue> {
        let spline = self.sequence.channel(name).map_err(to_js_error)?;

        let mut table = vec![0.0f32; steps as usize];
        spline.resample_into(steps as usize, &mut table[..], |buf: &mut [f32], i, value| {
            buf[i] = value
        });

        Ok(Float32Array::from(&table[..]))
    }
}

fn to_js_error(e: SequenceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
