use serde::{Serialize, Deserialize};

/// Control point of a keyframe curve: the value it passes through and the
/// slope it leaves with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Knot {
    pub value: f32,
    #[serde(default)]
    pub tangent: f32,
}

impl Knot {
    pub const fn new(value: f32, tangent: f32) -> Self {
        Self { value, tangent }
    }
}

/// Cubic Hermite blending weights at a local parameter `t` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteBasis {
    pub h00: f32,
    pub h10: f32,
    pub h01: f32,
    pub h11: f32,
}

impl HermiteBasis {
    pub fn at(t: f32) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;

        Self {
            h00: 2.0 * t3 - 3.0 * t2 + 1.0,
            h10: t3 - 2.0 * t2 + t,
            h01: -2.0 * t3 + 3.0 * t2,
            h11: t3 - t2,
        }
    }

    /// Blend two knots bounding a segment
    pub fn blend(&self, p0: &Knot, p1: &Knot) -> f32 {
        self.h00 * p0.value + self.h10 * p0.tangent + self.h01 * p1.value + self.h11 * p1.tangent
    }
}

/// One-dimensional Hermite keyframe curve.
///
/// A closed spline loops: knot indices wrap around and there is no repeated
/// end knot. An open spline holds its first and last knots and plays
/// ping-pong, running forward and then mirrored back over each cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    knots: Vec<Knot>,
    closed: bool,
}

impl Spline {
    /// Spline with `knot_count` zeroed knots
    pub fn new(knot_count: usize, closed: bool) -> Self {
        Self {
            knots: vec![Knot::default(); knot_count],
            closed,
        }
    }

    pub fn from_knots(knots: Vec<Knot>, closed: bool) -> Self {
        Self { knots, closed }
    }

    /// Spline through `values` with zero tangents
    pub fn from_values(values: &[f32], closed: bool) -> Self {
        Self::from_knots(values.iter().map(|&v| Knot::new(v, 0.0)).collect(), closed)
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn knots_mut(&mut self) -> &mut [Knot] {
        &mut self.knots
    }

    /// Knot count as seen by the parameter mapping. Open splines get one
    /// extra virtual end used for the ping-pong turnaround.
    pub fn effective_knot_count(&self) -> usize {
        if self.closed {
            self.knots.len()
        } else {
            self.knots.len() + 1
        }
    }

    /// Map any index onto a stored knot: wrap for closed splines, clamp to
    /// the ends for open ones.
    ///
    /// Panics if the spline has no knots.
    fn resolve(&self, index: isize) -> usize {
        let count = self.knots.len() as isize;
        let resolved = if self.closed {
            index.rem_euclid(count)
        } else {
            index.clamp(0, count - 1)
        };
        debug_assert!(
            (0..count).contains(&resolved),
            "knot number ({}) out of range",
            resolved
        );
        resolved as usize
    }

    /// Knot at a wrapped or clamped index
    pub fn knot(&self, index: isize) -> &Knot {
        &self.knots[self.resolve(index)]
    }

    pub fn knot_mut(&mut self, index: isize) -> &mut Knot {
        let i = self.resolve(index);
        &mut self.knots[i]
    }

    /// Evaluate segment `knot` at local parameter `t`
    fn evaluate_within_interval(&self, t: f32, knot: isize) -> f32 {
        let p0 = self.knot(knot);
        let p1 = self.knot(knot + 1);
        HermiteBasis::at(t).blend(p0, p1)
    }

    /// Evaluate at timeline position `t >= 0`.
    ///
    /// Open splines fold `t` into a forward pass over `[0, 1]` followed by a
    /// mirrored pass over `[1, 2)`. Closed splines keep going and wrap.
    pub fn evaluate(&self, t: f32) -> f32 {
        let mut t = t;

        if !self.closed {
            t = (t * 0.5).fract() * 2.0;
            if t > 1.0 {
                t = 2.0 - t;
            }
        }

        let scaled = t * (self.effective_knot_count() - 1) as f32;
        let segment = scaled.trunc();

        self.evaluate_within_interval(scaled - segment, segment as isize)
    }

    /// Walk the curve in `steps` equal strides of knot space, starting at
    /// the first knot.
    pub fn resample(&self, steps: usize) -> Resample<'_> {
        let stride = if steps == 0 {
            0.0
        } else {
            self.effective_knot_count() as f32 / steps as f32
        };

        Resample {
            spline: self,
            step: 0,
            steps,
            stride,
            t: 0.0,
            knot: 0,
        }
    }

    /// Resample into an arbitrary destination. `writer` is called once per
    /// step with increasing indices and decides how the value is stored.
    pub fn resample_into<D, F>(&self, steps: usize, destination: &mut D, mut writer: F)
    where
        D: ?Sized,
        F: FnMut(&mut D, usize, f32),
    {
        for (step, value) in self.resample(steps) {
            writer(destination, step, value);
        }
    }

    /// Derive tangents from neighbouring values: `0.5 * (prev + next)`.
    /// Open splines keep the tangents of their two end knots.
    pub fn attach_catmull_rom_tangents(&mut self) {
        let first = if self.closed { 0 } else { 1 };
        let last = self.knots.len().saturating_sub(first);

        for i in first..last {
            let i = i as isize;
            let prev = self.knot(i - 1).value;
            let next = self.knot(i + 1).value;
            self.knot_mut(i).tangent = 0.5 * (prev + next);
        }
    }
}

/// Iterator over `(step, value)` pairs produced by [`Spline::resample`].
///
/// Keeps a running segment index and local offset, carrying whole strides
/// into the segment index, so the walk is a single linear pass.
#[derive(Debug, Clone)]
pub struct Resample<'a> {
    spline: &'a Spline,
    step: usize,
    steps: usize,
    stride: f32,
    t: f32,
    knot: isize,
}

impl Iterator for Resample<'_> {
    type Item = (usize, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.steps {
            return None;
        }

        let step = self.step;
        let value = self.spline.evaluate_within_interval(self.t, self.knot);

        self.step += 1;
        self.t += self.stride;
        let carry = self.t.trunc();
        self.t -= carry;
        self.knot += carry as isize;

        Some((step, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Resample<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_loop() -> Spline {
        let mut spline = Spline::from_values(&[0.0, 10.0, 0.0, 10.0], true);
        spline.attach_catmull_rom_tangents();
        spline
    }

    #[test]
    fn test_new_is_zeroed() {
        let spline = Spline::new(3, false);
        assert_eq!(spline.len(), 3);
        assert!(spline.knots().iter().all(|k| *k == Knot::default()));
    }

    #[test]
    fn test_effective_knot_count() {
        assert_eq!(Spline::new(4, true).effective_knot_count(), 4);
        assert_eq!(Spline::new(4, false).effective_knot_count(), 5);
    }

    #[test]
    fn test_hermite_basis_ends() {
        let start = HermiteBasis::at(0.0);
        assert_eq!((start.h00, start.h10, start.h01, start.h11), (1.0, 0.0, 0.0, 0.0));
        let end = HermiteBasis::at(1.0);
        assert_eq!((end.h00, end.h10, end.h01, end.h11), (0.0, 0.0, 1.0, 0.0));

        let mid = HermiteBasis::at(0.5);
        assert!((mid.h00 - 0.5).abs() < 1e-6);
        assert!((mid.h10 - 0.125).abs() < 1e-6);
        assert!((mid.h01 - 0.5).abs() < 1e-6);
        assert!((mid.h11 + 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_knot_wraps_when_closed() {
        let spline = Spline::from_values(&[1.0, 2.0, 3.0], true);
        assert_eq!(spline.knot(-1).value, 3.0);
        assert_eq!(spline.knot(3).value, 1.0);
        assert_eq!(spline.knot(7).value, 2.0);
        assert_eq!(spline.knot(-5).value, 2.0);
    }

    #[test]
    fn test_knot_clamps_when_open() {
        let spline = Spline::from_values(&[1.0, 2.0, 3.0], false);
        assert_eq!(spline.knot(-4).value, 1.0);
        assert_eq!(spline.knot(1).value, 2.0);
        assert_eq!(spline.knot(9).value, 3.0);
    }

    #[test]
    #[should_panic]
    fn test_knot_on_empty_spline_panics() {
        Spline::new(0, false).knot(0);
    }

    #[test]
    fn test_closed_loop_hits_knots() {
        let spline = square_loop();
        let segments = (spline.effective_knot_count() - 1) as f32;
        for (k, expected) in [0.0, 10.0, 0.0, 10.0].iter().enumerate() {
            let value = spline.evaluate(k as f32 / segments);
            assert!((value - expected).abs() < 0.001, "knot {}: {}", k, value);
        }
    }

    #[test]
    fn test_closed_loop_wraps_past_last_knot() {
        let spline = square_loop();
        let segments = (spline.effective_knot_count() - 1) as f32;
        // one segment beyond the last knot lands back on the first one
        assert!(spline.evaluate(4.0 / segments).abs() < 0.001);
        assert!((spline.evaluate(5.0 / segments) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_open_ping_pong() {
        let spline = Spline::from_values(&[0.0, 1.0], false);

        assert!(spline.evaluate(0.0).abs() < 0.0001);
        assert!((spline.evaluate(0.5) - 1.0).abs() < 0.0001);
        assert!((spline.evaluate(1.0) - 1.0).abs() < 0.0001);
        assert!((spline.evaluate(1.5) - 1.0).abs() < 0.0001);
        // full cycle returns to the start
        assert!(spline.evaluate(2.0).abs() < 0.0001);
    }

    #[test]
    fn test_open_backward_pass_mirrors_forward() {
        let spline = Spline::from_values(&[0.0, 1.0], false);
        let forward = spline.evaluate(0.25);
        let backward = spline.evaluate(1.75);
        assert!((forward - 0.5).abs() < 0.0001);
        assert!((forward - backward).abs() < 0.0001);
        // the fold repeats every two units of t
        assert!((spline.evaluate(4.25) - forward).abs() < 0.0001);
    }

    #[test]
    fn test_resample_indices() {
        let spline = square_loop();
        let mut seen = Vec::new();
        spline.resample_into(7, &mut seen, |buf: &mut Vec<usize>, i, _| buf.push(i));
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
        assert_eq!(spline.resample(7).len(), 7);
    }

    #[test]
    fn test_resample_zero_steps() {
        let spline = square_loop();
        assert_eq!(spline.resample(0).count(), 0);
    }

    #[test]
    fn test_resample_one_step_per_knot() {
        let spline = square_loop();
        let values: Vec<f32> = spline.resample(4).map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.0, 10.0, 0.0, 10.0]);
    }

    #[test]
    fn test_resample_matches_direct_evaluation() {
        let spline = square_loop();
        let segments = spline.effective_knot_count() - 1;
        let steps = 16;
        for (step, value) in spline.resample(steps) {
            let knot_space = step as f32 * spline.effective_knot_count() as f32 / steps as f32;
            if knot_space > segments as f32 {
                break;
            }
            let direct = spline.evaluate(knot_space / segments as f32);
            assert!((value - direct).abs() < 0.001, "step {}: {} vs {}", step, value, direct);
        }
    }

    #[test]
    fn test_resample_into_integer_buffer() {
        let mut spline = Spline::from_values(&[0.0, 4.0, 0.0], false);
        spline.attach_catmull_rom_tangents();

        let mut table = [0i16; 4];
        spline.resample_into(4, &mut table[..], |buf: &mut [i16], i, v| buf[i] = v as i16);
        // last stride runs into the held end knot
        assert_eq!(table, [0, 4, 0, 0]);
    }

    #[test]
    fn test_catmull_rom_open_keeps_ends() {
        let mut spline = Spline::from_values(&[0.0, 4.0, 0.0], false);
        spline.attach_catmull_rom_tangents();
        assert_eq!(spline.knot(1).tangent, 0.0);
        assert_eq!(spline.knot(0).tangent, 0.0);
        assert_eq!(spline.knot(2).tangent, 0.0);

        let mut spline = Spline::from_values(&[1.0, 4.0, 3.0, 8.0], false);
        spline.knots_mut()[0].tangent = 9.0;
        spline.attach_catmull_rom_tangents();
        assert_eq!(spline.knot(0).tangent, 9.0);
        assert_eq!(spline.knot(1).tangent, 2.0);
        assert_eq!(spline.knot(2).tangent, 6.0);
        assert_eq!(spline.knot(3).tangent, 0.0);
    }

    #[test]
    fn test_catmull_rom_closed_uses_wrapped_neighbours() {
        let spline = square_loop();
        let tangents: Vec<f32> = spline.knots().iter().map(|k| k.tangent).collect();
        assert_eq!(tangents, vec![10.0, 0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_catmull_rom_tiny_splines() {
        let mut single = Spline::from_values(&[5.0], false);
        single.attach_catmull_rom_tangents();
        assert_eq!(single.knot(0).tangent, 0.0);

        let mut empty = Spline::new(0, true);
        empty.attach_catmull_rom_tangents();
        assert!(empty.is_empty());
    }
}
