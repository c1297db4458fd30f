//! Inverse-distance blend weights for Blend nodes.
//!
//! The epsilon keeps the formula finite exactly on a sample point; as a side
//! effect the dominant weight there is just under 1.0 and its neighbours keep a
//! small residual share.

use crate::data::BlendSample;

pub const BLEND_EPSILON: f32 = 0.001;

#[inline]
fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dz = a[1] - b[1];
    (dx * dx + dz * dz).sqrt()
}

/// Write one weight per sample into `out` (cleared first). Weights sum to 1.0.
pub fn compute_blend_weights_into(samples: &[BlendSample], point: [f32; 2], out: &mut Vec<f32>) {
    out.clear();
    if samples.is_empty() {
        return;
    }
    let p = [
        if point[0].is_finite() { point[0] } else { 0.0 },
        if point[1].is_finite() { point[1] } else { 0.0 },
    ];

    let mut total = 0.0f32;
    for s in samples {
        let raw = 1.0 / (distance(p, s.position) + BLEND_EPSILON);
        total += raw;
        out.push(raw);
    }
    for w in out.iter_mut() {
        *w /= total;
    }
}

pub fn compute_blend_weights(samples: &[BlendSample], point: [f32; 2]) -> Vec<f32> {
    let mut out = Vec::with_capacity(samples.len());
    compute_blend_weights_into(samples, point, &mut out);
    out
}

/// Index of the highest weight; ties resolve to the earliest sample.
pub fn dominant_index(weights: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &w) in weights.iter().enumerate() {
        match best {
            Some((_, bw)) if w <= bw => {}
            _ => best = Some((i, w)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ClipId;

    fn samples(points: &[(&str, [f32; 2])]) -> Vec<BlendSample> {
        points
            .iter()
            .map(|(c, p)| BlendSample {
                clip: ClipId::from(*c),
                position: *p,
            })
            .collect()
    }

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn idle_walk_at_sample_point() {
        let s = samples(&[("idle", [0.0, 0.0]), ("walkForward", [0.0, 1.0])]);
        let w = compute_blend_weights(&s, [0.0, 0.0]);
        approx(w[0], 0.999, 1e-3);
        approx(w[1], 0.001, 1e-3);
        assert!(w[0] < 1.0);
        assert_eq!(dominant_index(&w), Some(0));
    }

    #[test]
    fn equidistant_point_splits_evenly() {
        let s = samples(&[("idle", [0.0, 0.0]), ("walkForward", [0.0, 1.0])]);
        let w = compute_blend_weights(&s, [0.0, 0.5]);
        approx(w[0], 0.5, 1e-6);
        approx(w[1], 0.5, 1e-6);

        let s = samples(&[
            ("idle", [0.0, 0.0]),
            ("walkForward", [0.0, 1.0]),
            ("strafeLeft", [-1.0, 0.0]),
        ]);
        let w = compute_blend_weights(&s, [0.0, 0.5]);
        approx(w[0], w[1], 1e-6);
        assert!(w[0] < 0.5 && w[2] > 0.0);
    }

    #[test]
    fn weights_sum_to_one_over_a_grid() {
        let s = samples(&[
            ("idle", [0.0, 0.0]),
            ("walkForward", [0.0, 1.0]),
            ("walkBack", [0.0, -1.0]),
            ("strafeLeft", [-1.0, 0.0]),
            ("strafeRight", [1.0, 0.0]),
        ]);
        let mut buf = Vec::new();
        for xi in -8..=8 {
            for zi in -8..=8 {
                let p = [xi as f32 * 0.37, zi as f32 * 0.41];
                compute_blend_weights_into(&s, p, &mut buf);
                let sum: f32 = buf.iter().sum();
                approx(sum, 1.0, 1e-5);
                assert!(buf.iter().all(|w| *w > 0.0 && *w < 1.0));
            }
        }
    }

    #[test]
    fn weight_decreases_with_distance() {
        let s = samples(&[("a", [0.0, 0.0]), ("b", [3.0, 0.0])]);
        let mut last = f32::INFINITY;
        for i in 0..=30 {
            let w = compute_blend_weights(&s, [-(i as f32) * 0.25, 0.0]);
            assert!(w[0] <= last + 1e-6, "step {i}: {} > {}", w[0], last);
            last = w[0];
        }
    }

    #[test]
    fn exact_sample_point_is_maximum() {
        let s = samples(&[("a", [0.0, 0.0]), ("b", [1.0, 1.0]), ("c", [-2.0, 0.5])]);
        for (i, sample) in s.iter().enumerate() {
            let w = compute_blend_weights(&s, sample.position);
            assert_eq!(dominant_index(&w), Some(i));
            assert!(w[i] < 1.0);
        }
    }

    #[test]
    fn non_finite_input_reads_as_origin() {
        let s = samples(&[("idle", [0.0, 0.0]), ("walkForward", [0.0, 1.0])]);
        let w = compute_blend_weights(&s, [f32::NAN, f32::INFINITY]);
        assert_eq!(w, compute_blend_weights(&s, [0.0, 0.0]));
    }
}
