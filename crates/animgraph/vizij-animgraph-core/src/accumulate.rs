//! Accumulation of per-clip weight contributions.
//!
//! A clip may be referenced by both sides of a cross-fade (e.g. `idle` in two
//! blends); its contributions are summed so weight is never double-applied or
//! lost. Entries keep first-insertion order for deterministic output.

use crate::ids::ClipId;

#[derive(Clone, Debug, Default)]
pub struct WeightAccumulator {
    entries: Vec<(ClipId, f32)>,
}

impl WeightAccumulator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add `weight` to `clip`. Zero contributions still register the clip so it
    /// gets an explicit 0.0 written.
    pub fn add(&mut self, clip: &ClipId, weight: f32) {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        if let Some((_, w)) = self.entries.iter_mut().find(|(c, _)| c == clip) {
            *w += weight;
        } else {
            self.entries.push((clip.clone(), weight));
        }
    }

    /// Summed weight for `clip`, clamped to [0,1]; 0.0 when absent.
    pub fn get(&self, clip: &ClipId) -> f32 {
        self.entries
            .iter()
            .find(|(c, _)| c == clip)
            .map(|(_, w)| w.clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn contains(&self, clip: &ClipId) -> bool {
        self.entries.iter().any(|(c, _)| c == clip)
    }

    /// Final (clamped) weights in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClipId, f32)> {
        self.entries.iter().map(|(c, w)| (c, w.clamp(0.0, 1.0)))
    }
}
