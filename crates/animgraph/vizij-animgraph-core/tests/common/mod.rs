#![allow(dead_code)]
//! In-memory clip provider used by the integration tests.

use std::collections::HashMap;

use vizij_animgraph_core::{ClipEventKind, ClipId, ClipProvider, ProviderEvent};

#[derive(Debug, Default)]
pub struct MockProvider {
    names: Vec<String>,
    weights: HashMap<usize, f32>,
    playing: Vec<bool>,
    config: Vec<(f32, bool)>,
    starts: Vec<usize>,
    stops: Vec<usize>,
    events: Vec<ProviderEvent<usize>>,
    pub resolve_calls: usize,
}

impl MockProvider {
    pub fn with_clips(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            playing: vec![false; names.len()],
            config: vec![(1.0, true); names.len()],
            starts: vec![0; names.len()],
            stops: vec![0; names.len()],
            ..Default::default()
        }
    }

    fn idx(&self, name: &str) -> usize {
        self.names
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("unknown clip {name}"))
    }

    pub fn weight(&self, name: &str) -> f32 {
        self.weights.get(&self.idx(name)).copied().unwrap_or(0.0)
    }

    pub fn playing(&self, name: &str) -> bool {
        self.playing[self.idx(name)]
    }

    pub fn starts(&self, name: &str) -> usize {
        self.starts[self.idx(name)]
    }

    pub fn stops(&self, name: &str) -> usize {
        self.stops[self.idx(name)]
    }

    pub fn config_of(&self, name: &str) -> (f32, bool) {
        self.config[self.idx(name)]
    }

    /// Total weight across every clip.
    pub fn total_weight(&self) -> f32 {
        self.weights.values().sum()
    }

    /// Clips currently carrying weight above `eps`.
    pub fn weighted_clips(&self, eps: f32) -> Vec<String> {
        let mut out: Vec<String> = self
            .weights
            .iter()
            .filter(|(_, w)| **w > eps)
            .map(|(i, _)| self.names[*i].clone())
            .collect();
        out.sort();
        out
    }

    /// Simulate a non-looping clip reaching its end.
    pub fn finish(&mut self, name: &str) {
        let i = self.idx(name);
        self.playing[i] = false;
        self.events.push(ProviderEvent {
            handle: i,
            kind: ClipEventKind::Ended,
        });
    }

    pub fn wrap(&mut self, name: &str) {
        let i = self.idx(name);
        self.events.push(ProviderEvent {
            handle: i,
            kind: ClipEventKind::Looped,
        });
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl ClipProvider for MockProvider {
    type Handle = usize;

    fn resolve(&mut self, clip: &ClipId) -> Option<usize> {
        self.resolve_calls += 1;
        self.names.iter().position(|n| n == clip.as_str())
    }

    fn set_weight(&mut self, handle: usize, weight: f32) {
        assert!((0.0..=1.0).contains(&weight), "weight out of range: {weight}");
        self.weights.insert(handle, weight);
    }

    fn start(&mut self, handle: usize) {
        self.playing[handle] = true;
        self.starts[handle] += 1;
        self.events.push(ProviderEvent {
            handle,
            kind: ClipEventKind::Started,
        });
    }

    fn stop(&mut self, handle: usize) {
        self.playing[handle] = false;
        self.stops[handle] += 1;
    }

    fn is_playing(&self, handle: usize) -> bool {
        self.playing[handle]
    }

    fn configure(&mut self, handle: usize, speed: f32, looping: bool) {
        self.config[handle] = (speed, looping);
    }

    fn drain_events(&mut self, out: &mut Vec<ProviderEvent<usize>>) {
        out.append(&mut self.events);
    }
}

pub fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}
