//! Clip provider trait and the clip binding table.
//!
//! The host implements [`ClipProvider`] over whatever actually plays skeletal
//! tracks. Every clip referenced by the graph is resolved exactly once when the
//! controller is built; unresolved clips stay in the table as absent and are
//! skipped (zero weight) from then on.

use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashMap;

use crate::graph::AnimGraph;
use crate::ids::ClipId;
use crate::outputs::ClipEventKind;

/// A notification raised by the provider for one of its handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProviderEvent<H> {
    pub handle: H,
    pub kind: ClipEventKind,
}

/// Playback backend for named clips.
pub trait ClipProvider {
    type Handle: Copy + Eq + Hash + Debug;

    fn resolve(&mut self, clip: &ClipId) -> Option<Self::Handle>;

    /// Weight in [0,1], independent per clip.
    fn set_weight(&mut self, handle: Self::Handle, weight: f32);

    /// Play from the beginning.
    fn start(&mut self, handle: Self::Handle);

    fn stop(&mut self, handle: Self::Handle);

    fn is_playing(&self, handle: Self::Handle) -> bool;

    /// Apply playback speed and loop flag before a clip is started.
    fn configure(&mut self, _handle: Self::Handle, _speed: f32, _looping: bool) {}

    /// Move queued started/ended/looped notifications into `out`, oldest first.
    fn drain_events(&mut self, _out: &mut Vec<ProviderEvent<Self::Handle>>) {}
}

impl<P: ClipProvider + ?Sized> ClipProvider for &mut P {
    type Handle = P::Handle;

    fn resolve(&mut self, clip: &ClipId) -> Option<Self::Handle> {
        (**self).resolve(clip)
    }
    fn set_weight(&mut self, handle: Self::Handle, weight: f32) {
        (**self).set_weight(handle, weight)
    }
    fn start(&mut self, handle: Self::Handle) {
        (**self).start(handle)
    }
    fn stop(&mut self, handle: Self::Handle) {
        (**self).stop(handle)
    }
    fn is_playing(&self, handle: Self::Handle) -> bool {
        (**self).is_playing(handle)
    }
    fn configure(&mut self, handle: Self::Handle, speed: f32, looping: bool) {
        (**self).configure(handle, speed, looping)
    }
    fn drain_events(&mut self, out: &mut Vec<ProviderEvent<Self::Handle>>) {
        (**self).drain_events(out)
    }
}

/// One row in the binding table.
#[derive(Clone, Debug)]
pub struct BindingRow<H> {
    pub clip: ClipId,
    pub handle: Option<H>,
}

/// Clip id → handle table built once per controller.
#[derive(Debug)]
pub struct ClipBindings<H> {
    rows: Vec<BindingRow<H>>,
    by_clip: HashMap<ClipId, usize>,
    by_handle: HashMap<H, usize>,
}

impl<H: Copy + Eq + Hash + Debug> ClipBindings<H> {
    /// Resolve every clip referenced by `graph`. Missing clips are logged and kept as absent.
    pub fn bind<P>(graph: &AnimGraph, provider: &mut P) -> Self
    where
        P: ClipProvider<Handle = H> + ?Sized,
    {
        let clips = graph.referenced_clips();
        let mut rows = Vec::with_capacity(clips.len());
        let mut by_clip = HashMap::with_capacity(clips.len());
        let mut by_handle = HashMap::with_capacity(clips.len());

        for clip in clips {
            let handle = provider.resolve(clip);
            match handle {
                Some(h) => {
                    by_handle.entry(h).or_insert(rows.len());
                }
                None => log::warn!(
                    "animation clip '{clip}' could not be resolved; it will contribute no weight"
                ),
            }
            by_clip.insert(clip.clone(), rows.len());
            rows.push(BindingRow {
                clip: clip.clone(),
                handle,
            });
        }

        Self {
            rows,
            by_clip,
            by_handle,
        }
    }

    #[inline]
    pub fn handle(&self, clip: &ClipId) -> Option<H> {
        self.by_clip.get(clip).and_then(|&i| self.rows[i].handle)
    }

    /// Reverse lookup used when republishing provider events.
    #[inline]
    pub fn clip_for(&self, handle: H) -> Option<&ClipId> {
        self.by_handle.get(&handle).map(|&i| &self.rows[i].clip)
    }

    #[inline]
    pub fn is_resolved(&self, clip: &ClipId) -> bool {
        self.handle(clip).is_some()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ClipId> {
        self.rows
            .iter()
            .filter(|r| r.handle.is_none())
            .map(|r| &r.clip)
    }

    pub fn rows(&self) -> &[BindingRow<H>] {
        &self.rows
    }
}
