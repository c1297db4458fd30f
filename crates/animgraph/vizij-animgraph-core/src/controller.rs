//! AnimController: owns the graph, variables, bindings and the active cross-fade,
//! and drives a [`ClipProvider`] once per frame.
//!
//! Tick order (fixed):
//! 1. advance the cross-fade (finalizing it at progress 1)
//! 2. recompute weights of the current node if it is a Blend
//! 3. apply all weights to the provider
//! 4. evaluate transitions out of the current node
//! 5. activate the winning transition's target, if any
//! 6. republish provider notifications
//!
//! `set_variable` and `play_node` are meant to be called between ticks.

use crate::accumulate::WeightAccumulator;
use crate::binding::{ClipBindings, ClipProvider, ProviderEvent};
use crate::blend::{compute_blend_weights_into, dominant_index};
use crate::config::Config;
use crate::crossfade::{CrossFade, FadeSource, FadeStep};
use crate::data::{GraphDefinition, Node};
use crate::error::AnimGraphError;
use crate::graph::AnimGraph;
use crate::ids::{ClipId, NodeId};
use crate::outputs::{ClipEvent, NodeEvent, Outputs};
use crate::transition::select_transition;
use crate::value::VarValue;
use crate::variables::VariableStore;

pub struct AnimController<P: ClipProvider> {
    cfg: Config,
    graph: AnimGraph,
    provider: P,
    bindings: ClipBindings<P::Handle>,
    vars: VariableStore,

    current: NodeId,
    /// Weights of the current node's samples when it is a Blend; empty otherwise.
    blend_weights: Vec<f32>,
    fade: Option<CrossFade>,
    /// Clips this controller has started and not yet stopped.
    live: Vec<ClipId>,

    acc: WeightAccumulator,
    provider_events: Vec<ProviderEvent<P::Handle>>,
    pending_node_events: Vec<NodeEvent>,
    outputs: Outputs,
}

impl<P: ClipProvider> AnimController<P> {
    /// Bind every referenced clip once, then enter the graph's initial node with a hard cut.
    pub fn new(graph: AnimGraph, mut provider: P, cfg: Config) -> Self {
        let bindings = ClipBindings::bind(&graph, &mut provider);
        let current = graph.initial().clone();
        let mut ctl = Self {
            cfg,
            graph,
            provider,
            bindings,
            vars: VariableStore::new(),
            current,
            blend_weights: Vec::new(),
            fade: None,
            live: Vec::new(),
            acc: WeightAccumulator::new(),
            provider_events: Vec::new(),
            pending_node_events: Vec::new(),
            outputs: Outputs::default(),
        };
        ctl.refresh_blend_weights();
        ctl.start_current_clips();
        ctl.pending_node_events.push(NodeEvent::NodeEntered {
            node: ctl.current.clone(),
            from: None,
            duration: 0.0,
        });
        ctl.apply_weights();
        ctl
    }

    /// Validate a definition and build a controller over it.
    pub fn from_definition(
        def: GraphDefinition,
        provider: P,
        cfg: Config,
    ) -> Result<Self, AnimGraphError> {
        Ok(Self::new(AnimGraph::from_definition(def)?, provider, cfg))
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.vars.set(name, value);
    }

    #[inline]
    pub fn variable(&self, name: &str) -> Option<VarValue> {
        self.vars.get(name)
    }

    #[inline]
    pub fn variables(&self) -> &VariableStore {
        &self.vars
    }

    /// Manual override: enter `node` now, bypassing transition evaluation.
    ///
    /// A zero duration is a hard cut. Targeting the current node is a no-op
    /// unless a cross-fade is in flight.
    pub fn play_node(
        &mut self,
        node: impl Into<NodeId>,
        duration: f32,
    ) -> Result<(), AnimGraphError> {
        let node = node.into();
        if !self.graph.contains(&node) {
            return Err(AnimGraphError::UnknownNode { id: node });
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimGraphError::InvalidDuration { duration });
        }
        if node == self.current && self.fade.is_none() {
            return Ok(());
        }
        self.activate(node, duration);
        Ok(())
    }

    /// Advance one frame by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();

        // 1) Cross-fade progress
        let finished = self
            .fade
            .as_mut()
            .is_some_and(|f| f.advance(dt) == FadeStep::Finished);
        if finished {
            self.finish_fade();
        }

        // 2) Blend weights from this tick's variables
        self.refresh_blend_weights();

        // 3) Provider weights
        self.apply_weights();

        // 4) Transition evaluation sees this tick's weights and completion state
        let completed = self.current_completed();
        let fired = select_transition(&self.graph, &self.current, &self.vars, completed).map(
            |(index, t)| {
                log::debug!("transition #{index} fired: {t}");
                (index, t.to.clone(), t.duration)
            },
        );

        // 5) Activation
        if let Some((index, to, duration)) = fired {
            self.pending_node_events.push(NodeEvent::TransitionFired {
                index,
                from: self.current.clone(),
                to: to.clone(),
            });
            self.activate(to, duration);
        }

        // 6) Notifications
        self.collect_clip_events();
        self.outputs
            .node_events
            .append(&mut self.pending_node_events);

        &self.outputs
    }

    #[inline]
    pub fn current_node(&self) -> &NodeId {
        &self.current
    }

    #[inline]
    pub fn cross_fade(&self) -> Option<&CrossFade> {
        self.fade.as_ref()
    }

    #[inline]
    pub fn is_cross_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Weights of the current Blend node's samples, in declaration order.
    #[inline]
    pub fn blend_weights(&self) -> &[f32] {
        &self.blend_weights
    }

    /// Highest-weighted clip of the current node (the incoming side of a fade).
    pub fn dominant_clip(&self) -> Option<&ClipId> {
        match self.graph.node(&self.current)? {
            Node::Single { clip, .. } => Some(clip),
            Node::Blend { samples } => {
                dominant_index(&self.blend_weights).map(|i| &samples[i].clip)
            }
        }
    }

    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    #[inline]
    pub fn graph(&self) -> &AnimGraph {
        &self.graph
    }

    #[inline]
    pub fn bindings(&self) -> &ClipBindings<P::Handle> {
        &self.bindings
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Tear down, returning the provider. Clips are left as they are.
    pub fn into_provider(self) -> P {
        self.provider
    }
}

impl<P: ClipProvider> AnimController<P> {
    fn refresh_blend_weights(&mut self) {
        match self.graph.node(&self.current) {
            Some(Node::Blend { samples }) => {
                let p = [
                    self.vars.number_or_zero(&self.cfg.blend_x_variable),
                    self.vars.number_or_zero(&self.cfg.blend_z_variable),
                ];
                compute_blend_weights_into(samples, p, &mut self.blend_weights);
            }
            _ => self.blend_weights.clear(),
        }
    }

    /// Non-looping Single whose clip has stopped. An unresolved clip has nothing
    /// to play and counts as finished.
    fn current_completed(&self) -> bool {
        match self.graph.node(&self.current) {
            Some(Node::Single {
                clip,
                looping: false,
                ..
            }) => match self.bindings.handle(clip) {
                Some(h) => !self.provider.is_playing(h),
                None => true,
            },
            _ => false,
        }
    }

    fn mark_live(&mut self, clip: &ClipId) {
        if !self.live.contains(clip) {
            self.live.push(clip.clone());
        }
    }

    fn start_current_clips(&mut self) {
        let Some(node) = self.graph.node(&self.current) else {
            return;
        };
        let mut started: Vec<ClipId> = Vec::new();
        match node {
            Node::Single {
                clip,
                speed,
                looping,
            } => {
                // Playback settings belong to the node and are reapplied on every entry.
                // A looping clip that is already running keeps its phase.
                let restart = !*looping || !self.live.contains(clip);
                if let Some(h) = self.bindings.handle(clip) {
                    self.provider.configure(h, *speed, *looping);
                    if restart {
                        self.provider.start(h);
                    }
                }
                started.push(clip.clone());
            }
            Node::Blend { samples } => {
                for s in samples {
                    let live = self.live.contains(&s.clip);
                    if let Some(h) = self.bindings.handle(&s.clip) {
                        self.provider.configure(h, 1.0, true);
                        if !live {
                            self.provider.start(h);
                        }
                    }
                    if !live {
                        started.push(s.clip.clone());
                    }
                }
            }
        }
        for clip in &started {
            self.mark_live(clip);
        }
    }

    /// Snapshot of the current node as the outgoing side of a new fade.
    fn fade_source(&self) -> Option<FadeSource> {
        match self.graph.node(&self.current)? {
            Node::Single { clip, .. } => Some(FadeSource::Clip(clip.clone())),
            Node::Blend { samples } => Some(FadeSource::Blend {
                clips: samples
                    .iter()
                    .zip(self.blend_weights.iter())
                    .map(|(s, w)| (s.clip.clone(), *w))
                    .collect(),
            }),
        }
    }

    /// Snap the active fade to its target and silence the outgoing clips.
    fn finish_fade(&mut self) {
        if let Some(f) = self.fade.take() {
            log::debug!("cross-fade into {} finalized", f.target());
            self.pending_node_events
                .push(NodeEvent::CrossFadeFinished { to: f.target().clone() });
            self.apply_weights();
        }
    }

    fn activate(&mut self, to: NodeId, duration: f32) {
        // Only one fade at a time: finalize the running one before starting anew.
        if self.fade.is_some() {
            self.finish_fade();
        }

        let source = if duration > 0.0 { self.fade_source() } else { None };
        let from = std::mem::replace(&mut self.current, to.clone());
        log::debug!("entering node {to} from {from} (cross-fade {duration}s)");

        self.refresh_blend_weights();
        self.start_current_clips();

        if let Some(source) = source {
            self.pending_node_events.push(NodeEvent::CrossFadeStarted {
                to: to.clone(),
                duration,
            });
            self.fade = Some(CrossFade::new(source, to.clone(), duration));
        }
        self.pending_node_events.push(NodeEvent::NodeEntered {
            node: to,
            from: Some(from),
            duration,
        });

        self.apply_weights();
    }

    /// Compose target (× incoming factor) and source (× outgoing factor) weights,
    /// write them to the provider, and stop live clips that no longer carry weight.
    fn apply_weights(&mut self) {
        self.acc.clear();

        let incoming = self.fade.as_ref().map_or(1.0, |f| f.incoming_factor());
        match self.graph.node(&self.current) {
            Some(Node::Single { clip, .. }) => self.acc.add(clip, incoming),
            Some(Node::Blend { samples }) => {
                for (s, w) in samples.iter().zip(self.blend_weights.iter()) {
                    self.acc.add(&s.clip, w * incoming);
                }
            }
            None => {}
        }
        if let Some(f) = &self.fade {
            f.source().accumulate(&mut self.acc, f.outgoing_factor());
        }

        // Entries merge across the passes of one tick; `tick` clears them.
        for (clip, weight) in self.acc.iter() {
            let applied = match self.bindings.handle(clip) {
                Some(h) => {
                    self.provider.set_weight(h, weight);
                    weight
                }
                None => 0.0,
            };
            self.outputs.record_weight(clip, applied);
        }

        let acc = &self.acc;
        let (keep, drop): (Vec<ClipId>, Vec<ClipId>) =
            self.live.drain(..).partition(|c| acc.contains(c));
        self.live = keep;
        for clip in drop {
            if let Some(h) = self.bindings.handle(&clip) {
                self.provider.set_weight(h, 0.0);
                self.provider.stop(h);
            }
            self.outputs.record_weight(&clip, 0.0);
        }
    }

    fn collect_clip_events(&mut self) {
        self.provider_events.clear();
        self.provider.drain_events(&mut self.provider_events);

        let cap = self.cfg.max_events_per_tick;
        let mut dropped = 0usize;
        for ev in self.provider_events.drain(..) {
            let Some(clip) = self.bindings.clip_for(ev.handle) else {
                log::debug!("ignoring event for unbound handle {:?}", ev.handle);
                continue;
            };
            if self.outputs.clip_events.len() >= cap {
                dropped += 1;
                continue;
            }
            self.outputs.clip_events.push(ClipEvent {
                clip: clip.clone(),
                kind: ev.kind,
            });
        }
        if dropped > 0 {
            log::warn!("dropped {dropped} clip events over the per-tick cap of {cap}");
        }
    }
}
