//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`], the [`EventSink`] seam and [`VecSink`],
//! which collects events while executing a request via
//! [`crate::generator::GrassGenerator::generate_with_events`] or
//! [`crate::generator::run_generation`].
use crate::density::{DensityMode, SurfaceMetrics};
use crate::generator::GenerationResult;
use crate::host::SurfaceId;
use crate::mix::MixPlan;
use crate::placement::PlacedBlade;
use crate::style::StyleName;

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once the request passed validation.
    RunStarted {
        /// Target surface.
        surface: SurfaceId,
        /// Raw count entered by the user.
        raw_count: u32,
        /// Selected density mode.
        mode: DensityMode,
    },

    /// Emitted after the total blade count was resolved.
    DensityResolved {
        metrics: SurfaceMetrics,
        total: usize,
    },

    /// Emitted after the total was split across styles.
    MixPlanned { plan: MixPlan },

    /// Emitted before the blades of one style are generated.
    StyleStarted { style: StyleName, count: usize },

    /// Emitted for every blade bound and posed on the surface.
    BladePlaced {
        /// Index of the blade within its style group.
        index: usize,
        placement: PlacedBlade,
    },

    /// Emitted after all blades of one style were placed.
    StyleFinished { style: StyleName, placed: usize },

    /// Emitted when the whole request finished.
    RunFinished { result: GenerationResult },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. style name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every placed blade reported so far, in placement order.
    pub fn placements(&self) -> Vec<PlacedBlade> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::BladePlaced { placement, .. } => Some(placement.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(context, message)` of every warning reported so far.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.events.iter().filter_map(|e| match e {
            GenerationEvent::Warning { context, message } => {
                Some((context.as_str(), message.as_str()))
            }
            _ => None,
        })
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generator::{GenerationRequest, GrassGenerator};
    use crate::host::recording::RecordingHost;

    fn warning(context: &str) -> GenerationEvent {
        GenerationEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send_many([warning("a"), warning("b")]);
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_extracts_placements_in_order() {
        let mut host = RecordingHost::new().with_surface("ground", 2.0, 2.0, 4);
        let request = GenerationRequest::new(4)
            .with_density_mode(DensityMode::Absolute)
            .with_style(StyleName::Short, 50)
            .with_style(StyleName::Long, 50);
        let mut sink = VecSink::new();
        let result = GrassGenerator::new()
            .generate_with_events(
                &mut host,
                &SurfaceId::new("ground"),
                &request,
                &mut StdRng::seed_from_u64(4),
                &mut sink,
            )
            .unwrap();

        assert_eq!(sink.placements(), result.placements);
        assert_eq!(sink.warnings().count(), 0);
        assert!(matches!(
            sink.as_slice().last(),
            Some(GenerationEvent::RunFinished { .. })
        ));
    }

    #[test]
    fn vec_sink_filters_warnings() {
        let mut sink = VecSink::new();
        sink.send(warning("style:Long"));
        sink.send(GenerationEvent::StyleStarted {
            style: StyleName::Long,
            count: 0,
        });
        let contexts: Vec<_> = sink.warnings().map(|(c, _)| c).collect();
        assert_eq!(contexts, vec!["style:Long"]);
    }
}
