//! High-level generator tying density, mix planning, blade construction and placement together.
//!
//! A request is validated eagerly: an out-of-range count, a missing density mode or a
//! missing surface abort before the host is mutated, and a zero count is a no-op.
//! Once blades are being built, failures halt the loop and everything created by
//! earlier iterations stays in the scene.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::blade::{BladeConstruction, BladeGenerator};
use crate::density::{self, DensityMode, DensityRequest, SurfaceMetrics};
use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent};
use crate::host::{Host, MaterialHandle, SurfaceId};
use crate::mix::{self, MixPlan, StyleWeights};
use crate::placement::{PlacedBlade, PlacementEngine};
use crate::style::{StyleCatalog, StyleName};

/// What the user asked for: a raw count, how to interpret it and the style mix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub raw_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub density_mode: Option<DensityMode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub styles: StyleWeights,
}

impl GenerationRequest {
    pub fn new(raw_count: u32) -> Self {
        Self {
            raw_count,
            density_mode: None,
            styles: StyleWeights::new(),
        }
    }

    pub fn with_density_mode(mut self, mode: DensityMode) -> Self {
        self.density_mode = Some(mode);
        self
    }

    /// Select `style` with the given percentage.
    pub fn with_style(mut self, style: StyleName, percentage: u32) -> Self {
        self.styles.set(style, percentage);
        self
    }

    pub fn with_styles(mut self, styles: StyleWeights) -> Self {
        self.styles = styles;
        self
    }

    pub fn density(&self) -> DensityRequest {
        DensityRequest::new(self.raw_count, self.density_mode)
    }

    pub fn validate(&self) -> Result<()> {
        self.density().validate()
    }
}

/// Outcome of one generation request.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Total resolved from the raw count and density mode.
    pub total: usize,
    /// Per-style split of the total.
    pub plan: MixPlan,
    /// Every blade placed, in generation order.
    pub placements: Vec<PlacedBlade>,
    /// Material assigned to the blades, if any were generated.
    pub material: Option<MaterialHandle>,
}

impl GenerationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, style: StyleName) -> usize {
        self.placements
            .iter()
            .filter(|p| p.instance.style == style)
            .count()
    }
}

/// Generation pipeline with its collaborators.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GrassGenerator {
    pub catalog: StyleCatalog,
    pub blades: BladeGenerator,
    pub construction: BladeConstruction,
    pub placement: PlacementEngine,
}

impl GrassGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the mesh-building constants.
    pub fn with_construction(mut self, construction: BladeConstruction) -> Self {
        self.construction = construction;
        self
    }

    /// Run `request` against `surface`.
    pub fn generate<H: Host + ?Sized>(
        &self,
        host: &mut H,
        surface: &SurfaceId,
        request: &GenerationRequest,
        rng: &mut impl Rng,
    ) -> Result<GenerationResult> {
        self.generate_internal(host, surface, request, rng, &mut ())
    }

    pub fn generate_with_events<H: Host + ?Sized>(
        &self,
        host: &mut H,
        surface: &SurfaceId,
        request: &GenerationRequest,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        self.generate_internal(host, surface, request, rng, sink)
    }

    /// Run `request` with the process-wide random source; results are not reproducible.
    pub fn generate_unseeded<H: Host + ?Sized>(
        &self,
        host: &mut H,
        surface: &SurfaceId,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        let mut rng = rand::rng();
        self.generate_internal(host, surface, request, &mut rng, &mut ())
    }

    fn generate_internal<H: Host + ?Sized, R: Rng>(
        &self,
        host: &mut H,
        surface: &SurfaceId,
        request: &GenerationRequest,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        request.validate()?;
        if request.raw_count == 0 {
            warn!("Blade count is zero; nothing to generate.");
            return Ok(GenerationResult::new());
        }
        let mode = request.density_mode.ok_or(Error::NoDensityModeSelected)?;
        let metrics = SurfaceMetrics::capture(&*host, surface)?;

        sink.send(GenerationEvent::RunStarted {
            surface: surface.clone(),
            raw_count: request.raw_count,
            mode,
        });

        let total = density::resolve(request.raw_count, Some(mode), &metrics)?;
        sink.send(GenerationEvent::DensityResolved { metrics, total });

        if request.styles.is_empty() {
            warn!("No blade styles selected; nothing to generate.");
            sink.send(GenerationEvent::Warning {
                context: "styles".into(),
                message: "No blade styles selected".into(),
            });
        }
        let plan = mix::plan(total, &request.styles);
        sink.send(GenerationEvent::MixPlanned { plan: plan.clone() });

        info!(
            "Generating {} blades on '{}' ({:?}, raw count {}).",
            plan.total(),
            surface,
            mode,
            request.raw_count
        );

        let mut result = GenerationResult {
            total,
            plan: plan.clone(),
            placements: Vec::with_capacity(plan.total()),
            material: None,
        };
        if plan.total() == 0 {
            sink.send(GenerationEvent::RunFinished {
                result: result.clone(),
            });
            return Ok(result);
        }

        let material = host.create_standard_grass_material()?;
        result.material = Some(material);

        for (name, count) in plan.iter() {
            if count == 0 {
                warn!("Style '{}' resolved to zero blades; skipping.", name);
                sink.send(GenerationEvent::Warning {
                    context: format!("style:{name}"),
                    message: "Style resolved to zero blades; skipping".into(),
                });
                continue;
            }

            let style = self.catalog.get(name);
            sink.send(GenerationEvent::StyleStarted { style: name, count });
            info!("Style '{}': {} blades.", name, count);

            for index in 0..count {
                let instance = self.blades.generate(style, rng);
                let mesh = self.construction.build(host, &instance)?;
                host.assign(mesh, material)?;
                let placed = self
                    .placement
                    .place(host, mesh, &instance, surface, rng)?;
                sink.send(GenerationEvent::BladePlaced {
                    index,
                    placement: placed.clone(),
                });
                result.placements.push(placed);
            }

            sink.send(GenerationEvent::StyleFinished {
                style: name,
                placed: count,
            });
        }

        info!(
            "Generated {} blades on '{}'.",
            result.placements.len(),
            surface
        );
        sink.send(GenerationEvent::RunFinished {
            result: result.clone(),
        });

        Ok(result)
    }
}

/// Run `request` with a default [`GrassGenerator`], optionally reporting events.
pub fn run_generation<H: Host + ?Sized, R: Rng>(
    host: &mut H,
    surface: &SurfaceId,
    request: &GenerationRequest,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<GenerationResult> {
    let generator = GrassGenerator::new();
    if let Some(s) = sink {
        generator.generate_with_events(host, surface, request, rng, s)
    } else {
        generator.generate(host, surface, request, rng)
    }
}
