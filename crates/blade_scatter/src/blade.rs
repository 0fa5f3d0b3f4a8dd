//! Blade instance sampling and the procedure that turns an instance into host geometry.
//!
//! [`BladeGenerator::generate`] draws every ranged attribute of a [`Style`] independently
//! and uniformly; instances within a style are i.i.d. [`BladeConstruction::build`] then
//! realizes an instance through the [`GeometryKernel`]: a flattened tapered cone with
//! softened normals, bent at the pivot height, with all construction history collapsed
//! so each blade ends up an independent, deformer-free mesh.
use rand::Rng;
use tracing::trace;

use crate::error::Result;
use crate::host::{BendParams, GeometryKernel, NodeId, TaperedBladeParams};
use crate::sampling::{random_degrees, uniform};
use crate::style::{PivotHeight, Style, StyleName};

/// Sampled shape parameters of one blade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeInstance {
    pub style: StyleName,
    pub height: f32,
    pub bend_curvature: f32,
    pub bend_pivot_height: f32,
    pub taper_width: f32,
    /// Spin about the surface normal in [0, 360).
    pub random_rotation_degrees: f32,
}

/// Samples [`BladeInstance`]s from style ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BladeGenerator;

impl BladeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, style: &Style, rng: &mut dyn Rng) -> BladeInstance {
        let height = uniform(rng, style.height.min, style.height.max);
        let bend_curvature = uniform(rng, style.bend_curvature.min, style.bend_curvature.max);
        let bend_pivot_height = match style.bend_pivot_height {
            PivotHeight::Fixed(v) => v,
            PivotHeight::Range(r) => uniform(rng, r.min, r.max),
        };
        let taper_width = uniform(rng, style.taper_width.min, style.taper_width.max);
        let random_rotation_degrees = random_degrees(rng);

        BladeInstance {
            style: style.name,
            height,
            bend_curvature,
            bend_pivot_height,
            taper_width,
            random_rotation_degrees,
        }
    }

    /// Generate `count` instances of one style.
    pub fn generate_many(
        &self,
        style: &Style,
        count: usize,
        rng: &mut dyn Rng,
    ) -> Vec<BladeInstance> {
        (0..count).map(|_| self.generate(style, rng)).collect()
    }
}

/// Constants of the mesh-building procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeConstruction {
    /// Local X scale flattening the cone into a blade.
    pub half_width_scale: f32,
    /// Edges sharper than this stay hard when normals are recomputed.
    pub normal_angle_threshold: f32,
    pub bend_low_bound: f32,
    /// Upper end of the bend region, in unit heights.
    pub bend_high_bound: f32,
    pub subdivisions_around: u32,
    pub subdivisions_height: u32,
}

impl BladeConstruction {
    pub const DEFAULT: BladeConstruction = BladeConstruction {
        half_width_scale: 0.35,
        normal_angle_threshold: 120.0,
        bend_low_bound: 0.0,
        bend_high_bound: 2.0,
        subdivisions_around: 3,
        subdivisions_height: 8,
    };

    pub fn mesh_params(&self, instance: &BladeInstance) -> TaperedBladeParams {
        TaperedBladeParams {
            radius: instance.taper_width,
            height: instance.height,
            half_width_scale: self.half_width_scale,
            subdivisions_around: self.subdivisions_around,
            subdivisions_height: self.subdivisions_height,
        }
    }

    pub fn bend_params(&self, instance: &BladeInstance) -> BendParams {
        BendParams {
            curvature: -instance.bend_curvature,
            low_bound: self.bend_low_bound,
            high_bound: self.bend_high_bound,
            pivot_height: instance.bend_pivot_height,
        }
    }

    /// Build the blade mesh for `instance`, returning the frozen mesh node.
    pub fn build<K: GeometryKernel + ?Sized>(
        &self,
        kernel: &mut K,
        instance: &BladeInstance,
    ) -> Result<NodeId> {
        let mesh = kernel.create_tapered_blade(&self.mesh_params(instance))?;
        kernel.recompute_normals(mesh, self.normal_angle_threshold)?;
        kernel.apply_bend_deformer(mesh, &self.bend_params(instance))?;
        kernel.freeze_construction_history(mesh)?;
        trace!(
            "Built {} blade {}: height {:.3}, bend {:.2}.",
            instance.style,
            mesh,
            instance.height,
            instance.bend_curvature
        );
        Ok(mesh)
    }
}

impl Default for BladeConstruction {
    fn default() -> Self {
        Self::DEFAULT
    }
}
