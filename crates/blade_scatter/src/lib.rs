#![forbid(unsafe_code)]
//! blade_scatter: Procedural grass blade generation and surface-attached scattering.
//!
//! Modules:
//! - style: the fixed catalog of blade styles and their parameter ranges
//! - blade: per-blade parameter sampling and the mesh-building procedure
//! - density / mix: resolve a user count into a total and split it across styles
//! - placement: live surface bindings and blade pose composition
//! - host: capability traits the core drives, plus an in-memory recording host
//! - generator: the end-to-end pipeline; deletion: the post-generation cleanup tool
pub mod blade;
pub mod deletion;
pub mod density;
pub mod error;
pub mod events;
pub mod generator;
pub mod host;
pub mod mix;
pub mod placement;
pub mod sampling;
pub mod shading;
pub mod style;

/// Convenient re-exports for common types. Import with `use blade_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::blade::{BladeConstruction, BladeGenerator, BladeInstance};
    pub use crate::deletion::{collect_attachments, delete_attachments, DeleteMode, DeletionReport};
    pub use crate::density::{resolve, DensityMode, DensityRequest, SurfaceMetrics, MAX_RAW_COUNT};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, GenerationEvent, VecSink};
    pub use crate::generator::{run_generation, GenerationRequest, GenerationResult, GrassGenerator};
    pub use crate::host::recording::{HostCall, RecordingHost};
    pub use crate::host::{
        AttachmentSystem, GeometryKernel, Host, HostError, HostResult, MaterialHandle, NodeId,
        NodeType, SceneGraph, ShadingSystem, SurfaceId, SurfaceQuery,
    };
    pub use crate::mix::{balance_percentages, plan, MixPlan, StyleWeights};
    pub use crate::placement::{AttachmentBinding, BladePose, PlacedBlade, PlacementEngine};
    pub use crate::shading::GrassMaterial;
    pub use crate::style::{ParamRange, PivotHeight, Style, StyleCatalog, StyleName};
}
