//! Capability traits through which the core drives the host scene.
//!
//! The generation core never owns geometry. It calls these traits to build
//! blade meshes ([`GeometryKernel`]), inspect the target surface ([`SurfaceQuery`]),
//! bind blades to it ([`AttachmentSystem`]), restructure the hierarchy ([`SceneGraph`])
//! and shade the result ([`ShadingSystem`]). Vector and matrix values cross the
//! boundary as `mint` types so hosts are free to use their own math library.
//!
//! [`recording::RecordingHost`] implements every trait in memory and logs the calls.
use std::fmt;

use mint::{ColumnMatrix4, Vector2};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod recording;

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure reported by a host capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("host operation '{operation}' failed: {message}")]
pub struct HostError {
    pub operation: String,
    pub message: String,
}

impl HostError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Identifier of the target surface inside the host scene.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a node in the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Opaque handle to a host material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Node type tags the core queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Transform,
    Mesh,
    Deformer,
    Attachment,
}

/// Parameters of the tapered cone primitive a blade is built from.
///
/// The blade is built lying flat along local +Z, root to tip, centred on its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperedBladeParams {
    /// Base radius before the half-width scale is applied.
    pub radius: f32,
    pub height: f32,
    /// Scale applied to the blade's local X to flatten the cone.
    pub half_width_scale: f32,
    pub subdivisions_around: u32,
    pub subdivisions_height: u32,
}

/// Parameters of the bend deformer applied to a blade mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendParams {
    pub curvature: f32,
    pub low_bound: f32,
    pub high_bound: f32,
    /// Height of the deformer handle above the blade root.
    pub pivot_height: f32,
}

/// Mesh construction, deformation and history collapse.
pub trait GeometryKernel {
    fn create_tapered_blade(&mut self, params: &TaperedBladeParams) -> HostResult<NodeId>;
    fn recompute_normals(&mut self, mesh: NodeId, angle_threshold_degrees: f32)
        -> HostResult<()>;
    fn apply_bend_deformer(&mut self, mesh: NodeId, params: &BendParams) -> HostResult<()>;
    /// Bake every construction operation into the mesh and freeze its transform.
    fn freeze_construction_history(&mut self, mesh: NodeId) -> HostResult<()>;
}

/// Read-only queries against the target surface.
pub trait SurfaceQuery {
    fn exists(&self, surface: &SurfaceId) -> bool;
    /// World-space `(width, depth)` of the axis-aligned bounding box.
    fn bounding_extents(&self, surface: &SurfaceId) -> HostResult<Vector2<f32>>;
    fn face_count(&self, surface: &SurfaceId) -> HostResult<usize>;
}

/// Live surface attachments.
pub trait AttachmentSystem {
    /// Create an attachment node at parametric `(u, v)` whose translate/rotate
    /// outputs follow the surface's mesh and world transform.
    fn create_attachment(&mut self, surface: &SurfaceId, uv: Vector2<f32>) -> HostResult<NodeId>;
}

/// Hierarchy and transform edits.
pub trait SceneGraph {
    fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> HostResult<()>;
    fn list_by_type(&self, node_type: NodeType) -> Vec<NodeId>;
    fn delete(&mut self, node: NodeId) -> HostResult<()>;
    /// Move every non-attachment child of `node` to the world root, returning them.
    fn unparent_children_to_world(&mut self, node: NodeId) -> HostResult<Vec<NodeId>>;
    /// Snap `node`'s world position and orientation to `target`'s.
    fn match_transform(&mut self, node: NodeId, target: NodeId) -> HostResult<()>;
    /// Post-multiply `node`'s transform by a relative local transform.
    fn apply_local_transform(&mut self, node: NodeId, local: ColumnMatrix4<f32>)
        -> HostResult<()>;
    fn node_type(&self, node: NodeId) -> Option<NodeType>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn selection(&self) -> Vec<NodeId>;
}

/// Material creation and assignment.
pub trait ShadingSystem {
    /// Create the standard grass material described by
    /// [`crate::shading::GrassMaterial::STANDARD`].
    fn create_standard_grass_material(&mut self) -> HostResult<MaterialHandle>;
    fn assign(&mut self, node: NodeId, material: MaterialHandle) -> HostResult<()>;
}

/// Every capability the generation pipeline needs.
pub trait Host: GeometryKernel + SurfaceQuery + AttachmentSystem + SceneGraph + ShadingSystem {}

impl<T> Host for T where
    T: GeometryKernel + SurfaceQuery + AttachmentSystem + SceneGraph + ShadingSystem
{
}
