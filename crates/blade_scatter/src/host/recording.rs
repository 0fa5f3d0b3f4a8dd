//! In-memory host that records every capability call.
//!
//! [`RecordingHost`] keeps a flat node table with parent links, a set of named
//! rectangular surfaces and a log of [`HostCall`]s. Attachments sit on the XZ plane of
//! their surface, centered on the origin, so `(u, v) = (0.5, 0.5)` is the surface center.
use std::collections::{BTreeMap, HashMap};

use glam::{Mat4, Vec3};
use mint::{ColumnMatrix4, Vector2};

use crate::host::{
    AttachmentSystem, BendParams, GeometryKernel, HostError, HostResult, MaterialHandle, NodeId,
    NodeType, SceneGraph, ShadingSystem, SurfaceId, SurfaceQuery, TaperedBladeParams,
};

/// One call made against the recording host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateTaperedBlade {
        mesh: NodeId,
        params: TaperedBladeParams,
    },
    RecomputeNormals {
        mesh: NodeId,
        angle_threshold_degrees: f32,
    },
    ApplyBendDeformer {
        mesh: NodeId,
        params: BendParams,
    },
    FreezeConstructionHistory {
        mesh: NodeId,
    },
    CreateAttachment {
        node: NodeId,
        surface: SurfaceId,
        u: f32,
        v: f32,
    },
    Reparent {
        node: NodeId,
        new_parent: NodeId,
    },
    Delete {
        node: NodeId,
    },
    UnparentChildrenToWorld {
        node: NodeId,
        released: Vec<NodeId>,
    },
    MatchTransform {
        node: NodeId,
        target: NodeId,
    },
    ApplyLocalTransform {
        node: NodeId,
        local: Mat4,
    },
    CreateMaterial {
        material: MaterialHandle,
    },
    Assign {
        node: NodeId,
        material: MaterialHandle,
    },
}

/// Node stored by the recording host.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub node_type: NodeType,
    pub parent: Option<NodeId>,
    /// World transform of the node.
    pub world: Mat4,
    /// Set for attachment nodes.
    pub attachment: Option<AttachmentRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRecord {
    pub surface: SurfaceId,
    pub u: f32,
    pub v: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SurfaceRecord {
    width: f32,
    depth: f32,
    face_count: usize,
}

/// In-memory implementation of every host capability.
#[derive(Debug, Default)]
pub struct RecordingHost {
    nodes: BTreeMap<NodeId, NodeRecord>,
    surfaces: HashMap<SurfaceId, SurfaceRecord>,
    selection: Vec<NodeId>,
    calls: Vec<HostCall>,
    next_id: u64,
    next_material: u64,
    attachment_budget: Option<usize>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rectangular surface with the given world extents and face count.
    pub fn with_surface(
        mut self,
        surface: impl Into<String>,
        width: f32,
        depth: f32,
        face_count: usize,
    ) -> Self {
        self.add_surface(surface, width, depth, face_count);
        self
    }

    pub fn add_surface(
        &mut self,
        surface: impl Into<String>,
        width: f32,
        depth: f32,
        face_count: usize,
    ) {
        self.surfaces.insert(
            SurfaceId::new(surface),
            SurfaceRecord {
                width,
                depth,
                face_count,
            },
        );
    }

    /// Let `count` more attachments succeed, then fail every further creation.
    pub fn fail_attachments_after(&mut self, count: usize) {
        self.attachment_budget = Some(count);
    }

    /// Insert a plain node, e.g. a group the user created by hand.
    pub fn add_node(&mut self, node_type: NodeType, parent: Option<NodeId>) -> NodeId {
        self.insert(node_type, parent, Mat4::IDENTITY, None)
    }

    pub fn select(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        self.selection = nodes.into_iter().collect();
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&node)
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn count_of_type(&self, node_type: NodeType) -> usize {
        self.nodes
            .values()
            .filter(|n| n.node_type == node_type)
            .count()
    }

    fn insert(
        &mut self,
        node_type: NodeType,
        parent: Option<NodeId>,
        world: Mat4,
        attachment: Option<AttachmentRecord>,
    ) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            NodeRecord {
                node_type,
                parent,
                world,
                attachment,
            },
        );
        id
    }

    fn record_mut(&mut self, operation: &str, node: NodeId) -> HostResult<&mut NodeRecord> {
        self.nodes
            .get_mut(&node)
            .ok_or_else(|| HostError::new(operation, format!("{node} does not exist")))
    }

    fn surface(&self, operation: &str, surface: &SurfaceId) -> HostResult<SurfaceRecord> {
        self.surfaces
            .get(surface)
            .copied()
            .ok_or_else(|| HostError::new(operation, format!("surface '{surface}' does not exist")))
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            for child in self.children(current) {
                out.push(child);
                stack.push(child);
            }
        }
        out
    }
}

impl GeometryKernel for RecordingHost {
    fn create_tapered_blade(&mut self, params: &TaperedBladeParams) -> HostResult<NodeId> {
        if params.height <= 0.0 || params.radius <= 0.0 {
            return Err(HostError::new(
                "create_tapered_blade",
                "radius and height must be > 0",
            ));
        }
        let mesh = self.insert(NodeType::Mesh, None, Mat4::IDENTITY, None);
        self.calls.push(HostCall::CreateTaperedBlade {
            mesh,
            params: *params,
        });
        Ok(mesh)
    }

    fn recompute_normals(
        &mut self,
        mesh: NodeId,
        angle_threshold_degrees: f32,
    ) -> HostResult<()> {
        self.record_mut("recompute_normals", mesh)?;
        self.calls.push(HostCall::RecomputeNormals {
            mesh,
            angle_threshold_degrees,
        });
        Ok(())
    }

    fn apply_bend_deformer(&mut self, mesh: NodeId, params: &BendParams) -> HostResult<()> {
        self.record_mut("apply_bend_deformer", mesh)?;
        self.calls.push(HostCall::ApplyBendDeformer {
            mesh,
            params: *params,
        });
        Ok(())
    }

    fn freeze_construction_history(&mut self, mesh: NodeId) -> HostResult<()> {
        self.record_mut("freeze_construction_history", mesh)?.world = Mat4::IDENTITY;
        self.calls.push(HostCall::FreezeConstructionHistory { mesh });
        Ok(())
    }
}

impl SurfaceQuery for RecordingHost {
    fn exists(&self, surface: &SurfaceId) -> bool {
        self.surfaces.contains_key(surface)
    }

    fn bounding_extents(&self, surface: &SurfaceId) -> HostResult<Vector2<f32>> {
        let s = self.surface("bounding_extents", surface)?;
        Ok(Vector2 {
            x: s.width,
            y: s.depth,
        })
    }

    fn face_count(&self, surface: &SurfaceId) -> HostResult<usize> {
        Ok(self.surface("face_count", surface)?.face_count)
    }
}

impl AttachmentSystem for RecordingHost {
    fn create_attachment(&mut self, surface: &SurfaceId, uv: Vector2<f32>) -> HostResult<NodeId> {
        let s = self.surface("create_attachment", surface)?;
        if let Some(budget) = self.attachment_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError::new(
                    "create_attachment",
                    "attachment limit reached",
                ));
            }
            *budget -= 1;
        }

        let position = Vec3::new((uv.x - 0.5) * s.width, 0.0, (uv.y - 0.5) * s.depth);
        let node = self.insert(
            NodeType::Attachment,
            None,
            Mat4::from_translation(position),
            Some(AttachmentRecord {
                surface: surface.clone(),
                u: uv.x,
                v: uv.y,
            }),
        );
        self.calls.push(HostCall::CreateAttachment {
            node,
            surface: surface.clone(),
            u: uv.x,
            v: uv.y,
        });
        Ok(node)
    }
}

impl SceneGraph for RecordingHost {
    fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> HostResult<()> {
        if !self.nodes.contains_key(&new_parent) {
            return Err(HostError::new(
                "reparent",
                format!("{new_parent} does not exist"),
            ));
        }
        if node == new_parent || self.descendants(node).contains(&new_parent) {
            return Err(HostError::new("reparent", "cycle in hierarchy"));
        }
        self.record_mut("reparent", node)?.parent = Some(new_parent);
        self.calls.push(HostCall::Reparent { node, new_parent });
        Ok(())
    }

    fn list_by_type(&self, node_type: NodeType) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.node_type == node_type)
            .map(|(id, _)| *id)
            .collect()
    }

    fn delete(&mut self, node: NodeId) -> HostResult<()> {
        self.record_mut("delete", node)?;
        for child in self.descendants(node) {
            self.nodes.remove(&child);
        }
        self.nodes.remove(&node);
        self.selection.retain(|n| self.nodes.contains_key(n));
        self.calls.push(HostCall::Delete { node });
        Ok(())
    }

    fn unparent_children_to_world(&mut self, node: NodeId) -> HostResult<Vec<NodeId>> {
        self.record_mut("unparent_children_to_world", node)?;
        let released: Vec<NodeId> = self
            .children(node)
            .into_iter()
            .filter(|c| self.node_type(*c) != Some(NodeType::Attachment))
            .collect();
        for child in &released {
            self.record_mut("unparent_children_to_world", *child)?.parent = None;
        }
        self.calls.push(HostCall::UnparentChildrenToWorld {
            node,
            released: released.clone(),
        });
        Ok(released)
    }

    fn match_transform(&mut self, node: NodeId, target: NodeId) -> HostResult<()> {
        let world = self
            .nodes
            .get(&target)
            .map(|t| t.world)
            .ok_or_else(|| HostError::new("match_transform", format!("{target} does not exist")))?;
        self.record_mut("match_transform", node)?.world = world;
        self.calls.push(HostCall::MatchTransform { node, target });
        Ok(())
    }

    fn apply_local_transform(
        &mut self,
        node: NodeId,
        local: ColumnMatrix4<f32>,
    ) -> HostResult<()> {
        let local = Mat4::from(local);
        let record = self.record_mut("apply_local_transform", node)?;
        record.world *= local;
        self.calls.push(HostCall::ApplyLocalTransform { node, local });
        Ok(())
    }

    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.nodes.get(&node).map(|n| n.node_type)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(node))
            .map(|(id, _)| *id)
            .collect()
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }
}

impl ShadingSystem for RecordingHost {
    fn create_standard_grass_material(&mut self) -> HostResult<MaterialHandle> {
        self.next_material += 1;
        let material = MaterialHandle(self.next_material);
        self.calls.push(HostCall::CreateMaterial { material });
        Ok(material)
    }

    fn assign(&mut self, node: NodeId, material: MaterialHandle) -> HostResult<()> {
        self.record_mut("assign", node)?;
        if material.0 == 0 || material.0 > self.next_material {
            return Err(HostError::new("assign", "unknown material"));
        }
        self.calls.push(HostCall::Assign { node, material });
        Ok(())
    }
}
