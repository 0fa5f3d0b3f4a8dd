//! Binding blades to the surface and composing their pose relative to the binding.
//!
//! Each blade gets its own live attachment at a uniformly sampled `(u, v)`. The blade
//! is snapped onto the attachment, then posed relative to it in a fixed order:
//!
//! 1. tilt -90° about the binding's X axis, turning the blade from its construction
//!    axis (local +Z, lying flat) onto the binding's Y axis, the surface normal,
//! 2. spin about the binding's Y axis by the instance's random rotation,
//! 3. lift by half the blade height along the blade's own axis, so its base rather
//!    than its centre sits on the attachment point.
//!
//! Finally the blade is parented under the attachment so surface deformation
//! propagates to it.
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use tracing::debug;

use crate::blade::BladeInstance;
use crate::error::{Error, Result};
use crate::host::{AttachmentSystem, NodeId, SceneGraph, SurfaceId};
use crate::sampling::rand01;

/// Tilt applied about the binding's X axis to stand a blade upright.
pub const UPRIGHT_TILT_DEGREES: f32 = -90.0;

/// Local axis a freshly built blade lies along, root to tip.
pub const BLADE_AXIS: Vec3 = Vec3::Z;

/// Live relation between one blade and one surface point.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentBinding {
    /// Attachment node created by the host.
    pub node: NodeId,
    pub surface: SurfaceId,
    pub u: f32,
    pub v: f32,
}

impl AttachmentBinding {
    pub fn uv(&self) -> Vec2 {
        Vec2::new(self.u, self.v)
    }
}

/// Relative pose of a blade within its binding's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladePose {
    pub tilt_x_degrees: f32,
    pub spin_y_degrees: f32,
    pub lift: f32,
}

impl BladePose {
    pub fn for_instance(instance: &BladeInstance) -> Self {
        Self {
            tilt_x_degrees: UPRIGHT_TILT_DEGREES,
            spin_y_degrees: instance.random_rotation_degrees,
            lift: instance.height * 0.5,
        }
    }

    /// Tilt first, then spin about the binding's Y axis.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin_y_degrees.to_radians())
            * Quat::from_rotation_x(self.tilt_x_degrees.to_radians())
    }

    /// Rotation followed by the lift along the blade's construction axis.
    ///
    /// Equivalent to lifting along the binding's Y after rotating.
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_quat(self.rotation()) * Mat4::from_translation(BLADE_AXIS * self.lift)
    }
}

/// A blade mesh bound and posed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlade {
    pub mesh: NodeId,
    pub instance: BladeInstance,
    pub binding: AttachmentBinding,
    pub pose: BladePose,
}

/// Creates bindings and finalizes blade transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine;

impl PlacementEngine {
    pub fn new() -> Self {
        Self
    }

    /// Independent uniform draws for `u` and `v` in [0, 1].
    pub fn sample_uv(&self, rng: &mut dyn Rng) -> Vec2 {
        let u = rand01(rng);
        let v = rand01(rng);
        Vec2::new(u, v)
    }

    /// Create a live attachment at a random point of `surface`.
    pub fn bind<A: AttachmentSystem + ?Sized>(
        &self,
        attachments: &mut A,
        surface: &SurfaceId,
        rng: &mut dyn Rng,
    ) -> Result<AttachmentBinding> {
        let uv = self.sample_uv(rng);
        let node = attachments
            .create_attachment(surface, uv.into())
            .map_err(|e| Error::AttachmentCreationFailed {
                surface: surface.clone(),
                reason: e.to_string(),
            })?;
        Ok(AttachmentBinding {
            node,
            surface: surface.clone(),
            u: uv.x,
            v: uv.y,
        })
    }

    /// Bind `mesh` to `surface` and pose it for `instance`.
    ///
    /// Nothing is rolled back on failure: an attachment created before a later
    /// step fails stays in the scene.
    pub fn place<H: AttachmentSystem + SceneGraph + ?Sized>(
        &self,
        host: &mut H,
        mesh: NodeId,
        instance: &BladeInstance,
        surface: &SurfaceId,
        rng: &mut dyn Rng,
    ) -> Result<PlacedBlade> {
        let binding = self.bind(host, surface, rng)?;
        let pose = BladePose::for_instance(instance);

        host.match_transform(mesh, binding.node)?;
        host.apply_local_transform(mesh, pose.local_transform().into())?;
        host.reparent(mesh, binding.node)?;

        debug!(
            "Placed {} blade {} at uv ({:.3}, {:.3}) under {}.",
            instance.style, mesh, binding.u, binding.v, binding.node
        );

        Ok(PlacedBlade {
            mesh,
            instance: *instance,
            binding,
            pose,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::host::recording::{HostCall, RecordingHost};
    use crate::host::{GeometryKernel, NodeType, TaperedBladeParams};
    use crate::sampling::tests::FixedRng;
    use crate::style::StyleName;

    fn instance(height: f32, rotation: f32) -> BladeInstance {
        BladeInstance {
            style: StyleName::Medium,
            height,
            bend_curvature: 30.0,
            bend_pivot_height: 0.2,
            taper_width: 0.03,
            random_rotation_degrees: rotation,
        }
    }

    fn mesh(host: &mut RecordingHost) -> NodeId {
        host.create_tapered_blade(&TaperedBladeParams {
            radius: 0.03,
            height: 1.0,
            half_width_scale: 0.35,
            subdivisions_around: 3,
            subdivisions_height: 8,
        })
        .unwrap()
    }

    #[test]
    fn uv_samples_stay_in_unit_square() {
        let engine = PlacementEngine::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let uv = engine.sample_uv(&mut rng);
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
        let mut max = FixedRng { value: u32::MAX };
        let uv = engine.sample_uv(&mut max);
        assert!(uv.x <= 1.0 && uv.y <= 1.0);
    }

    #[test]
    fn pose_stands_blade_on_binding_normal_for_every_spin() {
        for spin in [0.0, 45.0, 90.0, 180.0, 271.5, 359.9] {
            let pose = BladePose::for_instance(&instance(1.2, spin));
            assert_eq!(pose.tilt_x_degrees, -90.0);
            assert!((pose.lift - 0.6).abs() < 1e-6);

            let local = pose.local_transform();
            let tip_dir = local.transform_vector3(BLADE_AXIS);
            assert!(tip_dir.abs_diff_eq(Vec3::Y, 1e-5), "spin {spin}: {tip_dir}");

            let centre = local.transform_point3(Vec3::ZERO);
            assert!(centre.abs_diff_eq(Vec3::new(0.0, 0.6, 0.0), 1e-5));
            let base = local.transform_point3(-BLADE_AXIS * pose.lift);
            assert!(base.abs_diff_eq(Vec3::ZERO, 1e-5), "spin {spin}: {base}");
        }
    }

    #[test]
    fn spin_turns_blade_face_about_binding_y() {
        let pose = BladePose::for_instance(&instance(1.0, 90.0));
        // Width axis stays X through the tilt, then 90° about Y sends it to -Z.
        let width_dir = pose.rotation() * Vec3::X;
        assert!(width_dir.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!((pose.rotation() * BLADE_AXIS).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn place_snaps_poses_and_parents_in_order() {
        let mut host = RecordingHost::new().with_surface("ground", 2.0, 2.0, 4);
        let blade_mesh = mesh(&mut host);
        host.clear_calls();

        let mut rng = StdRng::seed_from_u64(5);
        let placed = PlacementEngine::new()
            .place(
                &mut host,
                blade_mesh,
                &instance(1.1, 45.0),
                &SurfaceId::new("ground"),
                &mut rng,
            )
            .unwrap();

        let calls = host.calls();
        assert_eq!(calls.len(), 4);
        let binding = placed.binding.node;
        assert!(matches!(
            calls[0],
            HostCall::CreateAttachment { node, .. } if node == binding
        ));
        assert!(matches!(
            calls[1],
            HostCall::MatchTransform { node, target } if node == blade_mesh && target == binding
        ));
        let tilts = calls
            .iter()
            .filter(|c| matches!(c, HostCall::ApplyLocalTransform { .. }))
            .count();
        assert_eq!(tilts, 1);
        assert!(matches!(
            calls[3],
            HostCall::Reparent { node, new_parent } if node == blade_mesh && new_parent == binding
        ));

        assert_eq!(host.parent_of(blade_mesh), Some(placed.binding.node));
        assert_eq!(host.node_type(placed.binding.node), Some(NodeType::Attachment));
        assert_eq!(placed.pose.spin_y_degrees, 45.0);
    }

    #[test]
    fn attachment_failure_maps_to_dedicated_error() {
        let mut host = RecordingHost::new().with_surface("ground", 1.0, 1.0, 1);
        host.fail_attachments_after(0);
        let blade_mesh = mesh(&mut host);
        let err = PlacementEngine::new()
            .place(
                &mut host,
                blade_mesh,
                &instance(1.0, 0.0),
                &SurfaceId::new("ground"),
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap_err();
        assert!(matches!(err, Error::AttachmentCreationFailed { .. }));
        assert_eq!(host.parent_of(blade_mesh), None);
    }
}
