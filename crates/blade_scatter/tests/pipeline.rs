use blade_scatter::placement::BLADE_AXIS;
use blade_scatter::prelude::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn meadow() -> (RecordingHost, SurfaceId) {
    let host = RecordingHost::new().with_surface("meadow", 6.0, 4.0, 48);
    (host, SurfaceId::new("meadow"))
}

#[test]
fn generate_then_delete_all_keeps_every_blade() {
    let (mut host, surface) = meadow();
    let request = GenerationRequest::new(2)
        .with_density_mode(DensityMode::DensityPerArea)
        .with_style(StyleName::Mowed, 20)
        .with_style(StyleName::Medium, 30)
        .with_style(StyleName::Long, 50);
    let mut rng = StdRng::seed_from_u64(2025);

    let result = GrassGenerator::new()
        .generate(&mut host, &surface, &request, &mut rng)
        .expect("generation succeeds");

    // 2 * floor(6 * 4) = 48 -> 9.6, 14.4, 24
    assert_eq!(result.total, 48);
    assert_eq!(result.plan.get(StyleName::Mowed), Some(10));
    assert_eq!(result.plan.get(StyleName::Medium), Some(14));
    assert_eq!(result.plan.get(StyleName::Long), Some(24));
    assert_eq!(result.placements.len(), 48);
    assert_eq!(host.count_of_type(NodeType::Attachment), 48);

    let catalog = StyleCatalog::new();
    for placed in &result.placements {
        let style = catalog.get(placed.instance.style);
        assert!(style.height.contains(placed.instance.height));
        assert!((0.0..=1.0).contains(&placed.binding.u));
        assert!((0.0..=1.0).contains(&placed.binding.v));
        assert!((0.0..360.0).contains(&placed.pose.spin_y_degrees));
        assert_eq!(placed.pose.tilt_x_degrees, -90.0);
    }

    let report = delete_attachments(&mut host, Some(DeleteMode::All)).expect("deletion succeeds");
    assert_eq!(report.attachments_removed.len(), 48);
    assert_eq!(host.count_of_type(NodeType::Attachment), 0);
    assert_eq!(host.count_of_type(NodeType::Mesh), 48);
    for placed in &result.placements {
        assert_eq!(host.parent_of(placed.mesh), None);
    }
}

#[test]
fn every_blade_gets_its_own_attachment() {
    let (mut host, surface) = meadow();
    let request = GenerationRequest::new(10)
        .with_density_mode(DensityMode::Absolute)
        .with_style(StyleName::Mowed, 100);

    let result = run_generation(
        &mut host,
        &surface,
        &request,
        &mut StdRng::seed_from_u64(10),
        None,
    )
    .expect("generation succeeds");

    let mut bindings: Vec<NodeId> = result.placements.iter().map(|p| p.binding.node).collect();
    bindings.sort();
    bindings.dedup();
    assert_eq!(bindings.len(), 10);
    for placed in &result.placements {
        assert!((0.5..=0.7).contains(&placed.instance.height));
        assert_eq!(host.children(placed.binding.node), vec![placed.mesh]);
    }
}

#[test]
fn blade_world_pose_matches_binding_then_local_pose() {
    let (mut host, surface) = meadow();
    let request = GenerationRequest::new(1)
        .with_density_mode(DensityMode::Absolute)
        .with_style(StyleName::Short, 100);

    let result = GrassGenerator::new()
        .generate(&mut host, &surface, &request, &mut StdRng::seed_from_u64(3))
        .expect("generation succeeds");
    let placed = &result.placements[0];

    let binding_world = host.node(placed.binding.node).expect("binding exists").world;
    let blade_world = host.node(placed.mesh).expect("blade exists").world;
    let expected = binding_world * placed.pose.local_transform();
    assert!(blade_world.abs_diff_eq(expected, 1e-5));
}

#[test]
fn blades_grow_upward_from_their_attachment_point() {
    let (mut host, surface) = meadow();
    let request = GenerationRequest::new(12)
        .with_density_mode(DensityMode::Absolute)
        .with_style(StyleName::Long, 100);

    let result = GrassGenerator::new()
        .generate(&mut host, &surface, &request, &mut StdRng::seed_from_u64(3))
        .expect("generation succeeds");

    for placed in &result.placements {
        let attach = host
            .node(placed.binding.node)
            .expect("binding exists")
            .world
            .transform_point3(Vec3::ZERO);
        let blade_world = host.node(placed.mesh).expect("blade exists").world;
        let half = placed.instance.height * 0.5;

        let axis = blade_world.transform_vector3(BLADE_AXIS).normalize();
        assert!(axis.y > 0.99, "blade lies along {axis}");

        let base = blade_world.transform_point3(-BLADE_AXIS * half);
        assert!(base.abs_diff_eq(attach, 1e-4), "base {base} vs {attach}");
        let centre = blade_world.transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(attach + Vec3::Y * half, 1e-4));
    }
}

#[test]
fn collected_events_mirror_result() {
    let (mut host, surface) = meadow();
    let request = GenerationRequest::new(3)
        .with_density_mode(DensityMode::Absolute)
        .with_style(StyleName::Long, 100);
    let mut sink = VecSink::new();

    let result = GrassGenerator::new()
        .generate_with_events(
            &mut host,
            &surface,
            &request,
            &mut StdRng::seed_from_u64(6),
            &mut sink,
        )
        .expect("generation succeeds");

    assert_eq!(sink.placements(), result.placements);
    assert!(matches!(
        sink.as_slice().first(),
        Some(GenerationEvent::RunStarted { .. })
    ));
}
