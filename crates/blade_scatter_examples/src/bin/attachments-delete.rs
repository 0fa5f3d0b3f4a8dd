use blade_scatter::prelude::*;
use blade_scatter_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut host = RecordingHost::new().with_surface("ground", 10.0, 10.0, 100);
    let surface = SurfaceId::new("ground");
    let request = GenerationRequest::new(25)
        .with_density_mode(DensityMode::Absolute)
        .with_style(StyleName::Long, 100);

    let mut sink = VecSink::new();
    let result = GrassGenerator::new().generate_with_events(
        &mut host,
        &surface,
        &request,
        &mut StdRng::seed_from_u64(99),
        &mut sink,
    )?;
    println!(
        "placed {} blades, {} events",
        result.placements.len(),
        sink.len()
    );

    // A missing mode is reported and leaves the scene untouched.
    if let Err(err) = delete_attachments(&mut host, None) {
        println!("nothing deleted: {err}");
    }

    // Delete the first five attachments through the selection, then the rest.
    host.select(result.placements.iter().take(5).map(|p| p.binding.node));
    let selected = delete_attachments(&mut host, Some(DeleteMode::Selected))?;
    println!(
        "selected: removed {} attachments, released {} blades",
        selected.attachments_removed.len(),
        selected.children_released.len()
    );

    let all = delete_attachments(&mut host, Some(DeleteMode::All))?;
    println!(
        "all: removed {} attachments, {} attachments left, {} blades kept",
        all.attachments_removed.len(),
        host.count_of_type(NodeType::Attachment),
        host.count_of_type(NodeType::Mesh)
    );

    Ok(())
}
