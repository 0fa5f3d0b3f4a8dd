use blade_scatter::prelude::*;
use blade_scatter_examples::{init_tracing, load_request, render_placements_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Request authored as RON, the way a control panel would persist it.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/requests/meadow-mix.ron").into());
    let request = load_request(&path)?;

    let mut host = RecordingHost::new().with_surface("meadow", 20.0, 20.0, 400);
    let surface = SurfaceId::new("meadow");
    let mut rng = StdRng::seed_from_u64(2025);

    let result = GrassGenerator::new().generate(&mut host, &surface, &request, &mut rng)?;

    for (style, count) in result.plan.iter() {
        println!("{style:>6}: {count} blades");
    }
    println!(
        "total {} (plan {}), host calls {}",
        result.total,
        result.plan.total(),
        host.calls().len()
    );

    let rc = RenderConfig::new((512, 512)).with_dot_radius(3);
    render_placements_to_png(&result, &rc, "meadow-mix.png")?;

    Ok(())
}
