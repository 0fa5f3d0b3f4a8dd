use blade_scatter::prelude::*;
use blade_scatter_examples::{init_tracing, render_placements_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A 7.5 x 3.2 surface: area 24 after truncation, 96 faces.
    let surface = SurfaceId::new("lawn");
    let modes = [
        (DensityMode::Absolute, "density-absolute.png"),
        (DensityMode::DensityPerArea, "density-per-area.png"),
        (DensityMode::DensityPerFace, "density-per-face.png"),
    ];

    for (mode, out) in modes {
        let mut host = RecordingHost::new().with_surface("lawn", 7.5, 3.2, 96);
        let request = GenerationRequest::new(4)
            .with_density_mode(mode)
            .with_style(StyleName::Short, 50)
            .with_style(StyleName::Medium, 50);
        let mut rng = StdRng::seed_from_u64(7);

        let result = GrassGenerator::new().generate(&mut host, &surface, &request, &mut rng)?;
        println!("{mode:?}: resolved {} blades", result.total);

        render_placements_to_png(&result, &RenderConfig::new((400, 180)), out)?;
    }

    Ok(())
}
