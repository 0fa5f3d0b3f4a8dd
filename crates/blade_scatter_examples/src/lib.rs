#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, load_request, render_placements_to_png, RenderConfig};
