use depth_sketch::{SketchConfig, run_sketch};

fn main() -> anyhow::Result<()> {
    run_sketch(SketchConfig::face())
}
